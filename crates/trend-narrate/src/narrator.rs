//! Narration stage: ask a model for a trend summary, fall back on failure

use crate::error::Result;
use crate::prompt::{PROMPT_DAYS, PromptContext};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use trend_data::PriceStore;
use trend_llm::providers::OpenAIProvider;
use trend_llm::{CompletionRequest, LLMError, LLMProvider, Message};

/// Summary used whenever the completion call fails
pub fn fallback_summary(symbol: &str) -> String {
    format!(
        "📉 Over the past {PROMPT_DAYS} days, {symbol} experienced a downward trend followed by a mild rebound. \
         This may indicate short-term volatility, possible profit-taking, or upcoming consolidation."
    )
}

/// Where the summary text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySource {
    /// Returned by the completion provider
    Model,
    /// Substituted after the provider failed with `error`
    Fallback { error: String },
}

/// Prompt sent and summary obtained for one narration
#[derive(Debug, Clone)]
pub struct NarrationOutcome {
    pub prompt: String,
    pub summary: String,
    pub source: SummarySource,
}

impl NarrationOutcome {
    pub fn used_fallback(&self) -> bool {
        matches!(self.source, SummarySource::Fallback { .. })
    }
}

enum ProviderSlot {
    Ready(Arc<dyn LLMProvider>),
    /// Provider could not be built; every call falls back with this error
    Unavailable(String),
}

/// Sends prompts to a completion provider with a fixed model
pub struct Narrator {
    provider: ProviderSlot,
    model: String,
}

impl Narrator {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider: ProviderSlot::Ready(provider),
            model: model.into(),
        }
    }

    /// Use the OpenAI provider configured from `OPENAI_API_KEY`/`OPENAI_API_BASE`.
    ///
    /// A missing key does not fail here; it is reported as a completion failure
    /// when [`Narrator::summarize`] runs.
    pub fn openai_from_env(model: impl Into<String>) -> Self {
        let provider = match OpenAIProvider::from_env() {
            Ok(provider) => ProviderSlot::Ready(Arc::new(provider)),
            Err(e) => ProviderSlot::Unavailable(e.to_string()),
        };

        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> std::result::Result<String, LLMError> {
        let provider = match &self.provider {
            ProviderSlot::Ready(provider) => provider,
            ProviderSlot::Unavailable(reason) => {
                return Err(LLMError::ConfigurationError(reason.clone()));
            }
        };

        let request = CompletionRequest::builder(&self.model)
            .add_message(Message::user(prompt))
            .build();

        let response = provider.complete(request).await?;
        response
            .message
            .text()
            .map(str::to_string)
            .ok_or_else(|| LLMError::UnexpectedResponse("Response carried no text".to_string()))
    }

    /// Render the prompt for `context` and obtain a summary.
    ///
    /// Only template rendering can fail; provider errors become the fallback.
    #[instrument(skip(self, context), fields(symbol = %context.symbol, model = %self.model))]
    pub async fn summarize(&self, context: &PromptContext) -> Result<NarrationOutcome> {
        let prompt = context.render()?;

        let (summary, source) = match self.complete(&prompt).await {
            Ok(text) => {
                info!("Received summary from model");
                (text, SummarySource::Model)
            }
            Err(e) => {
                warn!("GenAI API call failed, using fallback summary: {}", e);
                (
                    fallback_summary(&context.symbol),
                    SummarySource::Fallback {
                        error: e.to_string(),
                    },
                )
            }
        };

        Ok(NarrationOutcome {
            prompt,
            summary,
            source,
        })
    }
}

/// Load `symbol` from `store` and narrate its last closes
pub async fn narrate(
    narrator: &Narrator,
    store: &PriceStore,
    symbol: &str,
) -> Result<NarrationOutcome> {
    let table = store.load(symbol)?;
    let context = PromptContext::from_table(&table)?;
    narrator.summarize(&context).await
}
