//! Natural-language price summaries for trendcast
//!
//! The third pipeline stage: the last few closes of a symbol are rendered into
//! a prompt, sent to a chat-completion provider, and the reply is used as the
//! summary. Any provider failure is replaced by a fixed fallback sentence, so
//! narration itself only fails when the price file cannot be read.

pub mod error;
pub mod narrator;
pub mod prompt;

pub use error::{NarrateError, Result};
pub use narrator::{NarrationOutcome, Narrator, SummarySource, fallback_summary, narrate};
pub use prompt::{PROMPT_DAYS, PromptContext};
