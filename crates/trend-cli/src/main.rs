//! Command-line interface for trendcast
//!
//! Each pipeline stage is one subcommand, run as its own process:
//!
//! ```bash
//! # Credentials are read from the environment or a local .env file
//! export ALPHA_API_KEY="..."
//! export OPENAI_API_KEY="..."
//!
//! trendcast fetch --symbol TSLA     # writes TSLA_stock_data.csv
//! trendcast train                   # accuracy + confusion matrix
//! trendcast narrate                 # natural-language summary
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use trend_data::{AlphaVantageClient, PriceStore, StockError, display};
use trend_model::{EvaluationConfig, SplitStrategy, render_confusion_matrix};
use trend_narrate::{Narrator, SummarySource};
use trend_utils::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "trendcast")]
#[command(about = "Fetch daily prices, score a next-day direction model, and narrate recent closes", long_about = None)]
struct Cli {
    /// Ticker symbol (default: TRENDCAST_SYMBOL or TSLA)
    #[arg(short, long, global = true)]
    symbol: Option<String>,

    /// Directory holding <SYMBOL>_stock_data.csv (default: TRENDCAST_DATA_DIR or .)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the daily series and save it as CSV
    Fetch,
    /// Label next-day direction, fit logistic regression, report accuracy
    Train(TrainArgs),
    /// Summarize the last five closes with a language model
    Narrate(NarrateArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Split by date (oldest rows train) instead of a seeded shuffle
    #[arg(long)]
    chronological: bool,

    /// Seed for the shuffled split
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Share of labeled rows held out for testing
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Print fitted coefficients
    #[arg(long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct NarrateArgs {
    /// Chat model identifier (default: OPENAI_MODEL or gpt-3.5-turbo)
    #[arg(long)]
    model: Option<String>,
}

impl TrainArgs {
    fn evaluation_config(&self) -> EvaluationConfig {
        let split = if self.chronological {
            SplitStrategy::Chronological
        } else {
            SplitStrategy::Shuffled { seed: self.seed }
        };

        EvaluationConfig {
            test_ratio: self.test_ratio,
            split,
            ..EvaluationConfig::default()
        }
    }
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(symbol) = &cli.symbol {
        config = config.with_symbol(symbol);
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Command::Narrate(NarrateArgs { model: Some(model) }) = &cli.command {
        config = config.with_openai_model(model);
    }
    config
}

async fn run_fetch(config: &AppConfig) -> anyhow::Result<()> {
    let client = AlphaVantageClient::new(config.alpha_api_key.clone().unwrap_or_default());
    let store = PriceStore::new(&config.data_dir);

    match trend_data::ingest(&client, &store, &config.symbol).await {
        Ok(report) => {
            println!("✅ Successfully fetched stock data for {}", report.symbol);
            println!("\n📊 Data Preview:");
            println!("{}", display::price_table(report.preview()));
            println!("\n💾 Data saved to: {}", report.path.display());
            Ok(())
        }
        Err(StockError::MissingTimeSeries { payload }) => {
            println!("⚠️ Response received, but no time series data found.");
            println!("📦 Response content:");
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(StockError::HttpStatus { status }) => {
            println!("❌ API request failed. Status code: {status}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_train(config: &AppConfig, args: &TrainArgs) -> anyhow::Result<()> {
    let store = PriceStore::new(&config.data_dir);
    let table = store.load(&config.symbol)?;

    let evaluation = trend_model::evaluate(&table, &args.evaluation_config())?;

    println!("\n✅ Model Accuracy: {:.2}", evaluation.accuracy);
    println!(
        "   ({} train / {} test rows)\n",
        evaluation.train_size, evaluation.test_size
    );
    println!("{}", render_confusion_matrix(&evaluation.confusion));
    if args.verbose {
        println!("\n{}", evaluation.model_summary());
    }
    Ok(())
}

async fn run_narrate(config: &AppConfig) -> anyhow::Result<()> {
    let store = PriceStore::new(&config.data_dir);
    let narrator = Narrator::openai_from_env(&config.openai_model);

    let outcome = trend_narrate::narrate(&narrator, &store, &config.symbol).await?;

    println!("\n🧠 Prompt for GenAI:");
    println!("{}", outcome.prompt);

    if let SummarySource::Fallback { error } = &outcome.source {
        println!("⚠️ GenAI API call failed. Fallback activated.");
        println!("Error: {error}");
    }

    println!("\n📣 GenAI Summary:");
    println!("{}", outcome.summary);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so it is read before the subscriber exists
    let dotenv = trend_utils::load_dotenv();
    trend_utils::init_tracing();
    trend_utils::report_dotenv(&dotenv);

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    info!("Starting trendcast for {}", config.symbol);

    match &cli.command {
        Command::Fetch => run_fetch(&config).await,
        Command::Train(args) => run_train(&config, args),
        Command::Narrate(_) => run_narrate(&config).await,
    }
}
