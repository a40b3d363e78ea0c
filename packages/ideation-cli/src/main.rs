//! Command-line runner: topic in, JSON idea report out.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use ideation::{
    CallScheduler, EmptyIdeaSource, GeminiIdeaSource, IdeaSource, Ideation, IdeationConfig,
    SemanticScholarSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "ideation")]
#[command(about = "Generate an evidence-backed startup idea report for a topic")]
struct Cli {
    /// Topic to explore (at least 5 characters)
    topic: String,

    /// Number of ideas to aggregate
    #[arg(long, default_value_t = 3)]
    ideas: usize,

    /// Minimum relevance score for evidence
    #[arg(long)]
    min_score: Option<u32>,

    /// Minimum relevance score for the fallback search
    #[arg(long)]
    fallback_min_score: Option<u32>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ideation=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let ideas: Box<dyn IdeaSource> = match &config.gemini {
        Some(credentials) => Box::new(GeminiIdeaSource::from_credentials(credentials)),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, ideas will come from templates");
            Box::new(EmptyIdeaSource)
        }
    };

    let mut evidence = SemanticScholarSource::new()
        .with_scheduler(CallScheduler::from_millis(config.semantic_rate_limit_ms));
    if let Some(key) = &config.semantic_scholar_api_key {
        evidence = evidence.with_api_key(key.expose());
    }

    let mut pipeline_config = IdeationConfig::new();
    pipeline_config.aggregator = pipeline_config.aggregator.with_desired_ideas(cli.ideas);
    if let Some(score) = cli.min_score {
        pipeline_config.evidence = pipeline_config.evidence.with_min_score(score);
    }
    if let Some(score) = cli.fallback_min_score {
        pipeline_config.evidence = pipeline_config.evidence.with_fallback_min_score(score);
    }

    let report = Ideation::new(ideas, evidence)
        .with_config(pipeline_config)
        .run(&cli.topic)
        .await
        .context("Failed to generate idea report")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    println!("{json}");
    Ok(())
}
