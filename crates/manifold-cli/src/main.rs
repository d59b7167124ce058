use clap::{Parser, Subcommand};
use manifold_llm::{ModelConfig, Provider, TextGenerator, DEFAULT_MODEL};
use manifold_orchestrator::{Concatenate, MergePolicy, Orchestrator, WorkerPool};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "manifold", about = "Manifold — fan-out/fan-in LLM orchestration")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "manifold.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question: plan it into sections, generate each concurrently,
    /// and merge the outputs in plan order
    Answer {
        /// The question to answer
        question: String,
        /// Model id override for all calls
        #[arg(long)]
        model: Option<String>,
        /// Cap on simultaneous generation calls (overrides config)
        #[arg(long)]
        max_concurrent: Option<usize>,
        /// Keep going when a section fails, substituting a placeholder,
        /// instead of failing the whole run
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Deserialize)]
struct ManifoldConfig {
    model: ModelConfig,
    #[serde(default)]
    orchestrator: OrchestratorConfig,
}

#[derive(Deserialize)]
struct OrchestratorConfig {
    #[serde(default = "default_max_concurrent")]
    max_concurrent: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_max_concurrent() -> usize {
    8
}

/// Load the TOML config; a missing file falls back to the Gemini defaults
/// with the API key taken from the environment.
async fn load_config(path: &Path) -> anyhow::Result<ManifoldConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Ok(toml::from_str(&config_str)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(config = %path.display(), "No config file, using defaults");
            Ok(ManifoldConfig {
                model: ModelConfig {
                    provider: Provider::Gemini,
                    model_id: DEFAULT_MODEL.to_string(),
                    api_key: String::new(),
                    api_base_url: None,
                    timeout_secs: 120,
                    retry_policy: None,
                },
                orchestrator: OrchestratorConfig::default(),
            })
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config).await?;

    match cli.command {
        Commands::Answer {
            question,
            model,
            max_concurrent,
            lenient,
        } => {
            let mut model_config = config.model;
            if let Some(model) = model {
                model_config.model_id = model;
            }
            if model_config.api_key.is_empty() {
                model_config.api_key = std::env::var("GEMINI_API_KEY")
                    .or_else(|_| std::env::var("MANIFOLD_API_KEY"))
                    .map_err(|_| {
                        anyhow::anyhow!(
                            "no API key configured: set api_key in '{}', \
                             GEMINI_API_KEY, or MANIFOLD_API_KEY",
                            cli.config.display()
                        )
                    })?;
            }

            let cap = max_concurrent.unwrap_or(config.orchestrator.max_concurrent);
            let policy = if lenient {
                MergePolicy::Lenient
            } else {
                MergePolicy::Strict
            };

            let generator = Arc::new(TextGenerator::new(model_config));
            let orchestrator = Orchestrator::new(Arc::clone(&generator))
                .with_pool(WorkerPool::new(generator).with_max_concurrent(cap))
                .with_merge_strategy(Box::new(Concatenate::new(policy)));

            let answer = orchestrator.answer(&question).await?;
            println!("{answer}");
        }
    }

    Ok(())
}
