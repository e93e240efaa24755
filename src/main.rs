use anyhow::Result;
use clap::Parser;
use factlabel_rs::config::{self, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "factlabel", version, about = "Label Chinese claims as supports / refutes / NOT ENOUGH INFO")]
struct Cli {
    /// Input JSONL, one {"claim", "label"?} object per line
    #[arg(long)]
    input: PathBuf,
    /// Output JSONL with claim / predicted_label / label
    #[arg(long)]
    output: PathBuf,
    /// Server root of the OpenAI-compatible endpoint; `/v1` is appended
    #[arg(long, alias = "base_url")]
    base_url: Option<String>,
    /// Port used for the default base URL when --base-url is not given
    #[arg(long, env = "VLLM_PORT", default_value_t = config::DEFAULT_PORT)]
    vllm_port: u16,
    #[arg(long, alias = "api_key", env = "OPENAI_API_KEY", default_value = config::DEFAULT_API_KEY, hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "MODEL_NAME", default_value = config::DEFAULT_MODEL)]
    model: String,
    /// Only process the first N records (0 = all)
    #[arg(long, default_value_t = 0)]
    limit: usize,
    #[arg(long, alias = "max_retries", default_value_t = config::DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(1..))]
    max_retries: u32,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone().unwrap_or_else(|| config::default_base_url(self.vllm_port)),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_retries: self.max_retries,
            limit: self.limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let stats = factlabel_rs::run_files(&config, &cli.input, &cli.output).await?;
    for line in stats.summary_lines(&cli.output) {
        println!("{line}");
    }
    Ok(())
}
