use clap::Parser;
use std::path::PathBuf;
use tech_digest::{pipeline, PipelineConfig};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "tech-digest",
    about = "Collect, deduplicate, and digest recent AI/tech stories"
)]
struct Cli {
    /// Rolling collection window in days
    #[arg(long, default_value_t = 7)]
    window_days: i64,

    /// Maximum stories in the final digest
    #[arg(long, default_value_t = 10)]
    max_stories: usize,

    /// Write the digest to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = PipelineConfig::default();
    config.window_days = cli.window_days;
    config.max_stories = cli.max_stories;
    config.github_token = std::env::var("GITHUB_TOKEN").ok();

    let digest = pipeline::run(&config).await?;
    info!("Digest contains {} stories", digest.stories.len());

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &digest.text)?;
            info!("Wrote digest to {}", path.display());
        }
        None => println!("{}", digest.text),
    }

    Ok(())
}
