use anyhow::Context;
use clap::Parser;
use ingredient_similarity::{cli, config, embedder, pipeline};
use cli::Cli;
use config::Config;
use embedder::FastEmbedder;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::default();
    let output_dir = std::env::current_dir().context("current directory is not accessible")?;

    let summary = pipeline::generate_report(&cli.filename, &output_dir, &config, FastEmbedder::load)
        .with_context(|| format!("failed to build the report for {}", cli.filename.display()))?;

    let pairs = summary.top_pairs(config.top_pairs);
    if !pairs.is_empty() {
        println!("\nTop-{} most similar pairs:", pairs.len());
        for (a, b, score) in pairs {
            println!("{} \t {} \t {:.4}", a, b, score);
        }
    }

    Ok(())
}
