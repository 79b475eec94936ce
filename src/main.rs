//! # siteseer CLI
//!
//! Command-line interface for webpage analysis:
//!
//! - `seo`: fetch a page and produce a bullet-point SEO breakdown
//! - `ask`: fetch a page and answer a free-text question about it
//!
//! Both commands run the full pipeline (fetch, chunk, embed, retrieve,
//! generate) against a fresh in-memory index and print the answer, with an
//! optional JSON output mode and an optional save of the answer text to a
//! local directory.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use siteseer::analyzer::{Analyzer, OpenAiAnalyzer, QueryResult};
use siteseer::config::{AnalyzerConfig, ClientConfig};
use siteseer::model::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Webpage SEO reports and Q&A through retrieval-augmented generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Produce an SEO breakdown of a webpage
    Seo(SeoArgs),

    /// Answer a question about a webpage
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct SeoArgs {
    /// Webpage URL, e.g. 'https://openai.com'
    #[arg(required = true)]
    url: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AskArgs {
    /// Webpage URL, e.g. 'https://openai.com'
    #[arg(required = true)]
    url: String,

    /// Your question, e.g. 'What is this website about?'
    #[arg(required = true)]
    question: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// API key (falls back to the OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Chat-completion model
    #[arg(short, long, default_value = "gpt-3.5-turbo-16k")]
    model: String,

    /// Embedding model
    #[arg(long, default_value = "text-embedding-ada-002")]
    embedding_model: String,

    /// Chunk size in characters
    #[arg(short, long, default_value = "4000")]
    chunk_size: usize,

    /// Number of segments to retrieve (defaults: 10 for seo, 4 for ask)
    #[arg(short, long)]
    k: Option<usize>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Directory to save the generated answer into
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Seo(args) => {
            let analyzer = build_analyzer(&args.common)?;
            let spinner = start_spinner("Analysing SEO...");
            let result = analyzer.seo_report(&args.url).await?;
            spinner.finish_and_clear();

            report(&args.url, siteseer::analyzer::SEO_QUERY, &result, &args.common).await?;
        }
        Commands::Ask(args) => {
            let analyzer = build_analyzer(&args.common)?;
            let spinner = start_spinner("Answering question...");
            let result = analyzer.answer_question(&args.url, &args.question).await?;
            spinner.finish_and_clear();

            report(&args.url, &args.question, &result, &args.common).await?;
        }
    }

    Ok(())
}

fn build_analyzer(args: &CommonArgs) -> anyhow::Result<OpenAiAnalyzer> {
    let client_config = match &args.api_key {
        Some(key) => ClientConfig::new(key.clone()),
        None => ClientConfig::from_env()?,
    };
    let client_config = ClientConfig::builder(client_config.api_key)
        .completion_model(&args.model)
        .embedding_model(&args.embedding_model)
        .build();

    let mut builder = AnalyzerConfig::builder().target_chunk_size(args.chunk_size);
    if let Some(k) = args.k {
        builder = builder.seo_retrieval_count(k).question_retrieval_count(k);
    }

    let client = Client::new_openai(&client_config)?;
    Ok(Analyzer::new(client, builder.build())?)
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("spinner template is valid"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn report(
    url: &str,
    query: &str,
    result: &QueryResult,
    args: &CommonArgs,
) -> anyhow::Result<()> {
    match args.format.as_str() {
        "json" => {
            let json_response = serde_json::json!({
                "url": url,
                "query": query,
                "answer": result.answer_text,
                "sources": result.retrieved.iter().map(|segment| {
                    serde_json::json!({
                        "text": segment.text,
                        "url": segment.source_url,
                        "position": segment.position,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json_response)?);
        }
        _ => {
            println!("{}", result.answer_text);
            eprintln!("\n({} segments retrieved from {})", result.retrieved.len(), url);
        }
    }

    if let Some(dir) = &args.save_dir {
        let path = save_answer(dir, &result.answer_text).await?;
        eprintln!("Saved answer to {}", path.display());
    }

    Ok(())
}

/// Persist the answer text to a timestamped file in `dir`
async fn save_answer(dir: &Path, answer: &str) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let filename = format!("answer-{}.txt", chrono::Utc::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(filename);
    tokio::fs::write(&path, answer)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_answer_writes_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_answer(dir.path(), "the answer text").await.unwrap();

        let saved = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(saved, "the answer text");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("answer-"));
    }

    #[tokio::test]
    async fn test_save_answer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports");

        let path = save_answer(&nested, "text").await.unwrap();
        assert!(path.exists());
    }
}
