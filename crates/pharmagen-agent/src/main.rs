//! pharmagen — pharmacogenomic risk reports from a VCF file.
//!
//! Logs go to stderr; the JSON report goes to stdout or `--output`.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pharmagen_kb::KnowledgeBase;
use tracing_subscriber::EnvFilter;

use crate::commands::AnalyzeArgs;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "pharmagen")]
#[command(about = "Pharmacogenomic drug-risk analysis from VCF files", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (TOML, or YAML by extension); defaults to ./pharmagen.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a VCF against a list of drugs and emit JSON reports
    Analyze {
        /// Path to the VCF file
        #[arg(long, required_unless_present = "sample", conflicts_with = "sample")]
        vcf: Option<PathBuf>,

        /// Comma-separated drug names, e.g. "CODEINE, WARFARIN"
        #[arg(short, long)]
        drugs: Option<String>,

        /// Use the built-in demonstration VCF (and its drug list unless --drugs is given)
        #[arg(long)]
        sample: bool,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip narrative generation even if configured
        #[arg(long)]
        no_narrative: bool,
    },

    /// Check that a file looks like a VCF with at least one record
    Validate {
        /// Path to the VCF file
        #[arg(long)]
        vcf: PathBuf,
    },

    /// List supported drugs with their primary gene
    Drugs,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pharmagen=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let kb = KnowledgeBase::curated();

    match cli.command {
        Commands::Analyze { vcf, drugs, sample, output, no_narrative } => {
            let config = Config::load(cli.config.as_deref())?;
            let args = AnalyzeArgs { vcf, drugs, sample, output, no_narrative };
            commands::analyze(&kb, &config.llm, args).await?;
        }
        Commands::Validate { vcf } => {
            if !commands::validate(&vcf)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Drugs => commands::list_drugs(&kb),
    }

    Ok(ExitCode::SUCCESS)
}
