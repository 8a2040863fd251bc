use clap::Parser;
use std::path::PathBuf;

/// Reads a JSON payload of patient risk factors on stdin and prints a JSON
/// verdict on stdout. Every flag is optional.
#[derive(Parser, Debug, Default)]
#[command(name = "liver-risk")]
#[command(author, version, about = "Liver disease risk inference adapter", long_about = None)]
pub struct Cli {
    /// Model artifact path
    #[arg(short, long, env = "LIVER_RISK_MODEL")]
    pub model: Option<PathBuf>,

    /// Configuration file path (YAML)
    #[arg(short, long, env = "LIVER_RISK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
