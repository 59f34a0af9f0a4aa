use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folp-server")]
#[command(about = "Caching lookup proxy for the folp browser extension.")]
#[command(version)]
pub struct Cli {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Config file path
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}
