use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// nextpwd - Single-password gate
#[derive(Parser)]
#[command(name = "nextpwd")]
#[command(about = "Protect a site behind one shared password", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a freshly signed session token
    Token,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = nextpwd::Config::load(cli.config)?;

    nextpwd::observability::init_observability(
        "nextpwd",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Token => cli::token::print(&config),
    }
}
