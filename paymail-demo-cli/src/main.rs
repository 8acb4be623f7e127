//! Paymail Demo CLI
//!
//! Command-line interface for exercising paymail capability endpoints.

use anyhow::Result;
use clap::{Parser, Subcommand};
use paymail_demo_cli::commands::{self, OutputFormat};
use paymail_lib::HttpExecutorConfig;

#[derive(Parser)]
#[command(name = "paymail-demo")]
#[command(about = "Paymail Demo CLI - Query paymail capability endpoints", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "PAYMAIL_DEMO_TIMEOUT", default_value_t = 20)]
    timeout: u64,

    /// User-Agent sent to paymail providers
    #[arg(long, global = true, env = "PAYMAIL_DEMO_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a paymail address and show its client and server forms
    Parse {
        /// Paymail address (alias@domain.tld)
        address: String,
    },

    /// Substitute an address into a capability URL template
    Resolve {
        /// Capability URL template, e.g. https://host/{alias}@{domain.tld}/id
        template: String,

        /// Paymail address (alias@domain.tld)
        address: String,
    },

    /// Fetch the authentication URL for an address
    Auth {
        /// Authentication capability URL template
        template: String,

        /// Paymail address (alias@domain.tld)
        address: String,
    },

    /// Fetch the encrypted keyfile for an address
    Keyfile {
        /// Keyfile capability URL template
        template: String,

        /// Paymail address (alias@domain.tld)
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("paymail_demo_cli=debug,paymail_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("paymail_demo_cli=info,paymail_lib=warn")
            .init();
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut executor_config = HttpExecutorConfig::default().with_timeout(cli.timeout);
    if let Some(user_agent) = cli.user_agent {
        executor_config = executor_config.with_user_agent(user_agent);
    }

    // Dispatch commands
    match cli.command {
        Commands::Parse { address } => {
            commands::parse::run(&address, format)?;
        }
        Commands::Resolve { template, address } => {
            commands::resolve::run(&template, &address, format)?;
        }
        Commands::Auth { template, address } => {
            commands::fetch::auth(executor_config, &template, &address, format, cli.verbose)
                .await?;
        }
        Commands::Keyfile { template, address } => {
            commands::fetch::keyfile(executor_config, &template, &address, format, cli.verbose)
                .await?;
        }
    }

    Ok(())
}
