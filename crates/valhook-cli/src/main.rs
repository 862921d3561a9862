//! Valhook CLI - value hooks for database-backed chart releases

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

/// Environment variable holding the log filter
const LOG_ENV: &str = "VALHOOK_LOG";

#[derive(Parser)]
#[command(name = "valhook")]
#[command(version)]
#[command(about = "Inject cluster-derived and generated values into a chart release", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pre-install hooks and print the resulting values
    PreInstall {
        /// Values file(s) to merge
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Write the resulting values here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't look up the cluster routing domain
        #[arg(long)]
        skip_router_domain: bool,

        /// Don't generate database credentials
        #[arg(long)]
        skip_credentials: bool,
    },

    /// Run the post-install hooks against a release and print its values
    PostInstall {
        /// Release name
        name: String,

        /// Release namespace
        #[arg(short, long, env = "VALHOOK_NAMESPACE", default_value = "default")]
        namespace: String,

        /// Values file(s) of the release
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Write the resulting values here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Log to stderr, filtered by `VALHOOK_LOG` (default `info`)
fn initialize_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::PreInstall {
            values,
            set,
            output,
            skip_router_domain,
            skip_credentials,
        } => {
            commands::pre_install::run(
                &values,
                &set,
                output.as_deref(),
                skip_router_domain,
                skip_credentials,
            )
            .await
        }

        Commands::PostInstall {
            name,
            namespace,
            values,
            set,
            output,
        } => {
            commands::post_install::run(&name, &namespace, &values, &set, output.as_deref()).await
        }
    }
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    initialize_logging(cli.debug);

    if let Err(e) = run(cli).await {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }
}
