//! awis CLI - query the Alexa Web Information Service.

use anyhow::{Context, Result};
use awis_lib::prelude::*;
use awis_lib::{DEFAULT_REGION, DEFAULT_SEARCH_RANGE};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "awis")]
#[command(about = "Query the Alexa Web Information Service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Access key id used to sign requests
    #[arg(long, env = "AWIS_ACCESS_ID", hide_env_values = true, global = true)]
    access_id: Option<String>,

    /// Secret key used to sign requests
    #[arg(long, env = "AWIS_SECRET_KEY", hide_env_values = true, global = true)]
    secret_key: Option<String>,

    /// Service region
    #[arg(long, default_value = DEFAULT_REGION, global = true)]
    region: String,

    /// Send requests to this endpoint instead of the regional host
    #[arg(long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch URL information (raw XML)
    UrlInfo {
        /// Site to look up (e.g., example.com)
        url: String,

        /// Response groups, comma separated (see `awis groups`)
        #[arg(short, long, value_delimiter = ',', required = true)]
        groups: Vec<String>,
    },

    /// Fetch daily traffic history
    History {
        /// Site to look up (e.g., example.com)
        url: String,

        /// Number of days to cover
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_RANGE)]
        range: u32,

        /// First day (YYYYMMDD). Defaults to <range> days ago.
        #[arg(short, long)]
        start: Option<String>,

        /// Search backwards from the start date
        #[arg(long)]
        reverse: bool,

        /// Maximum concurrent requests
        #[arg(long, default_value = "8")]
        concurrency: usize,

        /// Send sub-queries one at a time
        #[arg(long)]
        sequential: bool,

        /// Keep the days that could be fetched when some sub-queries fail
        #[arg(long)]
        resilient: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// Print the planned sub-queries without sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// List valid response groups
    Groups,
}

impl Cli {
    /// Returns the signing credentials from flags or environment.
    fn credentials(&self) -> Result<Credentials> {
        let access_id = self
            .access_id
            .clone()
            .context("missing access id: pass --access-id or set AWIS_ACCESS_ID")?;
        let secret_key = self
            .secret_key
            .clone()
            .context("missing secret key: pass --secret-key or set AWIS_SECRET_KEY")?;
        Ok(Credentials::new(access_id, secret_key))
    }

    /// Returns the service descriptor for the chosen region and endpoint.
    fn service(&self) -> Result<ServiceDescriptor> {
        let service = ServiceDescriptor::new(&self.region);
        match &self.endpoint {
            Some(endpoint) => Ok(service.with_endpoint(endpoint)?),
            None => Ok(service),
        }
    }
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Groups => {
            commands::groups::list_groups();
            Ok(())
        }
        Commands::UrlInfo { url, groups } => {
            let client = AwisClient::with_service(
                cli.credentials()?,
                cli.service()?,
                ClientConfig::default(),
            )?;
            commands::url_info::url_info(&client, url, groups).await
        }
        Commands::History {
            url,
            range,
            start,
            reverse,
            concurrency,
            sequential,
            resilient,
            format,
            dry_run,
        } => {
            let query = commands::history::build_query(url, *range, start.as_deref(), *reverse)?;
            if *dry_run {
                return commands::history::show_plan(&query);
            }

            let config = ClientConfig {
                concurrency: *concurrency,
                strategy: if *sequential {
                    DispatchStrategy::Sequential
                } else {
                    DispatchStrategy::Concurrent
                },
                ..Default::default()
            };
            let client = AwisClient::with_service(cli.credentials()?, cli.service()?, config)?;
            commands::history::history(&client, &query, *resilient, *format).await
        }
    }
}
