mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod payload;
mod pretty;
mod render;
mod session;
mod stats;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::{DEFAULT_REFRESH_SECS, SERVER_ENV_VAR};
use crate::environment::Environment;
use crate::logging::init_logger;
use crate::payload::ApiVersion;
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::render::html::render_page;
use crate::render::text::render_report;
use crate::session::{WatchOptions, run_headless_mode, run_tui_mode, setup_session};
use crate::stats::{StatsClient, StatsSource, print_data_on_screen};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Monitor for distributed chunk batching progress
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Which payload shape to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum ApiArg {
    /// Detect from the payload
    #[default]
    Auto,
    /// `clientData` map, five summary lines, three columns
    ClientData,
    /// `clientStatusDictionary` map, six summary lines, chunk lists
    StatusDictionary,
}

impl ApiArg {
    fn pinned(self) -> Option<ApiVersion> {
        match self {
            ApiArg::Auto => None,
            ApiArg::ClientData => Some(ApiVersion::ClientData),
            ApiArg::StatusDictionary => Some(ApiVersion::StatusDictionary),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the stats once and write the HTML status page
    Page {
        /// Stats server: 'local' or a base URL such as http://10.0.0.5:5000
        #[arg(long, value_name = "URL")]
        server: Option<Environment>,

        /// Payload shape to render
        #[arg(long, value_enum, default_value_t = ApiArg::Auto)]
        api: ApiArg,

        /// Write the page to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Fetch the stats once and print a text report
    Show {
        /// Stats server: 'local' or a base URL such as http://10.0.0.5:5000
        #[arg(long, value_name = "URL")]
        server: Option<Environment>,

        /// Payload shape to render
        #[arg(long, value_enum, default_value_t = ApiArg::Auto)]
        api: ApiArg,
    },
    /// Keep fetching the stats and show them in a live dashboard
    Watch {
        /// Stats server: 'local' or a base URL such as http://10.0.0.5:5000
        #[arg(long, value_name = "URL")]
        server: Option<Environment>,

        /// Payload shape to render
        #[arg(long, value_enum, default_value_t = ApiArg::Auto)]
        api: ApiArg,

        /// Seconds between fetches
        #[arg(long, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,

        /// Print a text report per fetch instead of the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Enable the dashboard background color
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Remember the stats server for later commands
    SetServer {
        /// Base URL of the stats server, e.g. http://10.0.0.5:5000
        #[arg(long, value_name = "URL")]
        url: Environment,
    },
    /// Delete the saved configuration
    ClearConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Page {
            server,
            api,
            output,
        } => {
            init_logger();
            let environment = resolve_environment(server, &config_path);
            let client = StatsClient::new(environment)?;
            let document = print_data_on_screen(&client, api.pinned()).await;
            let html = render_page(&document, &client.describe())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                    print_cmd_info!("Status page", "Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }
        Command::Show { server, api } => {
            init_logger();
            let environment = resolve_environment(server, &config_path);
            let client = StatsClient::new(environment)?;
            let document = print_data_on_screen(&client, api.pinned()).await;
            print!("{}", render_report(&document));
            Ok(())
        }
        Command::Watch {
            server,
            api,
            interval,
            headless,
            with_background,
        } => {
            // The dashboard owns the terminal, so only headless mode logs to stderr.
            if headless {
                init_logger();
            }
            let environment = resolve_environment(server, &config_path);
            let options = WatchOptions {
                pinned: api.pinned(),
                interval: Duration::from_secs(interval),
            };
            let session = setup_session(environment, options).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::SetServer { url } => {
            let config = Config::new(url.server_url());
            config.save(&config_path).map_err(|e| {
                print_cmd_error!("Failed to save config");
                format!("Failed to save config: {}", e)
            })?;
            println!("Saved stats server {}", config.server_url);
            Ok(())
        }
        Command::ClearConfig => {
            println!("Clearing configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Picks the server: command line, then config file, then environment variable, then local.
fn resolve_environment(cli: Option<Environment>, config_path: &Path) -> Environment {
    if let Some(environment) = cli {
        return environment;
    }

    if config_path.exists() {
        match Config::load_from_file(config_path) {
            Ok(config) => match config.server_url.parse::<Environment>() {
                Ok(environment) => return environment,
                Err(e) => log::warn!("Ignoring saved server: {}", e),
            },
            Err(e) => log::warn!("Ignoring unreadable config {}: {}", config_path.display(), e),
        }
    }

    if let Ok(value) = std::env::var(SERVER_ENV_VAR) {
        match value.parse::<Environment>() {
            Ok(environment) => return environment,
            Err(e) => log::warn!("Ignoring {}: {}", SERVER_ENV_VAR, e),
        }
    }

    Environment::default()
}
