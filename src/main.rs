//! route-dispatch command line.
//!
//! # Commands
//! ```text
//! check     load + validate + build, print the route table
//! resolve   resolve paths given as arguments, one JSON line each
//! watch     resolve `[VERB] PATH` lines from stdin, hot-reloading the config
//! ```
//!
//! # Design Decisions
//! - Configuration is loaded before logging so its observability section applies
//! - Any startup error is fatal
//! - In watch mode a broken config edit is logged and the previous table keeps serving
//! - Watch mode stops on end of input or SIGINT

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use route_dispatch::config::{load_config, ConfigWatcher};
use route_dispatch::observability::{logging, metrics};
use route_dispatch::routing::{Resolved, Router};

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Compile, inspect and query request-path routing tables", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the route table
    Check,
    /// Resolve one or more paths
    Resolve {
        /// Request verb; omitted means no verb
        #[arg(short = 'X', long)]
        verb: Option<String>,

        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Resolve `[VERB] PATH` lines from stdin, reloading when the config changes
    Watch,
}

#[derive(Serialize)]
struct Resolution<'a> {
    path: &'a str,
    verb: Option<&'a str>,
    #[serde(rename = "match")]
    matched: Option<Resolved>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        flavor = %config.router.macro_flavor,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let router = Router::from_config(&config)?;

    match cli.command {
        Commands::Check => print_table(&router),
        Commands::Resolve { verb, paths } => {
            for path in &paths {
                print_resolution(&router, path, verb.as_deref())?;
            }
        }
        Commands::Watch => watch(cli.config, router).await?,
    }

    Ok(())
}

fn print_table(router: &Router) {
    let table = router.snapshot();
    println!(
        "{} routes ({} macros, missing verb: {:?})",
        table.route_count(),
        table.flavor(),
        table.missing_verb_policy()
    );
    for route in table.routes() {
        println!(
            "{:>4}  {:<8} {:<40} {}{}",
            route.index(),
            route.verb(),
            route.pattern(),
            route.handler(),
            route
                .alias()
                .map(|alias| format!("  [{}]", alias))
                .unwrap_or_default()
        );
    }
}

fn print_resolution(
    router: &Router,
    path: &str,
    verb: Option<&str>,
) -> Result<(), serde_json::Error> {
    let resolution = Resolution {
        path,
        verb,
        matched: router.lookup(path, verb),
    };
    println!("{}", serde_json::to_string(&resolution)?);
    Ok(())
}

async fn watch(config_path: PathBuf, router: Router) -> Result<(), Box<dyn std::error::Error>> {
    let router = Arc::new(router);

    let (watcher, mut updates) = ConfigWatcher::new(&config_path);
    let _watcher = watcher.run()?;

    let reloader = router.clone();
    tokio::spawn(async move {
        while let Some(config) = updates.recv().await {
            match reloader.reload(&config) {
                Ok(routes) => tracing::debug!(routes, "Serving reloaded routes"),
                Err(_) => continue,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed, shutting down");
                    break;
                };
                match parse_request_line(&line) {
                    Some((verb, path)) => print_resolution(&router, path, verb)?,
                    None if line.trim().is_empty() => {}
                    None => tracing::warn!(line = %line, "Expected `[VERB] PATH`"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT, shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Split `GET /users/1` or `/users/1` into verb and path.
fn parse_request_line(line: &str) -> Option<(Option<&str>, &str)> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    match (tokens.next(), tokens.next()) {
        (None, _) => Some((None, first)),
        (Some(path), None) => Some((Some(first), path)),
        (Some(_), Some(_)) => None,
    }
}
