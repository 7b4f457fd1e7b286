//! URI router command-line front end.
//!
//! ```text
//! uri-router [--config router.toml] <command>
//!
//!   resolve <uri>                      print the navigation request as JSON
//!   open <uri> [--request-code N]      dispatch through a console context
//!        [--from-host]
//!   routes                             list registry entries
//!   watch                              hot-reload the config until Ctrl-C
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use uri_router::config::{load_config, watcher::RouteFileWatcher, RouterConfig};
use uri_router::dispatch::{NavigationContext, NavigationRequest, Router, TracingCallback};
use uri_router::error::StartError;
use uri_router::observability;
use uri_router::routing::RouteSlot;

#[derive(Parser)]
#[command(name = "uri-router")]
#[command(about = "Resolve and open URIs against a route table", long_about = None)]
struct Cli {
    /// Route table (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URI without opening it
    Resolve { uri: String },
    /// Open a URI through the console context
    Open {
        uri: String,
        /// Request a result under this code
        #[arg(long)]
        request_code: Option<u32>,
        /// Dispatch as if called from a navigation host
        #[arg(long)]
        from_host: bool,
    },
    /// List registered routes
    Routes,
    /// Watch the config file and re-register routes on change
    Watch,
}

/// Context that "starts" a destination by printing the request.
struct ConsoleContext {
    host: bool,
}

impl ConsoleContext {
    fn print(&self, request: &NavigationRequest) -> Result<(), StartError> {
        println!("{}", serde_json::to_string_pretty(request)?);
        Ok(())
    }
}

impl NavigationContext for ConsoleContext {
    fn is_navigation_host(&self) -> bool {
        self.host
    }

    fn start(&self, request: &NavigationRequest) -> Result<(), StartError> {
        self.print(request)
    }

    fn start_for_result(&self, request: &NavigationRequest, request_code: u32) -> Result<(), StartError> {
        println!("request_code: {}", request_code);
        self.print(request)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    observability::logging::init(&config.observability)?;
    tracing::info!(config = ?cli.config, routes = config.routes.len(), "uri-router starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = Router::from_config(&config);
    router.set_default_callback(Some(Arc::new(TracingCallback)));

    let code = match cli.command {
        Commands::Resolve { uri } => match router.resolve(&uri) {
            Some(request) => {
                println!("{}", serde_json::to_string_pretty(&request)?);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("no destination for {}", uri);
                ExitCode::FAILURE
            }
        },
        Commands::Open { uri, request_code, from_host } => {
            let ctx = ConsoleContext { host: from_host };
            let opened = match request_code {
                Some(code) => router.open_for_result(&ctx, &uri, code),
                None => router.open(&ctx, &uri),
            };
            if opened {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Routes => {
            for entry in router.registry().entries() {
                match entry.slot {
                    RouteSlot::Mapped(dest) => println!("{:<24} {}", entry.key, dest),
                    RouteSlot::Absent => println!("{:<24} (absent)", entry.key),
                }
            }
            ExitCode::SUCCESS
        }
        Commands::Watch => {
            let Some(path) = cli.config else {
                eprintln!("watch requires --config");
                return Ok(ExitCode::FAILURE);
            };
            watch(&router, path).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

async fn watch(router: &Router, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = RouteFileWatcher::new(&path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(config) = updates.recv() => {
                router.apply_routes(&config);
                tracing::info!(entries = router.registry().len(), "Routes reloaded");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }
    Ok(())
}
