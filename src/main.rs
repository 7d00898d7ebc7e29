use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use gatehouse::api::AdminApi;
use gatehouse::model::{ConsoleConfig, Route, ToggleMode};
use gatehouse::notify::StdoutNotifier;
use gatehouse::remote::RemoteClient;
use gatehouse::shell::ConsoleShell;
use gatehouse::tui::{TuiRunOptions, run_with_options};

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(about = "Gateway admin console", long_about = None)]
struct Cli {
    /// Admin API base URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    token: Option<String>,

    /// Toggle behavior: server-truth or optimistic
    #[arg(long, global = true, default_value = "server-truth")]
    toggle_mode: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate gateway routes
    Routes {
        #[command(subcommand)]
        command: RouteCommands,
    },

    /// Inspect and mutate API clients
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },

    /// Show the predicate/filter factory catalog
    Factories {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive console
    Tui,
}

#[derive(Subcommand)]
enum RouteCommands {
    /// List routes, optionally filtered by id/uri substring
    List {
        /// Case-insensitive substring matched against id and uri
        #[arg(long)]
        query: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or update a route from a JSON file
    Apply {
        /// Path to a route document; an empty or missing id creates
        #[arg(long)]
        file: PathBuf,
    },

    /// Flip a route's enabled flag
    Toggle { id: String },

    /// Delete a route
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ClientCommands {
    /// List API clients, optionally filtered by appKey/description substring
    List {
        /// Case-insensitive substring matched against appKey and description
        #[arg(long)]
        query: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an API client; the backend mints its keys
    Create {
        #[arg(long)]
        description: String,
    },

    /// Flip an API client's enabled flag
    Toggle { app_key: String },

    /// Delete an API client
    Delete {
        app_key: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let toggle_mode = parse_toggle_mode(&cli.toggle_mode)?;
    let config = ConsoleConfig {
        base_url: cli.url.clone(),
        token: cli.token.clone(),
        toggle_mode,
    };

    match cli.command {
        Commands::Routes { command } => run_routes(config, command),
        Commands::Clients { command } => run_clients(config, command),
        Commands::Factories { json } => run_factories(config, json),
        Commands::Tui => run_with_options(TuiRunOptions { config }),
    }
}

fn parse_toggle_mode(s: &str) -> Result<ToggleMode> {
    match s {
        "server-truth" => Ok(ToggleMode::ServerTruth),
        "optimistic" => Ok(ToggleMode::Optimistic),
        other => bail!("unknown toggle mode {:?} (expected server-truth or optimistic)", other),
    }
}

fn run_routes(config: ConsoleConfig, command: RouteCommands) -> Result<()> {
    let backend = RemoteClient::new(config.clone())?;

    match command {
        RouteCommands::List { query, json } => {
            let routes = backend.list_routes(query.as_deref().unwrap_or(""))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&routes).context("serialize routes json")?
                );
            } else {
                for route in routes {
                    let marker = if route.enabled { "*" } else { " " };
                    println!("{} {:<24} order={:<4} {}", marker, route.id, route.order, route.uri);
                }
            }
        }

        RouteCommands::Apply { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let route: Route = serde_json::from_str(&text)
                .with_context(|| format!("parse route document {}", file.display()))?;
            if route.id.is_empty() {
                backend.save_route(&route)?;
                println!("route created");
            } else {
                backend.update_route(&route)?;
                println!("route {} updated", route.id);
            }
        }

        RouteCommands::Toggle { id } => {
            let notify = StdoutNotifier::default();
            let mut shell = ConsoleShell::new(backend, config.toggle_mode);
            shell.fetch_routes("", &notify);
            let Some(route) = shell.routes.items().iter().find(|r| r.id == id).cloned() else {
                bail!("no route with id {:?}", id);
            };
            shell.toggle_route(&route, &notify);
        }

        RouteCommands::Delete { id, yes } => {
            let notify = StdoutNotifier { assume_yes: yes };
            let mut shell = ConsoleShell::new(backend, config.toggle_mode);
            shell.delete_route(&id, &notify);
        }
    }

    Ok(())
}

fn run_clients(config: ConsoleConfig, command: ClientCommands) -> Result<()> {
    let backend = RemoteClient::new(config.clone())?;

    match command {
        ClientCommands::List { query, json } => {
            let clients = backend.list_clients(query.as_deref().unwrap_or(""))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&clients).context("serialize clients json")?
                );
            } else {
                for client in clients {
                    let marker = if client.enabled { "*" } else { " " };
                    println!("{} {:<36} {}", marker, client.app_key, client.description);
                }
            }
        }

        ClientCommands::Create { description } => {
            let notify = StdoutNotifier::default();
            let mut shell = ConsoleShell::new(backend, config.toggle_mode);
            shell.create_client(&description, &notify);
        }

        ClientCommands::Toggle { app_key } => {
            let notify = StdoutNotifier::default();
            let mut shell = ConsoleShell::new(backend, config.toggle_mode);
            shell.fetch_clients("", &notify);
            let Some(client) = shell
                .clients
                .items()
                .iter()
                .find(|c| c.app_key == app_key)
                .cloned()
            else {
                bail!("no API client with appKey {:?}", app_key);
            };
            shell.toggle_client(&client, &notify);
        }

        ClientCommands::Delete { app_key, yes } => {
            let notify = StdoutNotifier { assume_yes: yes };
            let mut shell = ConsoleShell::new(backend, config.toggle_mode);
            shell.fetch_clients("", &notify);
            let Some(client) = shell
                .clients
                .items()
                .iter()
                .find(|c| c.app_key == app_key)
                .cloned()
            else {
                bail!("no API client with appKey {:?}", app_key);
            };
            shell.delete_client(client.id, &notify);
        }
    }

    Ok(())
}

fn run_factories(config: ConsoleConfig, json: bool) -> Result<()> {
    let backend = RemoteClient::new(config)?;
    let catalog = backend.factories()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog).context("serialize factory catalog json")?
        );
        return Ok(());
    }

    for entry in catalog.flatten() {
        let params = entry
            .info
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<10} {:<28} {}", entry.kind.label(), entry.info.name, params);
    }

    Ok(())
}
