//! `flaskr` - CLI for the flaskr application
//!
//! Runs the HTTP server, initializes the database and inspects the
//! configuration of an instance directory.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use flaskr::cli::{Cli, Command, ConfigCommand, ServeCommand};
use flaskr::{create_app, init_logging, server, App, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let app = create_app(cli.instance_path.clone(), None).with_context(|| {
        format!(
            "cannot create application for instance {}",
            cli.instance_path.display()
        )
    })?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(&app, serve_cmd).await,
        Command::InitDb => handle_init_db(&app),
        Command::Config(config_cmd) => handle_config(&app, &config_cmd),
    }
}

async fn handle_serve(app: &App, cmd: ServeCommand) -> anyhow::Result<()> {
    let defaults = &app.config().server;
    let host = cmd.host.unwrap_or_else(|| defaults.host.clone());
    let port = cmd.port.unwrap_or(defaults.port);

    server::serve(app, &host, port).await?;
    Ok(())
}

fn handle_init_db(app: &App) -> anyhow::Result<()> {
    app.database()?
        .init_schema()
        .context("cannot initialize the database")?;
    println!("Initialized the database.");
    Ok(())
}

fn handle_config(app: &App, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json: true } => {
            println!("{}", app.config().to_pretty_json()?);
        }
        ConfigCommand::Show { json: false } => {
            let config = app.config();
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("  Instance path:  {}", app.instance_path().display());
            println!("  Database:       {}", config.database.display());
            println!(
                "  Secret key:     {}",
                if config.uses_dev_secret() {
                    "development placeholder"
                } else {
                    "set"
                }
            );
            println!("  Testing:        {}", config.testing);
            println!();
            println!("[Server]");
            println!("  Host:           {}", config.server.host);
            println!("  Port:           {}", config.server.port);
        }
        ConfigCommand::Path => {
            println!("{}", Config::file_path(app.instance_path()).display());
        }
    }
    Ok(())
}
