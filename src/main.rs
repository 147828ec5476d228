use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use evfinder::{
    cli::{Cli, Commands},
    config::Config,
    finder::{render_text, FinderController, SearchForm, StationFinderClient},
    finder_tui::{self, App},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "evfinder=info");
    }

    let cli = Cli::parse();

    let config = Config::from_env()?.with_endpoint(cli.endpoint.clone());
    config.validate()?;

    init_logging(&config, matches!(cli.command, Commands::Search { .. }));

    match cli.command {
        Commands::Search {
            lat,
            lon,
            charging_type,
        } => {
            let charging_type = Commands::parse_charging_type(&charging_type)?;
            let form = SearchForm::prefilled(Some(&lat), Some(&lon), Some(charging_type));
            let client = StationFinderClient::from_config(&config)?;

            let mut controller = FinderController::with_form(form);
            controller.submit(&client).await;

            if let Some(note) = controller.notification() {
                eprintln!("{}: {}", note.title, note.text);
                std::process::exit(1);
            }

            let results = controller.results();
            if results.is_empty() {
                println!("No stations found near {}, {}", lat, lon);
            } else {
                println!("Found {} stations:", results.len());
                println!();
                print!("{}", render_text(results));
            }
        }

        Commands::Tui {
            lat,
            lon,
            charging_type,
        } => {
            let charging_type = charging_type
                .as_deref()
                .map(Commands::parse_charging_type)
                .transpose()?;
            let form = SearchForm::prefilled(lat.as_deref(), lon.as_deref(), charging_type);
            let client = StationFinderClient::from_config(&config)?;

            info!("Launching finder TUI against {}", client.endpoint());
            finder_tui::run_tui(App::new(Arc::new(client), form)).await?;
        }
    }

    Ok(())
}

/// Log to a file always; CLI mode also logs to stderr.
///
/// The TUI owns the terminal, so it gets the file only.
fn init_logging(config: &Config, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let file_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "evfinder.log".into());

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}
