//! CLI command implementations

use tokio::runtime::Runtime;
use tracing::info;

use crate::client::{render, LightsaberClient};
use crate::config::ServiceConfig;
use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability::{init_logging, Event};
use crate::repository::LightsaberRepository;
use crate::rest_api::AppState;

use super::args::{list_filters, Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command on a fresh tokio runtime
pub fn run_command(cmd: Command) -> CliResult<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(dispatch(cmd))
}

async fn dispatch(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(args).await,

        Command::List {
            server,
            color,
            creator,
            active,
        } => {
            let client = LightsaberClient::new(server.server);
            let records = client
                .fetch_all(&list_filters(color, creator, active))
                .await?;
            println!("{}", render::render_list(&records));
            Ok(())
        }

        Command::Show { server, id } => {
            let record = LightsaberClient::new(server.server).fetch(&id).await?;
            println!("{}", render::render_detail(&record));
            Ok(())
        }

        Command::Create { server, fields } => {
            let record = LightsaberClient::new(server.server)
                .create(&fields.into_new())
                .await?;
            println!("Created {}\n", record.id);
            println!("{}", render::render_detail(&record));
            Ok(())
        }

        Command::Edit { server, id, fields } => {
            let record = LightsaberClient::new(server.server)
                .update(&id, &fields.into_patch())
                .await?;
            println!("{}", render::render_detail(&record));
            Ok(())
        }

        Command::Replace { server, id, fields } => {
            let record = LightsaberClient::new(server.server)
                .replace(&id, &fields.into_new())
                .await?;
            println!("{}", render::render_detail(&record));
            Ok(())
        }

        Command::Toggle { server, id } => {
            let record = LightsaberClient::new(server.server)
                .toggle_active(&id)
                .await?;
            println!(
                "{} {} is now {}",
                render::status_glyph(record.is_active),
                record.name,
                render::status_label(record.is_active).to_lowercase()
            );
            Ok(())
        }

        Command::Delete { server, id } => {
            LightsaberClient::new(server.server).delete(&id).await?;
            println!("Deleted {}", id);
            Ok(())
        }
    }
}

/// Load config, open the store, serve until Ctrl-C
pub async fn serve(args: ServeArgs) -> CliResult<()> {
    let config = ServiceConfig::load(args.config.as_deref(), args.overrides())?;

    init_logging(&config.logging.level, config.logging.format);
    info!(event = %Event::BootStart, version = env!("CARGO_PKG_VERSION"), "starting lightsaber server");
    info!(
        event = %Event::ConfigLoaded,
        addr = %config.http.socket_addr(),
        backend = ?config.storage.backend,
        "configuration loaded"
    );

    let store = config.storage.open_store()?;
    info!(
        event = %Event::StoreOpened,
        backend = store.backend_name(),
        data_dir = %config.storage.data_dir.display(),
        "document store opened"
    );

    let state = AppState::new(LightsaberRepository::new(store));
    HttpServer::new(config.http.clone(), state)
        .start(shutdown_signal())
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ServerArgs;
    use crate::config::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_serve_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lightsaber.json");
        fs::write(&path, r#"{"logging": {"format": "xml"}}"#).unwrap();

        let args = ServeArgs {
            config: Some(path),
            port: None,
            host: None,
            log_level: None,
            data_dir: None,
        };

        let err = serve(args).await.unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Parse(_))));
        assert_eq!(err.code(), "LIGHTSABER_CLI_CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_client_command_reports_unreachable_server() {
        let cmd = Command::Show {
            server: ServerArgs {
                server: "http://127.0.0.1:1/api".to_string(),
            },
            id: "3f1c2a8e-5b7d-4c9a-8e2f-1a2b3c4d5e6f".to_string(),
        };

        let err = dispatch(cmd).await.unwrap_err();
        assert!(matches!(err, CliError::Client(_)));
    }
}
