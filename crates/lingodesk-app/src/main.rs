mod app;
mod app_log;
mod cli;
mod command;
mod event;
mod keybindings;
mod panes;

use std::io;
use std::sync::Arc;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use lingodesk_config::{check_collisions, validate_keybindings, AppConfig, ConfigSource};
use lingodesk_core::{ApiClient, AuthContext, HttpGateway, ResourceGateway, ResourceKind, ResourceListController};
use lingodesk_tui::theme::Theme;

use crate::app::{App, ServerInfo};
use crate::app_log::AppLogMakeWriter;
use crate::cli::{Cli, CliCommand};
use crate::keybindings::KeybindingDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.command == Some(CliCommand::InitConfig) {
        let path = match &cli.config {
            Some(path) => {
                AppConfig::init_default_at(path)?;
                path.clone()
            }
            None => AppConfig::init_default()?,
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let loaded = AppConfig::resolve(cli.config.as_deref())?;
    let mut config = loaded.config;
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    let interactive = matches!(cli.command, None | Some(CliCommand::Tui));
    init_tracing(&config, interactive);

    match &loaded.source {
        ConfigSource::File(path) => tracing::info!("config loaded from {}", path.display()),
        ConfigSource::Defaults => tracing::info!("using built-in config"),
    }
    for warning in &loaded.warnings {
        tracing::warn!("config: {warning}");
    }

    for (group, name, err) in validate_keybindings(&config.keybindings) {
        tracing::warn!("keybindings.{group}.{name}: {err}");
    }
    for (key, first, second) in check_collisions(&config.keybindings) {
        tracing::warn!("key \"{key}\" is bound in both [{first}] and [{second}]");
    }

    let auth = AuthContext::from_token(cli.token.clone().or_else(|| config.auth.resolve_token()));
    let authenticated = auth.is_authenticated();
    let client = ApiClient::with_timeout(&config.api.base_url, auth, config.api_timeout())?;
    let gateway_for = |kind: ResourceKind| -> Arc<dyn ResourceGateway> { Arc::new(HttpGateway::new(client.clone(), kind)) };

    match cli.command {
        Some(CliCommand::List { kind, page, filter, category }) => {
            let mut controller = ResourceListController::new(gateway_for(kind), config.api.page_size)
                .with_sort(config.api.sort.clone())
                .with_category(category);
            cli::list(&mut controller, page, filter.as_deref(), &mut io::stdout().lock()).await
        }
        Some(CliCommand::Delete { kind, id, yes }) => {
            let mut controller = ResourceListController::new(gateway_for(kind), config.api.page_size);
            cli::delete(&mut controller, id, yes, &mut io::stdout().lock()).await
        }
        Some(CliCommand::InitConfig) => Ok(()),
        None | Some(CliCommand::Tui) => {
            let gateways = ResourceKind::ALL.into_iter().map(gateway_for).collect();
            let server = ServerInfo { base_url: config.api.base_url.clone(), authenticated };
            let dispatcher = KeybindingDispatcher::from_config(&config.keybindings);
            let theme = Theme::from_config(&config.theme);
            let app = App::new(&config, gateways, dispatcher, theme, server)?;
            run_tui(app).await
        }
    }
}

fn init_tracing(config: &AppConfig, interactive: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if interactive {
        builder.with_ansi(false).with_target(false).with_writer(AppLogMakeWriter).init();
    } else {
        builder.with_writer(io::stderr).init();
    }
}

async fn run_tui(mut app: App) -> anyhow::Result<()> {
    install_panic_hook();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
