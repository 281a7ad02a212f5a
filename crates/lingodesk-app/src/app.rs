use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use lingodesk_config::AppConfig;
use lingodesk_core::{PendingDelete, ResourceGateway, ResourceKind, ResourceListController};
use lingodesk_tui::theme::Theme;
use lingodesk_tui::widgets::toast::ToastMessage;

use crate::event::{AppEvent, EventHandler};
use crate::keybindings::KeybindingDispatcher;
use crate::panes::{AppLogsPane, ResourceListPane};

mod actions;
mod input;
mod render;
mod requests;

#[derive(Debug, Clone)]
pub enum PendingAction {
    Delete { tab: usize, pending: PendingDelete },
}

pub struct PendingConfirmation {
    pub message: String,
    pub action: PendingAction,
}

impl PendingConfirmation {
    pub fn delete(tab: usize, pending: PendingDelete) -> Self {
        Self { message: pending.message().to_string(), action: PendingAction::Delete { tab, pending } }
    }
}

/// What the status bar reports about the backend.
pub struct ServerInfo {
    pub base_url: String,
    pub authenticated: bool,
}

pub struct App {
    running: bool,
    tick_rate: Duration,
    dispatcher: KeybindingDispatcher,
    tabs: Vec<ResourceListPane>,
    active_tab: usize,
    filter_input_buffer: String,
    pending_confirmation: Option<PendingConfirmation>,
    toasts: Vec<ToastMessage>,
    app_logs: AppLogsPane,
    server: ServerInfo,
    app_tx: mpsc::UnboundedSender<AppEvent>,
    theme: Theme,
}

impl App {
    /// One tab per gateway, in the order given.
    pub fn new(
        config: &AppConfig,
        gateways: Vec<Arc<dyn ResourceGateway>>,
        dispatcher: KeybindingDispatcher,
        theme: Theme,
        server: ServerInfo,
    ) -> anyhow::Result<Self> {
        if gateways.is_empty() {
            anyhow::bail!("no resource kinds to show");
        }

        let tabs: Vec<ResourceListPane> = gateways
            .into_iter()
            .map(|gateway| {
                let controller =
                    ResourceListController::new(gateway, config.api.page_size).with_sort(config.api.sort.clone());
                ResourceListPane::new(controller)
            })
            .collect();

        let active_tab = match config.general.default_view.parse::<ResourceKind>() {
            Ok(kind) => tabs.iter().position(|t| t.kind() == kind).unwrap_or(0),
            Err(e) => {
                tracing::warn!("general.default_view: {e}");
                0
            }
        };

        let (tx, _rx) = mpsc::unbounded_channel();

        Ok(Self {
            running: true,
            tick_rate: Duration::from_millis(config.tick_rate_ms()),
            dispatcher,
            tabs,
            active_tab,
            filter_input_buffer: String::new(),
            pending_confirmation: None,
            toasts: Vec::new(),
            app_logs: AppLogsPane::new(),
            server,
            app_tx: tx,
            theme,
        })
    }

    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> anyhow::Result<()> {
        let mut events = EventHandler::new(self.tick_rate);
        self.app_tx = events.app_tx();

        tracing::info!(server = self.server.base_url.as_str(), tabs = self.tabs.len(), "console started");
        self.refresh_tab(self.active_tab);

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;

            let first = events.next().await?;
            self.handle_event(first);

            for event in events.drain_pending() {
                if !self.running {
                    break;
                }
                self.handle_event(event);
            }
        }

        Ok(())
    }

    fn active(&self) -> &ResourceListPane {
        &self.tabs[self.active_tab]
    }

    fn active_mut(&mut self) -> &mut ResourceListPane {
        &mut self.tabs[self.active_tab]
    }
}

#[cfg(test)]
mod tests;
