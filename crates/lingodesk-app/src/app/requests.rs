use lingodesk_core::{GatewayError, Page, PendingDelete, Record, RefreshOutcome, RefreshTicket, SaveTicket};
use lingodesk_tui::widgets::toast::ToastMessage;

use crate::command::InputMode;
use crate::event::AppEvent;

use super::App;

impl App {
    /// Reloads the current page of `tab`.
    pub(super) fn refresh_tab(&mut self, tab: usize) {
        let Some(pane) = self.tabs.get_mut(tab) else { return };
        let page = pane.controller().page();
        let ticket = pane.controller_mut().begin_refresh(page);
        self.spawn_refresh(tab, ticket);
    }

    pub(super) fn spawn_refresh(&self, tab: usize, ticket: RefreshTicket) {
        let gateway = self.tabs[tab].controller().gateway();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = ticket.run(gateway.as_ref()).await;
            let _ = tx.send(AppEvent::ListLoaded { tab, ticket, result });
        });
    }

    pub(super) fn spawn_save(&self, tab: usize, ticket: SaveTicket) {
        let gateway = self.tabs[tab].controller().gateway();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = ticket.run(gateway.as_ref()).await;
            let _ = tx.send(AppEvent::Saved { tab, ticket, result });
        });
    }

    pub(super) fn spawn_delete(&self, tab: usize, pending: PendingDelete) {
        let gateway = self.tabs[tab].controller().gateway();
        let tx = self.app_tx.clone();
        tokio::spawn(async move {
            let result = pending.run(gateway.as_ref()).await;
            let _ = tx.send(AppEvent::Deleted { tab, pending, result });
        });
    }

    pub(super) fn apply_list_loaded(&mut self, tab: usize, ticket: RefreshTicket, result: Result<Page, GatewayError>) {
        let Some(pane) = self.tabs.get_mut(tab) else { return };
        match pane.controller_mut().finish_refresh(&ticket, result) {
            RefreshOutcome::Applied => pane.clamp_selection(),
            RefreshOutcome::Stale => {}
            RefreshOutcome::Failed(e) => self.toasts.push(ToastMessage::error(e.user_message())),
        }
    }

    pub(super) fn apply_saved(&mut self, tab: usize, ticket: SaveTicket, result: Result<Record, GatewayError>) {
        let Some(pane) = self.tabs.get_mut(tab) else { return };
        pane.form.saving = false;
        match pane.controller_mut().finish_save(&ticket, result) {
            Ok(record) => {
                let what = pane.kind().singular();
                let label = pane.controller().label(&record);
                let text = if label.is_empty() {
                    format!("Saved {what} #{}", record.id)
                } else {
                    format!("Saved {what} \"{label}\"")
                };
                let session_closed = pane.controller().edit_target().is_none();
                if session_closed {
                    pane.reset_form();
                }
                self.toasts.push(ToastMessage::success(text));
                if session_closed && tab == self.active_tab && self.dispatcher.mode() == InputMode::EditForm {
                    self.dispatcher.set_mode(InputMode::Normal);
                }
                self.refresh_tab(tab);
            }
            Err(e) => {
                let message = e.user_message();
                pane.form.error = Some(message.clone());
                self.toasts.push(ToastMessage::error(message));
            }
        }
    }

    pub(super) fn apply_deleted(&mut self, tab: usize, pending: PendingDelete, result: Result<(), GatewayError>) {
        let Some(pane) = self.tabs.get_mut(tab) else { return };
        match pane.controller_mut().finish_delete(&pending, result) {
            Ok(()) => {
                pane.clamp_selection();
                let what = pane.kind().singular();
                self.toasts.push(ToastMessage::success(format!("Deleted {what} #{}", pending.id())));
                self.refresh_tab(tab);
            }
            Err(e) => self.toasts.push(ToastMessage::error(e.user_message())),
        }
    }
}
