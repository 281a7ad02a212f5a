use lingodesk_core::ControllerState;
use lingodesk_tui::widgets::toast::ToastMessage;

use crate::command::InputMode;

use super::{App, PendingAction, PendingConfirmation};

impl App {
    pub(super) fn switch_to_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.active_tab = index;
        if self.dispatcher.mode() == InputMode::AppLogs {
            self.dispatcher.set_mode(InputMode::Normal);
        }
        // Tabs load on first visit.
        if self.active().controller().state() == ControllerState::Idle {
            self.refresh_tab(index);
        }
    }

    pub(super) fn toggle_app_logs(&mut self) {
        if self.dispatcher.mode() == InputMode::AppLogs {
            self.dispatcher.set_mode(InputMode::Normal);
        } else {
            self.app_logs.poll();
            self.dispatcher.set_mode(InputMode::AppLogs);
        }
    }

    pub(super) fn go_to_next_page(&mut self) {
        match self.active_mut().controller_mut().next_page() {
            Some(ticket) => self.spawn_refresh(self.active_tab, ticket),
            None => self.toasts.push(ToastMessage::info("Already on the last page")),
        }
    }

    pub(super) fn go_to_prev_page(&mut self) {
        match self.active_mut().controller_mut().prev_page() {
            Some(ticket) => self.spawn_refresh(self.active_tab, ticket),
            None => self.toasts.push(ToastMessage::info("Already on the first page")),
        }
    }

    pub(super) fn go_to_first_page(&mut self) {
        let ticket = self.active_mut().controller_mut().set_page(1);
        self.spawn_refresh(self.active_tab, ticket);
    }

    /// Categories drill down into their entries; everything else opens the edit form.
    pub(super) fn open_selected(&mut self) {
        let Some(target_kind) = self.active().kind().drill_down() else {
            self.start_edit();
            return;
        };
        let Some(record) = self.active().selected_record() else {
            self.toasts.push(ToastMessage::info("Nothing selected"));
            return;
        };
        let (id, label) = (record.id, self.active().controller().label(record));
        let Some(target) = self.tabs.iter().position(|t| t.kind() == target_kind) else { return };

        let pane = &mut self.tabs[target];
        pane.controller_mut().set_filter("");
        pane.set_category_label((!label.is_empty()).then_some(label));
        pane.selected = None;
        let ticket = pane.controller_mut().set_category(Some(id));
        self.spawn_refresh(target, ticket);
        self.active_tab = target;
        tracing::debug!(category = %id, "opened category");
    }

    pub(super) fn clear_category(&mut self) {
        if self.active().controller().category().is_none() {
            return;
        }
        let pane = self.active_mut();
        pane.set_category_label(None);
        pane.selected = None;
        let ticket = pane.controller_mut().set_category(None);
        self.spawn_refresh(self.active_tab, ticket);
    }

    pub(super) fn start_edit(&mut self) {
        let Some(id) = self.active().selected_record().map(|r| r.id) else {
            self.toasts.push(ToastMessage::info("Nothing selected"));
            return;
        };
        let pane = self.active_mut();
        match pane.controller_mut().start_edit(id) {
            Ok(()) => {
                pane.reset_form();
                self.dispatcher.set_mode(InputMode::EditForm);
            }
            Err(e) => self.toasts.push(ToastMessage::error(e.user_message())),
        }
    }

    pub(super) fn start_create(&mut self) {
        let pane = self.active_mut();
        pane.controller_mut().start_create();
        pane.reset_form();
        self.dispatcher.set_mode(InputMode::EditForm);
    }

    pub(super) fn save_form(&mut self) {
        let tab = self.active_tab;
        let pane = self.active_mut();
        if pane.form.saving {
            return;
        }
        match pane.controller_mut().begin_save() {
            Ok(ticket) => {
                pane.form.saving = true;
                pane.form.error = None;
                self.spawn_save(tab, ticket);
            }
            Err(e) => pane.form.error = Some(e.user_message()),
        }
    }

    pub(super) fn cancel_form(&mut self) {
        let pane = self.active_mut();
        pane.controller_mut().cancel_edit();
        pane.reset_form();
        self.dispatcher.set_mode(InputMode::Normal);
    }

    pub(super) fn request_delete(&mut self) {
        let Some(id) = self.active().selected_record().map(|r| r.id) else {
            self.toasts.push(ToastMessage::info("Nothing selected"));
            return;
        };
        let pending = self.active().controller().request_delete(id);
        self.pending_confirmation = Some(PendingConfirmation::delete(self.active_tab, pending));
        self.dispatcher.set_mode(InputMode::ConfirmDialog);
    }

    pub(super) fn confirm_pending(&mut self) {
        self.dispatcher.set_mode(InputMode::Normal);
        if let Some(confirmation) = self.pending_confirmation.take() {
            match confirmation.action {
                PendingAction::Delete { tab, pending } => self.spawn_delete(tab, pending),
            }
        }
    }

    pub(super) fn deny_pending(&mut self) {
        self.pending_confirmation = None;
        self.dispatcher.set_mode(InputMode::Normal);
    }

    pub(super) fn apply_filter_input(&mut self) {
        let text = self.filter_input_buffer.clone();
        let pane = self.active_mut();
        pane.controller_mut().set_filter(text);
        pane.clamp_selection();
    }
}
