use crossterm::event::{KeyEvent, KeyEventKind};
use lingodesk_tui::widgets::toast::ToastMessage;

use crate::command::{Command, InputMode};
use crate::event::AppEvent;

use super::App;

impl App {
    pub(super) fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                self.toasts.retain(|t| !t.is_expired());
                if self.dispatcher.mode() == InputMode::AppLogs {
                    self.app_logs.poll();
                }
            }
            AppEvent::Resize(_, _) => {}
            AppEvent::ListLoaded { tab, ticket, result } => self.apply_list_loaded(tab, ticket, result),
            AppEvent::Saved { tab, ticket, result } => self.apply_saved(tab, ticket, result),
            AppEvent::Deleted { tab, pending, result } => self.apply_deleted(tab, pending, result),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(cmd) = self.dispatcher.dispatch(key) {
            self.handle_command(cmd);
        }
    }

    pub(super) fn handle_command(&mut self, cmd: Command) {
        let tabs = self.tabs.len();
        match cmd {
            Command::Quit => self.running = false,
            Command::ToggleAppLogs => self.toggle_app_logs(),
            Command::ToggleFollow => self.app_logs.toggle_follow(),
            Command::NextTab => self.switch_to_tab((self.active_tab + 1) % tabs),
            Command::PrevTab => self.switch_to_tab((self.active_tab + tabs - 1) % tabs),
            Command::GoToTab(n) => {
                if n > 0 {
                    self.switch_to_tab(n - 1);
                }
            }
            Command::EnterMode(InputMode::FilterInput) => {
                self.filter_input_buffer = self.active().controller().filter().to_string();
                self.dispatcher.set_mode(InputMode::FilterInput);
            }
            Command::EnterMode(mode) => self.dispatcher.set_mode(mode),
            Command::ExitMode => self.dispatcher.set_mode(InputMode::Normal),

            Command::SelectNext if self.dispatcher.mode() == InputMode::AppLogs => self.app_logs.scroll_down(),
            Command::SelectPrev if self.dispatcher.mode() == InputMode::AppLogs => self.app_logs.scroll_up(),
            Command::SelectNext => self.active_mut().select_next(),
            Command::SelectPrev => self.active_mut().select_prev(),

            Command::NextPage => self.go_to_next_page(),
            Command::PrevPage => self.go_to_prev_page(),
            Command::FirstPage => self.go_to_first_page(),
            Command::Refresh => self.refresh_tab(self.active_tab),
            Command::Open => self.open_selected(),
            Command::ClearCategory => self.clear_category(),

            Command::Edit => self.start_edit(),
            Command::Create => self.start_create(),
            Command::Delete => self.request_delete(),
            Command::ConfirmAction => self.confirm_pending(),
            Command::DenyAction => self.deny_pending(),

            Command::FilterInput(c) => {
                self.filter_input_buffer.push(c);
                self.apply_filter_input();
            }
            Command::FilterBackspace => {
                self.filter_input_buffer.pop();
                self.apply_filter_input();
            }
            Command::FilterCancel => {
                self.filter_input_buffer.clear();
                self.apply_filter_input();
                self.dispatcher.set_mode(InputMode::Normal);
            }

            Command::FormNextField => self.active_mut().form_next_field(),
            Command::FormPrevField => self.active_mut().form_prev_field(),
            Command::FormInput(c) => {
                if let Err(e) = self.active_mut().form_input(c) {
                    self.toasts.push(ToastMessage::error(e.user_message()));
                }
            }
            Command::FormBackspace => {
                if let Err(e) = self.active_mut().form_backspace() {
                    self.toasts.push(ToastMessage::error(e.user_message()));
                }
            }
            Command::FormSave => self.save_form(),
            Command::FormCancel => self.cancel_form(),
        }
    }
}
