use ratatui::Frame;

use lingodesk_tui::layout::{
    render_root, AppLogsView, BodyView, ConfirmDialogView, EditFormView, RenderContext, ResourceListView,
};
use lingodesk_tui::widgets::edit_form::FormField;

use crate::command::InputMode;

use super::App;

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let mode = self.dispatcher.mode();
        let pane = self.active();
        let controller = pane.controller();

        let tab_names: Vec<String> = self.tabs.iter().map(|t| t.tab_name()).collect();
        let title = pane.title();
        let headers = pane.headers();
        let rows = pane.rows();
        let hints = self.dispatcher.hints();

        let filter_editing = mode == InputMode::FilterInput;
        let filter = if filter_editing {
            Some(self.filter_input_buffer.as_str())
        } else {
            Some(controller.filter()).filter(|f| !f.is_empty())
        };

        let body = if mode == InputMode::AppLogs {
            BodyView::AppLogs(AppLogsView {
                lines: &self.app_logs.lines,
                scroll: self.app_logs.scroll,
                follow: self.app_logs.follow,
            })
        } else {
            BodyView::Resources(ResourceListView {
                title: &title,
                headers: &headers,
                rows: &rows,
                page_len: controller.items().len(),
                selected: pane.selected,
                loading: controller.is_loading(),
                error: controller.last_error(),
                filter,
                filter_editing,
                page: controller.page(),
                total_pages: controller.total_pages(),
                total_items: controller.total_items(),
            })
        };

        let form_title = pane.form_title();
        let form_values = pane.form_fields();
        let fields: Vec<FormField> =
            form_values.iter().map(|(label, value)| FormField { label: label.as_str(), value: value.as_str() }).collect();
        let edit_form = (mode == InputMode::EditForm).then(|| EditFormView {
            title: &form_title,
            fields: &fields,
            active: pane.form.active,
            saving: pane.form.saving,
            error: pane.form.error.as_deref(),
        });

        let confirm_dialog = (mode == InputMode::ConfirmDialog)
            .then_some(self.pending_confirmation.as_ref())
            .flatten()
            .map(|pc| ConfirmDialogView { message: &pc.message });

        let ctx = RenderContext {
            tab_names: &tab_names,
            active_tab: self.active_tab,
            body,
            edit_form,
            confirm_dialog,
            toasts: &self.toasts,
            mode_name: mode.name(),
            hints: &hints,
            server: Some(self.server.base_url.as_str()),
            authenticated: self.server.authenticated,
            theme: &self.theme,
        };
        render_root(frame, &ctx);
    }
}
