use ratatui::prelude::*;

use crate::theme::Theme;
use crate::widgets::app_logs::AppLogsWidget;
use crate::widgets::confirm_dialog::ConfirmDialogWidget;
use crate::widgets::edit_form::{EditFormWidget, FormField};
use crate::widgets::resource_list::ResourceListWidget;
use crate::widgets::status_bar::StatusBarWidget;
use crate::widgets::tab_bar::TabBarWidget;
use crate::widgets::toast::{ToastMessage, ToastWidget};

pub struct ResourceListView<'a> {
    pub title: &'a str,
    pub headers: &'a [String],
    pub rows: &'a [Vec<String>],
    pub page_len: usize,
    pub selected: Option<usize>,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub filter: Option<&'a str>,
    pub filter_editing: bool,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: Option<u64>,
}

pub struct AppLogsView<'a> {
    pub lines: &'a [String],
    pub scroll: usize,
    pub follow: bool,
}

pub enum BodyView<'a> {
    Resources(ResourceListView<'a>),
    AppLogs(AppLogsView<'a>),
}

pub struct EditFormView<'a> {
    pub title: &'a str,
    pub fields: &'a [FormField<'a>],
    pub active: usize,
    pub saving: bool,
    pub error: Option<&'a str>,
}

pub struct ConfirmDialogView<'a> {
    pub message: &'a str,
}

pub struct RenderContext<'a> {
    pub tab_names: &'a [String],
    pub active_tab: usize,
    pub body: BodyView<'a>,
    pub edit_form: Option<EditFormView<'a>>,
    pub confirm_dialog: Option<ConfirmDialogView<'a>>,
    pub toasts: &'a [ToastMessage],
    pub mode_name: &'a str,
    pub hints: &'a [(String, String)],
    pub server: Option<&'a str>,
    pub authenticated: bool,
    pub theme: &'a Theme,
}

pub fn render_root(frame: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    TabBarWidget { tabs: ctx.tab_names, active: ctx.active_tab, theme: ctx.theme }.render(frame, chunks[0]);
    render_body(frame, chunks[1], ctx);
    render_status_bar(frame, chunks[2], ctx);
}

fn render_body(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let overlay_open = ctx.edit_form.is_some() || ctx.confirm_dialog.is_some();

    match &ctx.body {
        BodyView::Resources(list) => ResourceListWidget {
            title: list.title,
            headers: list.headers,
            rows: list.rows,
            page_len: list.page_len,
            selected: list.selected,
            loading: list.loading,
            error: list.error,
            filter: list.filter,
            filter_editing: list.filter_editing,
            page: list.page,
            total_pages: list.total_pages,
            total_items: list.total_items,
            focused: !overlay_open,
            theme: ctx.theme,
        }
        .render(frame, area),
        BodyView::AppLogs(logs) => {
            AppLogsWidget { lines: logs.lines, scroll: logs.scroll, follow: logs.follow, theme: ctx.theme }.render(frame, area)
        }
    }

    if let Some(ref form) = ctx.edit_form {
        let widget = EditFormWidget {
            title: form.title,
            fields: form.fields,
            active: form.active,
            saving: form.saving,
            error: form.error,
            theme: ctx.theme,
        };
        widget.render(frame, area);
    }

    if let Some(ref cd) = ctx.confirm_dialog {
        ConfirmDialogWidget { message: cd.message, theme: ctx.theme }.render(frame, area);
    }

    if !ctx.toasts.is_empty() {
        ToastWidget { toasts: ctx.toasts, theme: ctx.theme }.render(frame, area);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let widget = StatusBarWidget {
        mode: ctx.mode_name,
        hints: ctx.hints,
        server: ctx.server,
        authenticated: ctx.authenticated,
        theme: ctx.theme,
    };
    widget.render(frame, area);
}
