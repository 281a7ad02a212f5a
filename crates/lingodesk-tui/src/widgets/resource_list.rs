use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table};

use crate::theme::Theme;

pub struct ResourceListWidget<'a> {
    pub title: &'a str,
    pub headers: &'a [String],
    /// Rows left after filtering; `page_len` is the size of the unfiltered page.
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
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> ResourceListWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let border = if self.focused { t.border_active } else { t.border };
        let loading = if self.loading { " (loading…)" } else { "" };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {}{loading} ", self.title))
            .title_style(Style::default().fg(t.accent).bold())
            .title_bottom(Line::from(self.footer()).right_aligned().style(t.text_dim));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut content = inner;

        if let Some(filter) = self.filter {
            let filter_area = Rect { height: 1, ..content };
            content = Rect { y: content.y + 1, height: content.height.saturating_sub(1), ..content };
            let mut spans = vec![Span::styled("Filter (this page): ", t.text_dim), Span::styled(filter, Style::default().fg(t.accent))];
            if self.filter_editing {
                spans.push(Span::styled("_", Style::default().fg(t.accent)));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), filter_area);
        }

        if let Some(err) = self.error {
            let err_area = Rect { y: content.y + content.height.saturating_sub(1), height: 1.min(content.height), ..content };
            content = Rect { height: content.height.saturating_sub(1), ..content };
            let note = if self.page_len > 0 { " (showing last loaded page)" } else { "" };
            frame.render_widget(Paragraph::new(format!("Error: {err}{note}")).style(t.error), err_area);
        }

        if self.rows.is_empty() {
            let msg = if self.loading && self.page_len == 0 {
                "Loading..."
            } else if self.page_len > 0 {
                "No matches on this page"
            } else if self.error.is_some() {
                ""
            } else {
                "No resources found"
            };
            frame.render_widget(Paragraph::new(msg).style(t.text_dim), content);
            return;
        }

        let header = Row::new(self.headers.iter().map(|h| Cell::from(h.as_str()).style(t.header.bold()))).height(1);
        let rows = self.rows.iter().map(|row| Row::new(row.iter().map(|v| Cell::from(v.as_str()))));
        let widths: Vec<Constraint> =
            (0..self.headers.len()).map(|i| if i == 0 { Constraint::Length(6) } else { Constraint::Fill(1) }).collect();

        let table = Table::new(rows, widths).header(header).row_highlight_style(t.selection).highlight_symbol("▶ ");
        let mut state = ratatui::widgets::TableState::default().with_selected(self.selected);
        frame.render_stateful_widget(table, content, &mut state);

        if self.rows.len() > content.height.saturating_sub(1) as usize {
            let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(self.selected.unwrap_or(0));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight).style(t.border);
            frame.render_stateful_widget(scrollbar, content.inner(Margin { vertical: 1, horizontal: 0 }), &mut scrollbar_state);
        }
    }

    fn footer(&self) -> String {
        let mut parts = Vec::new();
        if self.filter.is_some_and(|f| !f.is_empty()) {
            parts.push(format!("{}/{} shown", self.rows.len(), self.page_len));
        }
        parts.push(format!("page {}/{}", self.page, self.total_pages.max(1)));
        if let Some(total) = self.total_items {
            parts.push(format!("{total} total"));
        }
        format!(" {} ", parts.join(" · "))
    }
}
