use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;

pub struct AppLogsWidget<'a> {
    pub lines: &'a [String],
    /// First line shown when not following.
    pub scroll: usize,
    pub follow: bool,
    pub theme: &'a Theme,
}

impl<'a> AppLogsWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let mode = if self.follow { "follow" } else { "paused" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_active)
            .title(format!(" App Logs ({mode}) "))
            .title_style(Style::default().fg(t.accent).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.lines.is_empty() {
            frame.render_widget(Paragraph::new("No app logs yet").style(t.text_dim), inner);
            return;
        }

        let bottom = self.lines.len().saturating_sub(inner.height as usize);
        let scroll = if self.follow { bottom } else { self.scroll.min(bottom) };
        let text = self.lines.join("\n");
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(t.fg)).scroll((scroll as u16, 0)), inner);
    }
}
