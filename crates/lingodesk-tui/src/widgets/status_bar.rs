use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

pub struct StatusBarWidget<'a> {
    pub mode: &'a str,
    pub hints: &'a [(String, String)],
    pub server: Option<&'a str>,
    pub authenticated: bool,
    pub theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let status_bg = t.status_bar.bg.unwrap_or(Color::Reset);
        let status_fg = t.status_bar.fg.unwrap_or(Color::Reset);
        let header_bg = t.header.bg.unwrap_or(Color::Reset);
        let sep = Style::default().fg(t.border.fg.unwrap_or(Color::Reset)).bg(status_bg);

        let mode_style = if self.mode.eq_ignore_ascii_case("normal") {
            Style::default().fg(header_bg).bg(t.accent).add_modifier(Modifier::BOLD)
        } else {
            t.input.add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![Span::styled(format!(" {} ", self.mode.to_uppercase()), mode_style)];

        for (key, desc) in self.hints {
            spans.push(Span::styled(" │ ", sep));
            spans.push(Span::styled(format!("<{key}>"), Style::default().fg(t.accent).bg(status_bg)));
            spans.push(Span::styled(format!(" {desc}"), Style::default().fg(status_fg).bg(status_bg)));
        }

        let auth = if self.authenticated { "token" } else { "anonymous" };
        let right_text = match self.server {
            Some(server) => format!("{server} · {auth} "),
            None => "No server ".to_string(),
        };
        let right_width = right_text.chars().count() as u16;
        let left_used: u16 = spans.iter().map(|s| s.width() as u16).sum();
        let fill = area.width.saturating_sub(left_used + right_width);
        if fill > 0 {
            spans.push(Span::styled(" ".repeat(fill as usize), Style::default().bg(status_bg)));
        }
        spans.push(Span::styled(right_text, Style::default().fg(status_fg).bg(status_bg).add_modifier(Modifier::DIM)));

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(status_bg));
        frame.render_widget(bar, area);
    }
}
