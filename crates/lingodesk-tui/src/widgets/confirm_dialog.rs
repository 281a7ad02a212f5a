use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;

pub struct ConfirmDialogWidget<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ConfirmDialogWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let lines: Vec<&str> = self.message.lines().collect();
        let max_line_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = (max_line_width as u16 + 6).max(40).min(area.width.saturating_sub(4));
        let height = (lines.len() as u16 + 6).min(area.height.saturating_sub(2));

        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(t.error.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(t.error)
            .style(t.overlay);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let msg = Paragraph::new(self.message)
            .style(Style::default().fg(t.fg))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, chunks[0]);

        let status_fg = t.status_bar.fg.unwrap_or(Color::Reset);
        let buttons = Paragraph::new(Line::from(vec![
            Span::styled("[y]", t.success.add_modifier(Modifier::BOLD)),
            Span::styled(" Delete  ", Style::default().fg(status_fg)),
            Span::styled("[n/Esc]", t.error.add_modifier(Modifier::BOLD)),
            Span::styled(" Cancel", Style::default().fg(status_fg)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(buttons, chunks[2]);
    }
}
