use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

pub struct FormField<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

pub struct EditFormWidget<'a> {
    pub title: &'a str,
    pub fields: &'a [FormField<'a>],
    pub active: usize,
    pub saving: bool,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> EditFormWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let width = 72.min(area.width.saturating_sub(4));
        let height = (self.fields.len() as u16 + 6).min(area.height.saturating_sub(2));
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(t.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent))
            .style(t.overlay);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints = vec![Constraint::Length(1); self.fields.len()];
        constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)]);
        let chunks = Layout::default().direction(Direction::Vertical).constraints(constraints).split(inner);

        let label_width = self.fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
        let value_width = (inner.width as usize).saturating_sub(label_width + 4);

        for (i, field) in self.fields.iter().enumerate() {
            let active = i == self.active;
            let value = tail(field.value, value_width.saturating_sub(1));
            let mut spans = vec![
                Span::styled(format!("{:<label_width$} : ", field.label), if active { Style::default().fg(t.accent).bold() } else { t.text_dim }),
                Span::styled(value, if active { Style::default().fg(t.fg).bold() } else { Style::default().fg(t.fg) }),
            ];
            if active {
                spans.push(Span::styled("_", Style::default().fg(t.accent)));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), chunks[i]);
        }

        let n = self.fields.len();
        if let Some(err) = self.error {
            frame.render_widget(Paragraph::new(err).style(t.error), chunks[n + 1]);
        } else if self.saving {
            frame.render_widget(Paragraph::new("Saving...").style(t.warning), chunks[n + 1]);
        }

        frame.render_widget(
            Paragraph::new("Tab/Shift+Tab field │ Enter save │ Esc cancel").style(t.text_dim).alignment(Alignment::Center),
            chunks[n + 2],
        );
    }
}

/// Keeps the end of `s` visible so the cursor stays on screen while typing.
fn tail(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    let skip = len - max.saturating_sub(1);
    format!("…{}", s.chars().skip(skip).collect::<String>())
}
