use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

pub struct TabBarWidget<'a> {
    pub tabs: &'a [String],
    pub active: usize,
    pub theme: &'a Theme,
}

impl<'a> TabBarWidget<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let header_bg = t.header.bg.unwrap_or(Color::Reset);
        let sep = " │ ";

        let labels: Vec<String> = self.tabs.iter().enumerate().map(|(i, name)| format!("[{}] {name}", i + 1)).collect();
        let widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
        let scroll = first_visible(&widths, sep.chars().count(), area.width as usize, self.active);

        let mut spans = Vec::new();
        for (i, label) in labels.iter().enumerate().skip(scroll) {
            if i > scroll {
                spans.push(Span::styled(sep, t.border.bg(header_bg)));
            }
            let style = if i == self.active {
                Style::default().fg(t.accent).bg(header_bg).add_modifier(Modifier::BOLD)
            } else {
                t.text_dim.bg(header_bg)
            };
            spans.push(Span::styled(label.clone(), style));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(header_bg));
        frame.render_widget(bar, area);
    }
}

/// Index of the first tab to draw so that `active` stays on screen.
fn first_visible(widths: &[usize], sep_w: usize, max_w: usize, active: usize) -> usize {
    let span = |from: usize| widths[from..].iter().sum::<usize>() + sep_w * widths[from..].len().saturating_sub(1);
    let mut scroll = 0;
    while scroll < active.min(widths.len().saturating_sub(1)) && span(scroll) > max_w {
        scroll += 1;
    }
    scroll
}
