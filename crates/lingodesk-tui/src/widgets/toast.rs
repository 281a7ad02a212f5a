use std::time::{Duration, Instant};

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct ToastMessage {
    pub text: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl ToastMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, ToastLevel::Success, Duration::from_secs(3))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, ToastLevel::Error, Duration::from_secs(5))
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, ToastLevel::Info, Duration::from_secs(3))
    }

    fn new(text: impl Into<String>, level: ToastLevel, ttl: Duration) -> Self {
        Self { text: text.into(), level, created_at: Instant::now(), ttl }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

pub struct ToastWidget<'a> {
    pub toasts: &'a [ToastMessage],
    pub theme: &'a Theme,
}

impl<'a> ToastWidget<'a> {
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let t = self.theme;
        let max_visible = 3;
        let mut y_offset = area.y + area.height;

        for toast in self.toasts.iter().rev().take(max_visible) {
            let text_width = toast.text.chars().count() as u16 + 8;
            let width = text_width.max(20).min(area.width.saturating_sub(2));
            let height = 3_u16;

            y_offset = y_offset.saturating_sub(height);
            if y_offset < area.y {
                break;
            }
            let toast_area = Rect { x: area.x + area.width.saturating_sub(width + 1), y: y_offset, width, height };

            let (border, prefix) = match toast.level {
                ToastLevel::Success => (t.success, "ok "),
                ToastLevel::Error => (t.error, "err "),
                ToastLevel::Info => (Style::default().fg(t.accent), ""),
            };

            frame.render_widget(Clear, toast_area);
            let block = Block::default().borders(Borders::ALL).border_style(border).style(t.overlay);
            let inner = block.inner(toast_area);
            frame.render_widget(block, toast_area);

            let text = Paragraph::new(format!("{prefix}{}", toast.text)).style(Style::default().fg(t.fg));
            frame.render_widget(text, inner);
        }
    }
}
