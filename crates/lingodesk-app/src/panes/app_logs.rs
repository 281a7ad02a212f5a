use crate::app_log;

const VISIBLE_HISTORY: usize = 1500;

pub struct AppLogsPane {
    pub lines: Vec<String>,
    pub scroll: usize,
    pub follow: bool,
}

impl AppLogsPane {
    pub fn new() -> Self {
        Self { lines: Vec::new(), scroll: 0, follow: true }
    }

    pub fn poll(&mut self) {
        self.lines = app_log::recent_lines(VISIBLE_HISTORY);
        if self.follow {
            self.scroll = self.max_scroll();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    pub fn scroll_down(&mut self) {
        self.follow = false;
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn toggle_follow(&mut self) {
        self.follow = !self.follow;
        if self.follow {
            self.scroll = self.max_scroll();
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane_with(lines: usize) -> AppLogsPane {
        AppLogsPane { lines: (0..lines).map(|i| format!("line {i}")).collect(), scroll: 0, follow: true }
    }

    #[test]
    fn scrolling_pauses_follow() {
        let mut pane = pane_with(5);
        pane.scroll_down();
        assert!(!pane.follow);
        assert_eq!(pane.scroll, 1);
        pane.scroll_up();
        pane.scroll_up();
        assert_eq!(pane.scroll, 0);
    }

    #[test]
    fn scroll_stops_at_last_line() {
        let mut pane = pane_with(2);
        pane.scroll_down();
        pane.scroll_down();
        pane.scroll_down();
        assert_eq!(pane.scroll, 1);
    }

    #[test]
    fn follow_jumps_to_bottom() {
        let mut pane = pane_with(4);
        pane.scroll_down();
        pane.toggle_follow();
        assert!(pane.follow);
        assert_eq!(pane.scroll, 3);
    }
}
