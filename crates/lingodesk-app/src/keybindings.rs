use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use indexmap::IndexMap;

use lingodesk_config::KeybindingsConfig;

use crate::command::Command;

mod commands;
mod parsing;

pub use parsing::parse_key_string;

use commands::{
    browse_command_description, browse_command_from_name, global_command_description, global_command_from_name,
    mutate_command_description, mutate_command_from_name, navigation_command_description, navigation_command_from_name,
};
use parsing::{format_key_display, normalize_key_event, typed_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    FilterInput,
    ConfirmDialog,
    EditForm,
    AppLogs,
}

impl InputMode {
    pub fn name(self) -> &'static str {
        match self {
            InputMode::Normal => "normal",
            InputMode::FilterInput => "filter",
            InputMode::ConfirmDialog => "confirm",
            InputMode::EditForm => "edit",
            InputMode::AppLogs => "logs",
        }
    }
}

/// Shown in the status bar for the main list, in this order.
const NORMAL_HINTS: &[&str] = &["edit", "create", "delete", "filter", "prev_page", "next_page", "open", "app_logs", "quit"];

type Reverse = Vec<(String, String, String)>;

pub struct KeybindingDispatcher {
    mode: InputMode,
    global_bindings: HashMap<KeyEvent, Command>,
    mutate_bindings: HashMap<KeyEvent, Command>,
    browse_bindings: HashMap<KeyEvent, Command>,
    navigation_bindings: HashMap<KeyEvent, Command>,
    reverse_global: Reverse,
    reverse_mutate: Reverse,
    reverse_browse: Reverse,
    reverse_navigation: Reverse,
}

fn bind_group(
    group: &IndexMap<String, String>,
    from_name: fn(&str) -> Option<Command>,
    describe: fn(&str) -> String,
) -> (HashMap<KeyEvent, Command>, Reverse) {
    let mut bindings = HashMap::new();
    let mut reverse = Vec::new();
    for (name, key_str) in group {
        let Some(cmd) = from_name(name) else {
            tracing::warn!(binding = name.as_str(), "unknown keybinding name, ignored");
            continue;
        };
        let Some(key) = parse_key_string(key_str) else {
            tracing::warn!(binding = name.as_str(), key = key_str.as_str(), "unparseable key, ignored");
            continue;
        };
        bindings.insert(key, cmd);
        reverse.push((name.clone(), key_str.clone(), describe(name)));
    }
    (bindings, reverse)
}

impl KeybindingDispatcher {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let (global_bindings, reverse_global) =
            bind_group(&config.global, global_command_from_name, global_command_description);
        let (mutate_bindings, reverse_mutate) =
            bind_group(&config.mutate, mutate_command_from_name, mutate_command_description);
        let (browse_bindings, reverse_browse) =
            bind_group(&config.browse, browse_command_from_name, browse_command_description);
        let (navigation_bindings, reverse_navigation) =
            bind_group(&config.navigation, navigation_command_from_name, navigation_command_description);

        Self {
            mode: InputMode::Normal,
            global_bindings,
            mutate_bindings,
            browse_bindings,
            navigation_bindings,
            reverse_global,
            reverse_mutate,
            reverse_browse,
            reverse_navigation,
        }
    }

    pub fn dispatch(&self, key: KeyEvent) -> Option<Command> {
        let key = normalize_key_event(key);

        match self.mode {
            InputMode::EditForm => match key.code {
                KeyCode::Esc => Some(Command::FormCancel),
                KeyCode::Enter => Some(Command::FormSave),
                KeyCode::Tab | KeyCode::Down => Some(Command::FormNextField),
                KeyCode::BackTab | KeyCode::Up => Some(Command::FormPrevField),
                KeyCode::Backspace => Some(Command::FormBackspace),
                _ => typed_char(key).map(Command::FormInput),
            },
            InputMode::FilterInput => match key.code {
                KeyCode::Esc => Some(Command::FilterCancel),
                KeyCode::Enter => Some(Command::ExitMode),
                KeyCode::Backspace => Some(Command::FilterBackspace),
                _ => typed_char(key).map(Command::FilterInput),
            },
            InputMode::ConfirmDialog => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(Command::ConfirmAction),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Command::DenyAction),
                _ => None,
            },
            InputMode::AppLogs => {
                if let Some(cmd) = self.global_bindings.get(&key) {
                    return Some(cmd.clone());
                }
                match key.code {
                    KeyCode::Esc => Some(Command::ToggleAppLogs),
                    KeyCode::Char('f') => Some(Command::ToggleFollow),
                    _ => self.navigation_bindings.get(&key).cloned(),
                }
            }
            InputMode::Normal => self
                .global_bindings
                .get(&key)
                .or_else(|| self.mutate_bindings.get(&key))
                .or_else(|| self.browse_bindings.get(&key))
                .or_else(|| self.navigation_bindings.get(&key))
                .cloned()
                .or_else(|| match key.code {
                    KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|n| Command::GoToTab(n as usize)),
                    _ => None,
                }),
        }
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn key_for(&self, name: &str) -> Option<String> {
        self.reverse_global
            .iter()
            .chain(&self.reverse_mutate)
            .chain(&self.reverse_browse)
            .chain(&self.reverse_navigation)
            .find(|(n, _, _)| n == name)
            .map(|(_, key_str, _)| format_key_display(key_str))
    }

    fn description_for(&self, name: &str) -> Option<&str> {
        self.reverse_global
            .iter()
            .chain(&self.reverse_mutate)
            .chain(&self.reverse_browse)
            .chain(&self.reverse_navigation)
            .find(|(n, _, _)| n == name)
            .map(|(_, _, desc)| desc.as_str())
    }

    /// Key hints for the status bar in the current mode.
    pub fn hints(&self) -> Vec<(String, String)> {
        let fixed = |pairs: &[(&str, &str)]| -> Vec<(String, String)> {
            pairs.iter().map(|(k, d)| (k.to_string(), d.to_string())).collect()
        };
        match self.mode {
            InputMode::Normal => NORMAL_HINTS
                .iter()
                .filter_map(|name| Some((self.key_for(name)?, self.description_for(name)?.to_string())))
                .collect(),
            InputMode::FilterInput => fixed(&[("Enter", "Apply"), ("Esc", "Clear")]),
            InputMode::ConfirmDialog => fixed(&[("y", "Confirm"), ("n/Esc", "Cancel")]),
            InputMode::EditForm => fixed(&[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]),
            InputMode::AppLogs => fixed(&[("j/k", "Scroll"), ("f", "Follow"), ("Esc", "Close")]),
        }
    }
}
