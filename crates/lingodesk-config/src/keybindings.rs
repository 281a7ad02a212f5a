use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub global: IndexMap<String, String>,
    #[serde(default)]
    pub navigation: IndexMap<String, String>,
    #[serde(default)]
    pub browse: IndexMap<String, String>,
    #[serde(default)]
    pub mutate: IndexMap<String, String>,
}

impl KeybindingsConfig {
    fn group_entries(&self) -> [(&str, &IndexMap<String, String>); 4] {
        [("global", &self.global), ("mutate", &self.mutate), ("browse", &self.browse), ("navigation", &self.navigation)]
    }

    pub(crate) fn merge(&mut self, user: KeybindingsConfig) {
        for (k, v) in user.global {
            self.global.insert(k, v);
        }
        for (k, v) in user.navigation {
            self.navigation.insert(k, v);
        }
        for (k, v) in user.browse {
            self.browse.insert(k, v);
        }
        for (k, v) in user.mutate {
            self.mutate.insert(k, v);
        }
    }
}

pub fn validate_keybindings(config: &KeybindingsConfig) -> Vec<(String, String, String)> {
    let mut errors = Vec::new();
    for (group, map) in config.group_entries() {
        for (name, key_str) in map {
            if let Err(e) = validate_key_string(key_str) {
                errors.push((group.to_string(), name.clone(), e));
            }
        }
    }
    errors
}

pub fn check_collisions(config: &KeybindingsConfig) -> Vec<(String, String, String)> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut collisions = Vec::new();
    for (group, map) in config.group_entries() {
        for key_str in map.values() {
            let normalized = key_str.trim().to_ascii_lowercase();
            if let Some(prev_group) = seen.get(&normalized) {
                collisions.push((key_str.clone(), prev_group.clone(), group.to_string()));
            } else {
                seen.insert(normalized, group.to_string());
            }
        }
    }
    collisions
}

fn validate_key_string(s: &str) -> Result<(), String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty key string".to_string());
    }
    if trimmed == "+" {
        return Ok(());
    }
    let parts: Vec<&str> = trimmed.split('+').collect();
    let Some((key, modifiers)) = parts.split_last() else {
        return Err("empty key string".to_string());
    };
    for modifier in modifiers {
        match modifier.to_ascii_lowercase().as_str() {
            "alt" | "ctrl" | "shift" => {}
            other => return Err(format!("unknown modifier: {other}")),
        }
    }
    validate_key_part(key)
}

fn validate_key_part(s: &str) -> Result<(), String> {
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "tab" | "enter" | "esc" | "backspace" | "delete" | "up" | "down" | "left" | "right" | "home" | "end"
        | "pageup" | "pagedown" | "space" => Ok(()),
        _ if s.chars().count() == 1 => Ok(()),
        f if f.starts_with('f') => f[1..].parse::<u8>().map(|_| ()).map_err(|_| format!("invalid function key: {s}")),
        _ => Err(format!("unrecognized key: {s}")),
    }
}
