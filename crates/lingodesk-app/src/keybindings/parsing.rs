use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn normalize_key_event(key: KeyEvent) -> KeyEvent {
    // Drop kind/state so HashMap lookups only compare code + modifiers.
    let key = KeyEvent::new(key.code, key.modifiers);
    if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
        return KeyEvent::new(KeyCode::BackTab, key.modifiers - KeyModifiers::SHIFT);
    }
    if key.code == KeyCode::BackTab && key.modifiers.contains(KeyModifiers::SHIFT) {
        return KeyEvent::new(KeyCode::BackTab, key.modifiers - KeyModifiers::SHIFT);
    }
    if let KeyCode::Char(c) = key.code {
        if key.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() {
            return KeyEvent::new(KeyCode::Char(c.to_ascii_lowercase()), key.modifiers - KeyModifiers::SHIFT);
        }
        if c.is_ascii_lowercase() && key.modifiers.contains(KeyModifiers::SHIFT) {
            return KeyEvent::new(KeyCode::Char(c.to_ascii_uppercase()), key.modifiers);
        }
        if c.is_ascii_uppercase() && !key.modifiers.contains(KeyModifiers::SHIFT) {
            return KeyEvent::new(key.code, key.modifiers | KeyModifiers::SHIFT);
        }
        // Punctuation already encodes shift ('?' vs '/'); terminals disagree on reporting it.
        if !c.is_ascii_alphabetic() && key.modifiers.contains(KeyModifiers::SHIFT) {
            return KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT);
        }
    }
    key
}

pub(super) fn format_key_display(key_str: &str) -> String {
    if key_str.trim() == "+" {
        return "+".into();
    }
    key_str
        .split('+')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// The character a key types into a text field, if any.
pub(super) fn typed_char(key: KeyEvent) -> Option<char> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

pub fn parse_key_string(s: &str) -> Option<KeyEvent> {
    let trimmed = s.trim();
    if trimmed == "+" {
        return Some(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }
    let parts: Vec<&str> = trimmed.split('+').collect();
    let (key_part_raw, modifier_parts) = parts.split_last()?;

    let mut modifiers = KeyModifiers::NONE;
    for modifier in modifier_parts {
        match modifier.to_ascii_lowercase().as_str() {
            "alt" => modifiers |= KeyModifiers::ALT,
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let key_lower = key_part_raw.to_ascii_lowercase();
    let code = match key_lower.as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ if key_part_raw.chars().count() == 1 => {
            let ch = key_part_raw.chars().next()?;
            KeyCode::Char(ch)
        }
        s if s.starts_with('f') => {
            let n: u8 = s[1..].parse().ok()?;
            KeyCode::F(n)
        }
        _ => return None,
    };

    Some(normalize_key_event(KeyEvent::new(code, modifiers)))
}
