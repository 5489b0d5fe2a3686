//! Keybindings: command names mapped to key strings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Command name -> key strings (`"esc"`, `"ctrl+s"`, `"shift+tab"`)
///
/// Serializes as a plain JSON object, e.g. `{"quit": ["esc", "ctrl+c"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybindings {
    bindings: BTreeMap<String, Vec<String>>,
}

impl Keybindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a command to a list of keys, replacing any previous binding
    pub fn add(&mut self, command: impl Into<String>, keys: Vec<String>) {
        self.bindings.insert(command.into(), keys);
    }

    /// Builder form of [`Keybindings::add`]
    pub fn with(mut self, command: impl Into<String>, keys: &[&str]) -> Self {
        self.add(command, keys.iter().map(|k| k.to_string()).collect());
        self
    }

    /// Find the command bound to a key event
    ///
    /// Character keys compare case-insensitively. Modifiers must match exactly.
    pub fn get_command(&self, key: KeyEvent) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, keys)| {
                keys.iter()
                    .filter_map(|k| parse_key_string(k))
                    .any(|parsed| keys_match(&parsed, &key))
            })
            .map(|(command, _)| command.as_str())
    }

    /// The first key bound to a command
    pub fn get_first_keybinding(&self, command: &str) -> Option<&str> {
        self.bindings
            .get(command)
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// The first key string that does not parse, with its command
    pub fn find_invalid(&self) -> Option<(&str, &str)> {
        self.bindings.iter().find_map(|(command, keys)| {
            keys.iter()
                .find(|k| parse_key_string(k).is_none())
                .map(|k| (command.as_str(), k.as_str()))
        })
    }

    /// Merge user config onto defaults - user entries replace whole commands
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.bindings.extend(user.bindings);
        defaults
    }
}

fn keys_match(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    let codes_match = match (parsed.code, key.code) {
        (KeyCode::Char(c1), KeyCode::Char(c2)) => c1.to_lowercase().eq(c2.to_lowercase()),
        (a, b) => a == b,
    };
    codes_match && parsed.modifiers == key.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();

    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" alone (or as the last part after a modifier) is the plus key
    let (prefix, key_part) = match key_str.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None if key_str == "+" => ("", "+"),
        None => match key_str.rsplit_once('+') {
            Some((prefix, key)) => (prefix, key),
            None => ("", key_str.as_str()),
        },
    };

    let mut modifiers = KeyModifiers::empty();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display (e.g., "ctrl+p" -> "^P", "q" -> "q", "tab" -> "Tab")
pub fn format_key_for_display(key_str: &str) -> String {
    let key_str = key_str.trim().to_lowercase();

    if key_str == "shift+tab" || key_str == "backtab" {
        return "Shift+Tab".to_string();
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let key_part = parts.last().copied().unwrap_or(key_str.as_str());

    let mut prefix = String::new();
    for part in &parts[..parts.len().saturating_sub(1)] {
        match part.trim() {
            "ctrl" | "control" => prefix.push('^'),
            "shift" => prefix.push_str("Shift+"),
            "alt" => prefix.push_str("Alt+"),
            _ => {}
        }
    }

    let key_display = match key_part {
        "esc" | "escape" => "Esc".to_string(),
        "enter" | "return" => "Enter".to_string(),
        "tab" => "Tab".to_string(),
        "backspace" => "Backspace".to_string(),
        "up" => "Up".to_string(),
        "down" => "Down".to_string(),
        "left" => "Left".to_string(),
        "right" => "Right".to_string(),
        "home" => "Home".to_string(),
        "end" => "End".to_string(),
        "pageup" => "PgUp".to_string(),
        "pagedown" => "PgDn".to_string(),
        "delete" => "Del".to_string(),
        "insert" => "Ins".to_string(),
        "space" => "Space".to_string(),
        f if f.len() > 1 && f.starts_with('f') && f[1..].parse::<u8>().is_ok() => f.to_uppercase(),
        // Ctrl combos read better upper-cased: ^S
        c if prefix.ends_with('^') => c.to_uppercase(),
        c => c.to_string(),
    };

    format!("{}{}", prefix, key_display)
}
