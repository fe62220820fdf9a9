use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub toggle_favorite: String,
    pub undo: String,
    pub dismiss: String,
    pub switch_view: String,
    pub cursor_up: String,
    pub cursor_down: String,
    pub search: String,
    pub next_category: String,
    pub clear_all: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_favorite: "f".to_string(),
            undo: "u".to_string(),
            dismiss: "esc".to_string(),
            switch_view: "tab".to_string(),
            cursor_up: "up".to_string(),
            cursor_down: "down".to_string(),
            search: "/".to_string(),
            next_category: "c".to_string(),
            clear_all: "ctrl-d".to_string(),
        }
    }
}

impl Keymap {
    /// Whether `key` is the key described by `binding` (e.g. `"ctrl-d"`, `"tab"`, `"f"`)
    pub fn matches(binding: &str, key: &KeyEvent) -> bool {
        let Some((code, modifiers)) = parse_binding(binding) else {
            return false;
        };
        // Shift is implied by the character itself
        let pressed = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        code == key.code && modifiers == pressed
    }
}

fn parse_binding(binding: &str) -> Option<(KeyCode, KeyModifiers)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = binding.trim();
    loop {
        if let Some(stripped) = rest.strip_prefix("ctrl-") {
            modifiers |= KeyModifiers::CONTROL;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("alt-") {
            modifiers |= KeyModifiers::ALT;
            rest = stripped;
        } else {
            break;
        }
    }

    let code = match rest {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some((code, modifiers))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// How long the favorites toast stays on screen
    pub toast_duration_ms: u64,
    pub tick_rate_ms: u64,
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            tick_rate_ms: 250,
            keymap: Keymap::default(),
        }
    }
}

/// Load the config at `path`, writing the defaults there first if it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
