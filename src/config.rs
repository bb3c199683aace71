//! Configuration and theme management for whisperterm.
//!
//! The terminal is driven by a JSON document loaded once at startup
//! (default `./config.json`). Every key is optional:
//!
//! ```json
//! {
//!   "title": "C2Whisperer Terminal",
//!   "username": "operator",
//!   "hostname": "c2whisperer",
//!   "password": "infected",
//!   "ascii": ["C2WHISPERER TERMINAL"],
//!   "aboutGreeting": "Welcome to C2Whisperer Terminal",
//!   "repoLink": "https://github.com/user/whisperterm",
//!   "projects": [["name", "description", "https://link"]],
//!   "social": {"github": "user", "email": "user@example.com"},
//!   "colors": {"error": "#ff5555", "info": "#8be9fd"}
//! }
//! ```
//!
//! A missing or unparseable file is recoverable: the session starts with the
//! built-in fallback configuration instead. The `password` value is a
//! cosmetic gate-phrase, not a credential; it ships in plaintext on purpose.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default configuration file path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[source] serde_json::Error),
}

/// A portfolio project, stored in the file as a `[name, description, link]` triple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project(pub String, pub String, pub String);

impl Project {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn description(&self) -> &str {
        &self.1
    }

    pub fn link(&self) -> &str {
        &self.2
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal window title
    pub title: Option<String>,
    /// User shown in the prompt
    pub username: Option<String>,
    /// Host shown in the prompt
    pub hostname: Option<String>,
    /// Gate-phrase. Plain string comparison, cosmetic only.
    pub password: Option<String>,
    /// ASCII-art banner, one line per entry
    pub ascii: Vec<String>,
    /// Greeting shown after unlock and by `about`
    #[serde(rename = "aboutGreeting")]
    pub about_greeting: Option<String>,
    /// Repository link shown by `about`
    #[serde(rename = "repoLink")]
    pub repo_link: Option<String>,
    /// Projects in display order
    pub projects: Vec<Project>,
    /// Platform name -> handle
    pub social: BTreeMap<String, String>,
    /// Theme color name -> css color string
    pub colors: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, recovering with the built-in fallback on any failure
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Error loading config from {}: {}", path.display(), e);
                Self::fallback()
            }
        }
    }

    /// The built-in fallback configuration
    pub fn fallback() -> Self {
        Self {
            title: Some("C2Whisperer Terminal".to_string()),
            username: Some("operator".to_string()),
            hostname: Some("c2whisperer".to_string()),
            password: Some("infected".to_string()),
            ascii: vec!["C2WHISPERER TERMINAL".to_string()],
            about_greeting: Some("Welcome to C2Whisperer Terminal".to_string()),
            ..Self::default()
        }
    }

    /// Window title with fallback
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("C2Whisperer Terminal")
    }

    /// Prompt/whoami username with fallback
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("operator")
    }

    /// Prompt hostname with fallback
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or("c2whisperer")
    }

    /// The configured gate-phrase, if any. A session with no gate-phrase
    /// never unlocks.
    pub fn gate_phrase(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Resolve the render theme from the configured colors
    pub fn theme(&self) -> Theme {
        Theme::from_colors(&self.colors)
    }
}

/// Resolved colors for each output line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub error: Color,
    pub info: Color,
    pub ascii: Color,
    pub prompt: Color,
    pub item: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Phosphor-green terminal look
        Self {
            text: Color::Rgb { r: 0, g: 255, b: 65 },
            error: Color::Rgb { r: 255, g: 85, b: 85 },
            info: Color::Rgb { r: 139, g: 233, b: 253 },
            ascii: Color::Rgb { r: 80, g: 250, b: 123 },
            prompt: Color::Rgb { r: 248, g: 248, b: 242 },
            item: Color::Rgb { r: 241, g: 250, b: 140 },
        }
    }
}

impl Theme {
    /// Build a theme from the config's color map, keeping defaults for
    /// missing or unparseable entries
    pub fn from_colors(colors: &BTreeMap<String, String>) -> Self {
        let mut theme = Self::default();
        for (name, value) in colors {
            let Some(color) = parse_css_color(value) else {
                continue;
            };
            match name.as_str() {
                "text" => theme.text = color,
                "error" => theme.error = color,
                "info" => theme.info = color,
                "ascii" | "banner" => theme.ascii = color,
                "prompt" => theme.prompt = color,
                "item" => theme.item = color,
                _ => {}
            }
        }
        theme
    }
}

/// Parse a css color string (`#rgb`, `#rrggbb`, or a basic color name)
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            // #rgb expands each nibble: #f3a -> #ff33aa
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Color::Rgb {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Color::Rgb {
                    r: byte(0)?,
                    g: byte(2)?,
                    b: byte(4)?,
                })
            }
            _ => None,
        };
    }

    match value.to_lowercase().as_str() {
        "black" => Some(Color::Rgb { r: 0, g: 0, b: 0 }),
        "white" => Some(Color::Rgb { r: 255, g: 255, b: 255 }),
        "red" => Some(Color::Rgb { r: 255, g: 0, b: 0 }),
        "green" => Some(Color::Rgb { r: 0, g: 128, b: 0 }),
        "lime" => Some(Color::Rgb { r: 0, g: 255, b: 0 }),
        "blue" => Some(Color::Rgb { r: 0, g: 0, b: 255 }),
        "yellow" => Some(Color::Rgb { r: 255, g: 255, b: 0 }),
        "cyan" | "aqua" => Some(Color::Rgb { r: 0, g: 255, b: 255 }),
        "magenta" | "fuchsia" => Some(Color::Rgb { r: 255, g: 0, b: 255 }),
        "gray" | "grey" => Some(Color::Rgb { r: 128, g: 128, b: 128 }),
        "orange" => Some(Color::Rgb { r: 255, g: 165, b: 0 }),
        _ => None,
    }
}
