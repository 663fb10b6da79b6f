//! Accelerator strings such as `Mod+Shift+H`.
//!
//! `Mod` is the platform's primary modifier (Command on macOS, Control
//! elsewhere) and is rewritten to `CommandOrControl` for the backend.

use std::fmt;
use std::str::FromStr;

use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modifier {
    Primary,
    Control,
    Super,
    Alt,
    Shift,
}

impl Modifier {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "mod" | "commandorcontrol" | "cmdorctrl" | "commandorctrl" | "cmdorcontrol" => {
                Some(Modifier::Primary)
            }
            "ctrl" | "control" => Some(Modifier::Control),
            "cmd" | "command" | "super" | "meta" => Some(Modifier::Super),
            "alt" | "option" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            _ => None,
        }
    }

    fn platform_name(&self) -> &'static str {
        match self {
            Modifier::Primary => "CommandOrControl",
            Modifier::Control => "Control",
            Modifier::Super => "Super",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        }
    }
}

/// A parsed modifier+key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accelerator {
    modifiers: Vec<Modifier>,
    key: String,
}

impl Accelerator {
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Form understood by the global shortcut backend.
    pub fn to_platform_string(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Accelerator {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShellError::InvalidAccelerator(s.to_string());
        let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key, modifier_tokens) = tokens.split_last().ok_or_else(invalid)?;

        if key.is_empty() || key.contains(char::is_whitespace) || Modifier::parse(key).is_some() {
            return Err(invalid());
        }

        let mut modifiers = Vec::with_capacity(modifier_tokens.len());
        for token in modifier_tokens {
            let modifier = Modifier::parse(token).ok_or_else(invalid)?;
            if !modifiers.contains(&modifier) {
                modifiers.push(modifier);
            }
        }
        modifiers.sort();

        let key = if key.chars().count() == 1 {
            key.to_ascii_uppercase()
        } else {
            key.to_string()
        };

        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.platform_name())?;
        }
        write!(f, "{}", self.key)
    }
}
