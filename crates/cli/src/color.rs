// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

pub mod codes {
    /// File headers: steel blue
    pub const HEADER: u8 = 74;
    /// Positions and rule ids: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Palette applied to one rendering pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    colorize: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            colorize: should_colorize(),
        }
    }

    pub fn plain() -> Self {
        Self { colorize: false }
    }

    #[cfg(test)]
    pub fn colored() -> Self {
        Self { colorize: true }
    }

    pub fn header(&self, text: &str) -> String {
        self.paint(&fg256(codes::HEADER), text)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(&fg256(codes::MUTED), text)
    }

    /// Red for errors, yellow for warnings
    pub fn severity(&self, severity: u8, text: &str) -> String {
        let code = if severity >= 2 { "\x1b[31m" } else { "\x1b[33m" };
        self.paint(code, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.colorize {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
