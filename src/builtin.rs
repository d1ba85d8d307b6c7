//! Built-in processing modules shipped with the daemon.
//!
//! These are ordinary `ModuleProcessor` implementations registered
//! through a static discovery source; configuration switches them on
//! and off like any externally discovered module.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext};

use cs_core::module::{ModuleCandidate, ModuleProcessor};
use cs_core::ports::ModuleDiscoveryPort;

/// Strips trailing whitespace from every line of copied text and
/// writes the cleaned text back to the clipboard.
struct TrailingWhitespace;

fn strip_trailing(content: &str) -> String {
    let mut cleaned = content
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    if content.ends_with('\n') {
        cleaned.push('\n');
    }
    cleaned
}

impl ModuleProcessor for TrailingWhitespace {
    fn process(&self, content: &str) -> Result<bool> {
        let cleaned = strip_trailing(content);
        if cleaned == content {
            return Ok(false);
        }

        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("failed to open clipboard context: {e}"))?;
        ctx.set_text(cleaned)
            .map_err(|e| anyhow!("failed to write cleaned text: {e}"))?;
        Ok(true)
    }
}

pub struct BuiltinModules;

impl ModuleDiscoveryPort for BuiltinModules {
    fn discover(&self) -> Vec<ModuleCandidate> {
        vec![ModuleCandidate::processing(
            "trailing-whitespace",
            Arc::new(TrailingWhitespace),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_per_line_trailing_whitespace() {
        assert_eq!(strip_trailing("a  \nb\t\nc"), "a\nb\nc");
    }

    #[test]
    fn preserves_final_newline() {
        assert_eq!(strip_trailing("a \n"), "a\n");
        assert_eq!(strip_trailing("clean"), "clean");
    }
}
