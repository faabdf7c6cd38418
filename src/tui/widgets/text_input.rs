//! Append-only text editing shared by the search bar, passphrase prompt and
//! editor fields.

use crossterm::event::{KeyCode, KeyModifiers};

use super::KeyEvent;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    multiline: bool,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            multiline: false,
        }
    }

    pub fn multiline(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            multiline: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply a key. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('u') => {
                    let changed = !self.value.is_empty();
                    self.value.clear();
                    changed
                }
                KeyCode::Char('w') => self.delete_word(),
                _ => false,
            };
        }
        match key.code {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Enter if self.multiline => {
                self.value.push('\n');
                true
            }
            KeyCode::Backspace => self.value.pop().is_some(),
            _ => false,
        }
    }

    fn delete_word(&mut self) -> bool {
        let before = self.value.len();
        let trimmed = self.value.trim_end_matches(' ').len();
        let cut = self.value[..trimmed]
            .rfind([' ', '\n'])
            .map_or(0, |i| i + 1);
        self.value.truncate(cut);
        self.value.len() != before
    }
}
