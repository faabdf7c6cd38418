//! Owner passphrase prompt shown before any change to the library.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::{
    render_helpers::centered_rect, text_input::TextInput, theme::Theme, InteractiveStatefulWidget,
    KeyEvent,
};
use crate::{error::Error, gate};

/// The change the owner is asking to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatedAction {
    Add,
    Edit(String),
    Delete(String),
}

impl GatedAction {
    const fn verb(&self) -> &'static str {
        match self {
            Self::Add => "add a proof",
            Self::Edit(_) => "edit this proof",
            Self::Delete(_) => "delete this proof",
        }
    }
}

/// Outcome of a key press in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pending,
    Granted(GatedAction),
    Cancelled,
}

#[derive(Debug)]
pub struct PassphraseModal {
    action: GatedAction,
    input: TextInput,
    error: Option<String>,
}

impl PassphraseModal {
    pub fn new(action: GatedAction) -> Self {
        Self {
            action,
            input: TextInput::default(),
            error: None,
        }
    }

    /// Check the typed passphrase. A wrong one clears the input and leaves
    /// the prompt open with the denial message.
    pub fn submit(&mut self) -> Verdict {
        match gate::check(self.input.value()) {
            Ok(()) => Verdict::Granted(self.action.clone()),
            Err(e @ Error::AccessDenied) => {
                self.error = Some(e.to_string());
                self.input.clear();
                Verdict::Pending
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Verdict::Pending
            }
        }
    }

    /// Process a key press; Enter submits, Esc cancels.
    pub fn handle_key(&mut self, key: KeyEvent) -> Verdict {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => Verdict::Cancelled,
            _ => {
                PassphraseModalWidget::handle_key(self, key);
                Verdict::Pending
            }
        }
    }
}

pub struct PassphraseModalWidget {
    pub theme: Theme,
}

impl StatefulWidget for PassphraseModalWidget {
    type State = PassphraseModal;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let popup = centered_rect(area, 48, 8);
        Clear.render(popup, buf);

        let masked = "\u{2022}".repeat(state.input.value().chars().count());
        let mut lines = vec![
            Line::styled(
                format!("Enter the owner passphrase to {}.", state.action.verb()),
                self.theme.text_style(),
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled(masked, self.theme.accent_style()),
                Span::styled("\u{2581}", self.theme.accent_style()),
            ]),
        ];
        if let Some(error) = &state.error {
            lines.push(Line::from(""));
            lines.push(Line::styled(error.clone(), Style::new().fg(self.theme.error)));
        }

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Authentication Required ")
                    .title_bottom(Line::styled(" Enter: unlock \u{2502} Esc: cancel ", self.theme.dim_style()))
                    .border_style(self.theme.border_style(true)),
            )
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

impl InteractiveStatefulWidget for PassphraseModalWidget {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        if state.input.handle_key(key) {
            state.error = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(modal: &mut PassphraseModal, text: &str) {
        for c in text.chars() {
            assert_eq!(modal.handle_key(key(KeyCode::Char(c))), Verdict::Pending);
        }
    }

    #[test]
    fn test_correct_passphrase_grants_action() {
        let mut modal = PassphraseModal::new(GatedAction::Delete("p1".into()));
        type_str(&mut modal, gate::OWNER_PASSPHRASE);
        assert_eq!(
            modal.handle_key(key(KeyCode::Enter)),
            Verdict::Granted(GatedAction::Delete("p1".into()))
        );
    }

    #[test]
    fn test_wrong_passphrase_shows_denial_and_clears() {
        let mut modal = PassphraseModal::new(GatedAction::Add);
        type_str(&mut modal, "guess");
        assert_eq!(modal.handle_key(key(KeyCode::Enter)), Verdict::Pending);
        assert_eq!(modal.error.as_deref(), Some("Incorrect password. Access denied."));
        assert_eq!(modal.input.value(), "");

        type_str(&mut modal, "x");
        assert_eq!(modal.error, None);
    }

    #[test]
    fn test_escape_cancels() {
        let mut modal = PassphraseModal::new(GatedAction::Add);
        assert_eq!(modal.handle_key(key(KeyCode::Esc)), Verdict::Cancelled);
    }
}
