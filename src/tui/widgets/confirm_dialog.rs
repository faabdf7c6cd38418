//! Yes/no confirmation before deleting a proof.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

use super::{render_helpers::centered_rect, theme::Theme, KeyEvent};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this proof?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Map a key to an answer; other keys leave the dialog open.
pub const fn answer(key: &KeyEvent) -> Option<Answer> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Answer::Yes),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Answer::No),
        _ => None,
    }
}

pub struct ConfirmDialog<'a> {
    pub title: &'a str,
    pub theme: Theme,
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area, 50, 7);
        Clear.render(popup, buf);

        let lines = vec![
            Line::styled(DELETE_PROMPT, self.theme.text_style()),
            Line::styled(format!("\"{}\"", self.title), self.theme.heading_style()),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", self.theme.accent_style()),
                Span::styled(": delete   ", self.theme.text_style()),
                Span::styled("n", self.theme.accent_style()),
                Span::styled(": keep", self.theme.text_style()),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(" Delete Proof ")
                    .border_style(Style::new().fg(self.theme.error)),
            )
            .render(popup, buf);
    }
}
