//! Search box above the proof list.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

use super::{text_input::TextInput, theme::Theme, InteractiveStatefulWidget, KeyEvent};

#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
    editing: bool,
}

impl SearchBar {
    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    pub const fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.editing = false;
    }
}

pub struct SearchBarWidget {
    pub theme: Theme,
}

impl StatefulWidget for SearchBarWidget {
    type State = SearchBar;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .title(" Search ")
            .border_style(self.theme.border_style(state.editing));

        let line = if state.query().is_empty() && !state.editing {
            Line::from(Span::styled(
                "Search proofs by title, author, content, or tag (/)",
                self.theme.dim_style(),
            ))
        } else {
            let cursor = if state.editing { "\u{2581}" } else { "" };
            Line::from(vec![
                Span::styled(state.query().to_string(), self.theme.text_style()),
                Span::styled(cursor, self.theme.accent_style()),
            ])
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

impl InteractiveStatefulWidget for SearchBarWidget {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        if !state.editing {
            return false;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                state.editing = false;
                true
            }
            _ => {
                state.input.handle_key(key);
                true
            }
        }
    }
}
