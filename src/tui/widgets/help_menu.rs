//! Help menu overlay.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

use super::{theme::Theme, InteractiveStatefulWidget, KeyEvent};

const KEYBINDINGS: &[(&str, &str)] = &[
    // Library
    ("j/k", "navigate / scroll"),
    ("Enter", "open proof"),
    ("/", "search"),
    ("f", "tag filter"),
    ("h/l", "move tag cursor"),
    ("Space", "toggle tag"),
    ("c", "clear filters"),
    ("a", "add proof"),
    // Proof
    ("e", "edit proof"),
    ("d", "delete proof"),
    ("Esc", "back"),
    // Editor
    ("Tab", "next field"),
    ("C-s", "save"),
    // Other
    ("t", "toggle theme"),
    ("?", "close help"),
    ("q", "quit"),
];

/// State for the help menu widget.
#[derive(Default)]
pub struct HelpMenu {
    visible: bool,
}

impl HelpMenu {
    pub const fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Widget for rendering the help menu overlay.
pub struct HelpMenuWidget {
    pub theme: Theme,
}

impl StatefulWidget for HelpMenuWidget {
    type State = HelpMenu;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.visible {
            return;
        }

        let width = 30u16.min(area.width);
        #[allow(clippy::cast_possible_truncation)]
        let height = ((KEYBINDINGS.len() as u16) + 2).min(area.height);
        let x = area.x + area.width.saturating_sub(width + 1);
        let y = area.y + area.height.saturating_sub(height + 1);
        let popup_area = Rect::new(x, y, width, height);

        Clear.render(popup_area, buf);

        let block = Block::bordered()
            .title(" Help ")
            .border_style(self.theme.border_style(true));

        let key_style = self.theme.accent_style();
        let help_lines: Vec<Line> = KEYBINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>6}"), key_style),
                    Span::styled(format!("  {desc}"), self.theme.text_style()),
                ])
            })
            .collect();

        Paragraph::new(help_lines)
            .block(block)
            .render(popup_area, buf);
    }
}

impl InteractiveStatefulWidget for HelpMenuWidget {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        if !state.visible {
            return false;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                state.visible = false;
                true
            }
            _ => false,
        }
    }
}
