//! Tag chips for filtering the proof list by a single tag.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::{theme::Theme, InteractiveStatefulWidget, KeyEvent};

#[derive(Default)]
pub struct TagFilter {
    tags: Vec<String>,
    cursor: usize,
    selected: Option<String>,
    visible: bool,
}

impl TagFilter {
    /// Replace the available tags. A selected tag that disappeared is kept
    /// so the (now empty) filtered view stays explainable.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.cursor = self.cursor.min(self.tags.len().saturating_sub(1));
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Select the tag under the cursor, or deselect it if already selected.
    fn toggle_under_cursor(&mut self) {
        let Some(tag) = self.tags.get(self.cursor) else {
            return;
        };
        self.selected = if self.selected.as_ref() == Some(tag) {
            None
        } else {
            Some(tag.clone())
        };
    }
}

pub struct TagFilterWidget {
    pub theme: Theme,
}

impl StatefulWidget for TagFilterWidget {
    type State = TagFilter;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::bordered()
            .title(" Filter by Tag ")
            .border_style(self.theme.border_style(true));

        if state.tags.is_empty() {
            Paragraph::new(Span::styled("No tags yet", self.theme.dim_style()))
                .block(block)
                .render(area, buf);
            return;
        }

        let spans: Vec<Span> = state
            .tags
            .iter()
            .enumerate()
            .flat_map(|(i, tag)| {
                let is_selected = state.selected.as_ref() == Some(tag);
                let mut style = if is_selected {
                    self.theme.accent_style().add_modifier(Modifier::REVERSED)
                } else {
                    self.theme.text_style()
                };
                if i == state.cursor {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                }
                [Span::styled(format!(" {tag} "), style), Span::raw(" ")]
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl InteractiveStatefulWidget for TagFilterWidget {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        if !state.visible {
            return false;
        }
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                state.cursor = state.cursor.saturating_sub(1);
                true
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if state.cursor + 1 < state.tags.len() {
                    state.cursor += 1;
                }
                true
            }
            KeyCode::Char(' ') => {
                state.toggle_under_cursor();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(state: &mut TagFilter, code: KeyCode) -> bool {
        TagFilterWidget::handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_space_toggles_tag_under_cursor() {
        let mut filter = TagFilter::default();
        filter.set_tags(vec!["Algebra".into(), "Analysis".into()]);
        assert!(!press(&mut filter, KeyCode::Char(' ')), "hidden panel ignores keys");

        filter.toggle_visible();
        press(&mut filter, KeyCode::Right);
        press(&mut filter, KeyCode::Right);
        press(&mut filter, KeyCode::Char(' '));
        assert_eq!(filter.selected(), Some("Analysis"));

        press(&mut filter, KeyCode::Char(' '));
        assert_eq!(filter.selected(), None);
    }

    #[test]
    fn test_cursor_clamped_when_tags_shrink() {
        let mut filter = TagFilter::default();
        filter.set_tags(vec!["a".into(), "b".into(), "c".into()]);
        filter.toggle_visible();
        press(&mut filter, KeyCode::Char('l'));
        press(&mut filter, KeyCode::Char('l'));
        filter.set_tags(vec!["a".into()]);
        press(&mut filter, KeyCode::Char(' '));
        assert_eq!(filter.selected(), Some("a"));
    }
}
