//! Form for adding a proof or revising an existing one.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::{
    render_helpers::render_error, text_input::TextInput, theme::Theme, InteractiveStatefulWidget,
    KeyEvent,
};
use crate::library::{catalog, Proof, ProofDraft, ProofPatch, DEFAULT_AUTHOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Abstract,
    Author,
    Tags,
    Content,
}

impl Field {
    const ALL: [Self; 5] = [
        Self::Title,
        Self::Abstract,
        Self::Author,
        Self::Tags,
        Self::Content,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Abstract => "Abstract",
            Self::Author => "Author",
            Self::Tags => "Tags (comma separated)",
            Self::Content => "Content (use $ for inline math, $$ for block math, ## for headings)",
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    mode: EditorMode,
    inputs: [TextInput; 5],
    focus: usize,
    error: Option<String>,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Add,
            inputs: [
                TextInput::default(),
                TextInput::default(),
                TextInput::default(),
                TextInput::default(),
                TextInput::multiline(""),
            ],
            focus: 0,
            error: None,
        }
    }

    /// Editor prefilled from a stored proof.
    pub fn for_proof(proof: &Proof) -> Self {
        Self {
            mode: EditorMode::Edit(proof.id.clone()),
            inputs: [
                TextInput::new(proof.title.clone()),
                TextInput::new(proof.summary.clone()),
                TextInput::new(proof.author.clone()),
                TextInput::new(proof.tags.join(", ")),
                TextInput::multiline(proof.content.clone()),
            ],
            focus: 0,
            error: None,
        }
    }

    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub const fn focus(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn value(&self, field: Field) -> &str {
        self.inputs[field as usize].value()
    }

    pub fn to_draft(&self) -> ProofDraft {
        let author = self.value(Field::Author).trim();
        ProofDraft {
            title: self.value(Field::Title).trim().to_string(),
            summary: self.value(Field::Abstract).trim().to_string(),
            content: self.value(Field::Content).to_string(),
            author: (!author.is_empty()).then(|| author.to_string()),
            tags: catalog::parse_tags(self.value(Field::Tags)),
        }
    }

    /// Every field is sent; a cleared author falls back to the default.
    pub fn to_patch(&self) -> ProofPatch {
        let draft = self.to_draft();
        ProofPatch {
            author: Some(draft.author_or_default()),
            title: Some(draft.title),
            summary: Some(draft.summary),
            content: Some(draft.content),
            tags: Some(draft.tags),
        }
    }

    const fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    const fn focus_previous(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EditorWidget {
    pub theme: Theme,
}

impl StatefulWidget for EditorWidget {
    type State = Editor;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = match &state.mode {
            EditorMode::Add => " Add New Proof ",
            EditorMode::Edit(_) => " Edit Proof ",
        };
        let block = Block::bordered()
            .title(title)
            .title_bottom(Line::styled(
                format!(" Tab: next field \u{2502} C-s: save \u{2502} Esc: cancel \u{2502} default author: {DEFAULT_AUTHOR} "),
                self.theme.dim_style(),
            ))
            .border_style(self.theme.border_style(true));
        let inner = block.inner(area);
        block.render(area, buf);

        let inner = render_error(buf, inner, state.error.as_deref(), &self.theme);
        let areas: [Rect; 5] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(inner);

        for (i, (field, field_area)) in Field::ALL.into_iter().zip(areas).enumerate() {
            let focused = i == state.focus;
            Paragraph::new(input_lines(state.inputs[i].value(), focused, &self.theme))
                .block(
                    Block::bordered()
                        .title(field.label())
                        .border_style(self.theme.border_style(focused)),
                )
                .wrap(Wrap { trim: false })
                .render(field_area, buf);
        }
    }
}

/// Input text as lines with the cursor after the last one.
fn input_lines<'a>(value: &'a str, focused: bool, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::styled(l, theme.text_style()))
        .collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("\u{2581}", theme.accent_style()));
        }
    }
    lines
}

impl InteractiveStatefulWidget for EditorWidget {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => state.focus_next(),
            KeyCode::BackTab => state.focus_previous(),
            KeyCode::Enter if state.focus() != Field::Content => state.focus_next(),
            _ => {
                if state.inputs[state.focus].handle_key(key) {
                    state.error = None;
                }
                return true;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn type_str(editor: &mut Editor, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            EditorWidget::handle_key(editor, KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    fn press(editor: &mut Editor, code: KeyCode) {
        EditorWidget::handle_key(editor, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_fill_form_into_draft() {
        let mut editor = Editor::new();
        type_str(&mut editor, "Lemma\n");
        type_str(&mut editor, "Short\n");
        press(&mut editor, KeyCode::Tab);
        type_str(&mut editor, "Algebra, , Groups\n");
        assert_eq!(editor.focus(), Field::Content);
        type_str(&mut editor, "line one\n$x$");

        let draft = editor.to_draft();
        assert_eq!(draft.title, "Lemma");
        assert_eq!(draft.summary, "Short");
        assert_eq!(draft.author, None);
        assert_eq!(draft.tags, vec!["Algebra", "Groups"]);
        assert_eq!(draft.content, "line one\n$x$");
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut editor = Editor::new();
        press(&mut editor, KeyCode::BackTab);
        assert_eq!(editor.focus(), Field::Content);
        press(&mut editor, KeyCode::Tab);
        assert_eq!(editor.focus(), Field::Title);
    }

    #[test]
    fn test_edit_patch_defaults_cleared_author() {
        let proof = Proof {
            id: "p1".into(),
            title: "Old".into(),
            summary: String::new(),
            content: "body".into(),
            author: "Euler".into(),
            tags: vec!["Analysis".into()],
            created_at: 0,
        };
        let mut editor = Editor::for_proof(&proof);
        assert_eq!(editor.mode(), &EditorMode::Edit("p1".into()));
        press(&mut editor, KeyCode::Tab);
        press(&mut editor, KeyCode::Tab);
        editor.inputs[Field::Author as usize].clear();

        let patch = editor.to_patch();
        assert_eq!(patch.author.as_deref(), Some(DEFAULT_AUTHOR));
        assert_eq!(patch.title.as_deref(), Some("Old"));
        assert_eq!(patch.tags, Some(vec!["Analysis".to_string()]));
    }
}
