//! Full view of a single proof with its math typeset.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::{render_helpers::render_error, theme::Theme, InteractiveStatefulWidget, KeyEvent};
use crate::{
    library::Proof,
    markup::{self, MathError, MathMode, Segment, Typesetter},
};

/// Lay out rendered segments as terminal lines.
///
/// Headings and block math sit on lines of their own; a line break directly
/// after one of them is absorbed so it does not leave a blank line. Leading
/// and trailing blank lines are dropped.
pub fn content_lines(
    segments: &[Segment],
    typesetter: &impl Typesetter,
    theme: &Theme,
) -> Result<Vec<Line<'static>>, MathError> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut after_block = false;

    for segment in segments {
        match segment {
            Segment::Text(text) => {
                let text = text.replace('\r', "");
                if !text.is_empty() {
                    current.push(Span::styled(text, theme.text_style()));
                    after_block = false;
                }
            }
            Segment::InlineMath(expr) => {
                let typeset = typesetter.typeset(expr, MathMode::Inline)?;
                current.push(Span::styled(typeset, theme.math_style()));
                after_block = false;
            }
            Segment::LineBreak => {
                if !after_block {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
                after_block = false;
            }
            Segment::Heading(title) => {
                flush(&mut lines, &mut current);
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    title.clone(),
                    theme.heading_style().add_modifier(Modifier::UNDERLINED),
                ));
                after_block = true;
            }
            Segment::BlockMath(expr) => {
                flush(&mut lines, &mut current);
                let typeset = typesetter.typeset(expr, MathMode::Block)?;
                lines.extend(
                    typeset
                        .lines()
                        .map(|l| Line::styled(l.to_string(), theme.math_style()).centered()),
                );
                after_block = true;
            }
        }
    }
    flush(&mut lines, &mut current);

    let is_blank = |l: &Line| l.spans.iter().all(|s| s.content.trim().is_empty());
    while lines.first().is_some_and(is_blank) {
        lines.remove(0);
    }
    while lines.last().is_some_and(is_blank) {
        lines.pop();
    }
    Ok(lines)
}

fn flush(lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>) {
    if !current.is_empty() {
        lines.push(Line::from(std::mem::take(current)));
    }
}

/// Scroll position for the proof body.
#[derive(Debug, Default)]
pub struct ProofView {
    scroll: u16,
    /// Line count of the last render, bounds scrolling.
    line_count: u16,
}

impl ProofView {
    pub const fn reset(&mut self) {
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.line_count.saturating_sub(1);
        let next = i32::from(self.scroll)
            .saturating_add(delta)
            .clamp(0, i32::from(max));
        self.scroll = u16::try_from(next).unwrap_or(max);
    }
}

pub struct ProofViewWidget<'a, T> {
    pub proof: &'a Proof,
    pub typesetter: &'a T,
    pub theme: Theme,
}

impl<T: Typesetter> ProofViewWidget<'_, T> {
    fn header(&self) -> Vec<Line<'static>> {
        let t = &self.theme;
        let mut lines = vec![
            Line::styled(self.proof.title.clone(), t.heading_style()),
            Line::from(vec![
                Span::styled(self.proof.author.clone(), t.accent_style()),
                Span::styled(
                    format!(" \u{2022} {}", self.proof.created_date()),
                    t.dim_style(),
                ),
            ]),
        ];
        if !self.proof.tags.is_empty() {
            lines.push(Line::from(
                self.proof
                    .tags
                    .iter()
                    .map(|tag| Span::styled(format!("#{tag} "), Style::new().fg(t.tag)))
                    .collect::<Vec<_>>(),
            ));
        }
        if !self.proof.summary.is_empty() {
            lines.push(Line::styled(
                self.proof.summary.clone(),
                t.dim_style().add_modifier(Modifier::ITALIC),
            ));
        }
        lines
    }
}

impl<T: Typesetter> StatefulWidget for ProofViewWidget<'_, T> {
    type State = ProofView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = self.header();
        let header_height = header.len() as u16 + 1;
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(header_height), Constraint::Fill(1)]).areas(area);

        Paragraph::new(header)
            .block(
                Block::new()
                    .borders(Borders::BOTTOM)
                    .border_style(self.theme.border_style(false)),
            )
            .wrap(Wrap { trim: true })
            .render(header_area, buf);

        let segments = markup::render(&self.proof.content);
        let (body, error) = match content_lines(&segments, self.typesetter, &self.theme) {
            Ok(lines) => (lines, None),
            Err(e) => (
                self.proof
                    .content
                    .lines()
                    .map(|l| Line::styled(l.to_string(), self.theme.dim_style()))
                    .collect(),
                Some(format!("cannot typeset math: {e}")),
            ),
        };

        let body_area = render_error(buf, body_area, error.as_deref(), &self.theme);
        state.line_count = u16::try_from(body.len()).unwrap_or(u16::MAX);
        state.scroll = state.scroll.min(state.line_count.saturating_sub(1));

        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .render(body_area, buf);
    }
}

impl<T: Typesetter> InteractiveStatefulWidget for ProofViewWidget<'_, T> {
    fn handle_key(state: &mut Self::State, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => state.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => state.scroll_by(10),
            KeyCode::PageUp => state.scroll_by(-10),
            KeyCode::Char('g') | KeyCode::Home => state.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => state.scroll_by(i32::from(u16::MAX)),
            _ => return false,
        }
        true
    }
}
