//! The library listing: one card per proof.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{selection::SelectionState, theme::Theme};
use crate::library::Proof;

/// Rows per card including the gap below it.
const CARD_HEIGHT: u16 = 5;

pub struct ProofList<'a> {
    proofs: &'a [&'a Proof],
    /// Size of the unfiltered library, for the empty-state message.
    total: usize,
    tag: Option<&'a str>,
    theme: Theme,
}

impl<'a> ProofList<'a> {
    pub const fn new(proofs: &'a [&'a Proof], total: usize, tag: Option<&'a str>, theme: Theme) -> Self {
        Self {
            proofs,
            total,
            tag,
            theme,
        }
    }

    fn empty_message(&self) -> Vec<Line<'static>> {
        if self.total == 0 {
            return vec![Line::styled("No proofs found in the library yet.", self.theme.dim_style())];
        }
        let scope = self.tag.map(|t| format!(" in \"{t}\"")).unwrap_or_default();
        vec![
            Line::styled("No proofs found", self.theme.heading_style()),
            Line::styled(format!("No proofs match your search{scope}."), self.theme.dim_style()),
            Line::from(vec![
                Span::styled("c", self.theme.accent_style()),
                Span::styled(": clear filters", self.theme.dim_style()),
            ]),
        ]
    }

    fn card(&self, proof: &Proof, is_selected: bool) -> Vec<Line<'static>> {
        let t = &self.theme;
        let marker = if is_selected { "\u{25b6} " } else { "  " };
        let tags: Vec<Span> = proof
            .tags
            .iter()
            .flat_map(|tag| {
                [
                    Span::styled(format!("#{tag}"), Style::from(t.tag)),
                    Span::raw(" "),
                ]
            })
            .collect();

        vec![
            Line::from(vec![
                Span::styled(marker, t.accent_style()),
                Span::styled(proof.title.clone(), t.heading_style()),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{} \u{2022} {}", proof.author, proof.created_date()),
                    t.dim_style(),
                ),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(proof.summary.clone(), t.text_style()),
            ]),
            Line::from([Span::raw("  ")].into_iter().chain(tags).collect::<Vec<_>>()),
        ]
    }
}

impl StatefulWidget for ProofList<'_> {
    type State = SelectionState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.clear_regions();

        if self.proofs.is_empty() {
            Paragraph::new(self.empty_message()).render(area, buf);
            return;
        }

        let visible = usize::from((area.height / CARD_HEIGHT).max(1));
        let offset = state.scroll_offset(visible);
        let selected = state.selected();

        for (row, (index, proof)) in self
            .proofs
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = area.y + (row as u16) * CARD_HEIGHT;
            let height = (CARD_HEIGHT - 1).min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let card_area = Rect::new(area.x, y, area.width, height);
            let is_selected = selected == Some(index);

            Paragraph::new(self.card(proof, is_selected))
                .style(self.theme.selected(Style::new(), is_selected))
                .render(card_area, buf);
            state.add_region(card_area, index);
        }
    }
}
