//! Masthead and footer framing every screen.

use chrono::{Datelike, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::theme::Theme;

pub const TITLE: &str = "The Library of Proofs";
const EPIGRAPH: &str = "\"Mathematics is the music of reason.\"";
const EPIGRAPH_AUTHOR: &str = "James Joseph Sylvester";

/// Three rows: title, epigraph, rule.
pub struct Masthead {
    pub theme: Theme,
}

impl Widget for Masthead {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(TITLE, self.theme.heading_style()),
            Line::from(vec![
                Span::styled(EPIGRAPH, self.theme.dim_style().add_modifier(Modifier::ITALIC)),
                Span::styled(format!(" \u{2014} {EPIGRAPH_AUTHOR}"), self.theme.dim_style()),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::new()
                    .borders(Borders::BOTTOM)
                    .border_style(self.theme.border_style(false)),
            )
            .render(area, buf);
    }
}

pub fn footer_text(year: i32) -> String {
    format!("Quod erat demonstrandum \u{2014} \u{a9} {year} Q.E.D. Library")
}

pub struct Footer {
    pub theme: Theme,
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(footer_text(Local::now().year()))
            .alignment(Alignment::Center)
            .style(self.theme.dim_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_names_the_year() {
        assert_eq!(
            footer_text(2024),
            "Quod erat demonstrandum \u{2014} \u{a9} 2024 Q.E.D. Library"
        );
    }
}
