//! Status bar with keybindings, filter status and the latest notice.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{Theme, ThemeMode};

pub struct StatusBar<'a> {
    pub keybindings: &'static [(&'static str, &'static str)],
    /// Active search query and tag, shown when filtering.
    pub query: &'a str,
    pub tag: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub theme_mode: ThemeMode,
}

impl StatusBar<'_> {
    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        const GLOBAL_KEYBINDINGS: &[(&str, &str)] = &[("?", "help"), ("t", "theme"), ("q", "quit")];

        let theme = self.theme();
        let separator = Span::styled(" \u{2502} ", theme.dim_style());

        // Screen keybindings first, then global ones
        let key_spans = self
            .keybindings
            .iter()
            .chain(GLOBAL_KEYBINDINGS)
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let prefix = (i > 0).then(|| separator.clone());
                prefix.into_iter().chain([
                    Span::styled(*key, theme.accent_style()),
                    Span::styled(format!(": {desc}"), theme.text_style()),
                ])
            });

        let filter_status = filter_status(self.query, self.tag);
        let filter_span = (!filter_status.is_empty())
            .then(|| Span::styled(format!(" [{filter_status}]"), Style::new().fg(theme.tag)));

        let theme_span = Span::styled(format!(" ({})", self.theme_mode.name()), theme.dim_style());

        let notice_span = self
            .notice
            .map(|notice| Span::styled(format!("  {notice}"), theme.accent_style()));

        let spans: Vec<Span> = key_spans
            .chain(filter_span)
            .chain([theme_span])
            .chain(notice_span)
            .collect();
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

fn filter_status(query: &str, tag: Option<&str>) -> String {
    let query = query.trim();
    let parts: Vec<String> = [
        (!query.is_empty()).then(|| format!("\"{query}\"")),
        tag.map(|t| format!("#{t}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_status() {
        assert_eq!(filter_status("", None), "");
        assert_eq!(filter_status("  prime ", None), "\"prime\"");
        assert_eq!(filter_status("prime", Some("Analysis")), "\"prime\" #Analysis");
        assert_eq!(filter_status(" ", Some("Analysis")), "#Analysis");
    }
}
