//! Common render helper functions for screens.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Paragraph, Widget, Wrap},
};

use super::theme::Theme;

/// Render an error message at the top of the area and return the remaining
/// area. Returns the original area if there's no error.
pub fn render_error(buf: &mut Buffer, area: Rect, error: Option<&str>, theme: &Theme) -> Rect {
    let Some(error) = error else {
        return area;
    };

    let [error_area, rest] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);
    Paragraph::new(format!("Error: {error}"))
        .style(Style::new().fg(theme.error))
        .wrap(Wrap { trim: true })
        .render(error_area, buf);
    rest
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 40, 10);
        assert_eq!((rect.width, rect.height), (40, 10));
        assert_eq!((rect.x, rect.y), (20, 7));

        let small = centered_rect(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!((small.width, small.height), (20, 5));
    }

    #[test]
    fn test_render_error_reserves_two_rows() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        assert_eq!(render_error(&mut buf, area, None, &Theme::DARK), area);
        let rest = render_error(&mut buf, area, Some("boom"), &Theme::DARK);
        assert_eq!(rest, Rect::new(0, 2, 30, 8));
    }
}
