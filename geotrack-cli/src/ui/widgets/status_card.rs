//! Floating status card widget.
//!
//! Shows the card title followed by either the coordinate lines or the
//! waiting message.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use geotrack::status::StatusCard;

/// Horizontal padding inside the card border.
const PADDING: u16 = 2;

pub struct StatusCardWidget<'a> {
    card: &'a StatusCard,
}

impl<'a> StatusCardWidget<'a> {
    pub fn new(card: &'a StatusCard) -> Self {
        Self { card }
    }

    /// Size the card needs, before clipping to the available area.
    pub fn desired_size(&self) -> (u16, u16) {
        let longest = std::iter::once(self.card.title)
            .chain(self.card.lines.iter().map(String::as_str))
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let width = longest + 2 * PADDING + 2;
        let height = self.card.lines.len() as u16 + 1 + 2;
        (width, height)
    }

    /// Where the card sits inside `area`: centered at the top, one row down.
    pub fn placement(&self, area: Rect) -> Rect {
        let (width, height) = self.desired_size();
        let width = width.min(area.width);
        let x = area.x + (area.width - width) / 2;
        let y = area.y.saturating_add(1);
        Rect {
            x,
            y,
            width,
            height: height.min(area.bottom().saturating_sub(y)),
        }
    }

    fn line_style(&self) -> Style {
        if self.card.is_waiting() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        }
    }
}

impl Widget for StatusCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let pad = " ".repeat(PADDING as usize);
        let mut lines = vec![Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled(
                self.card.title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        let style = self.line_style();
        lines.extend(self.card.lines.iter().map(|text| {
            Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(text.clone(), style),
            ])
        }));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack::coord::Coordinate;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_renders_coordinates() {
        let card = StatusCard::from_location(Some(Coordinate::new(37.422, -122.084)));
        let widget = StatusCardWidget::new(&card);
        let (w, h) = widget.desired_size();
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        widget.render(buf.area, &mut buf);

        assert!(row_text(&buf, 1).contains("GPS Location Tracker"));
        assert!(row_text(&buf, 2).contains("Latitude: 37.422000"));
        assert!(row_text(&buf, 3).contains("Longitude: -122.084000"));
    }

    #[test]
    fn test_renders_waiting() {
        let card = StatusCard::from_location(None);
        let widget = StatusCardWidget::new(&card);
        assert_eq!(widget.desired_size().1, 4);

        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 4));
        widget.render(buf.area, &mut buf);
        assert!(row_text(&buf, 2).contains("Waiting for location..."));
    }

    #[test]
    fn test_placement_clipped_to_area() {
        let card = StatusCard::from_location(None);
        let widget = StatusCardWidget::new(&card);
        let placed = widget.placement(Rect::new(0, 0, 10, 3));
        assert_eq!(placed.x, 0);
        assert_eq!(placed.width, 10);
        assert!(placed.bottom() <= 3);
    }

    #[test]
    fn test_placement_centered_horizontally() {
        let card = StatusCard::from_location(None);
        let widget = StatusCardWidget::new(&card);
        let (w, _) = widget.desired_size();
        let placed = widget.placement(Rect::new(0, 0, 80, 24));
        assert_eq!(placed.x, (80 - w) / 2);
        assert_eq!(placed.y, 1);
    }

    proptest::proptest! {
        #[test]
        fn prop_card_fits_both_lines(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let card = StatusCard::from_location(Some(Coordinate::new(lat, lon)));
            let widget = StatusCardWidget::new(&card);
            let (w, h) = widget.desired_size();
            let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
            widget.render(buf.area, &mut buf);

            proptest::prop_assert!(row_text(&buf, 2).contains(&card.lines[0]));
            proptest::prop_assert!(row_text(&buf, 3).contains(&card.lines[1]));
        }
    }
}
