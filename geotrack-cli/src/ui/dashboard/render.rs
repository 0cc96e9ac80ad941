//! Frame layout.
//!
//! ```text
//! ┌ geotrack 0.1.0 ───────────────────────────────────┐
//! │            ╭──────────────────────╮               │
//! │            │  GPS Location Tracker│               │
//! │            │  Latitude: ...       │               │
//! │            ╰──────────────────────╯               │
//! │                         ▼ Current Location        │
//! └──────────────── © OpenStreetMap contributors ─────┘
//!  Zoom 15 │ Tile 15/27393/15124 │ Updates 3 │ q quit  +/- zoom
//! ```

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use geotrack::map::{Lifecycle, MapWidget};

use super::utils::format_duration;
use super::ScreenSnapshot;
use crate::ui::widgets::{MapViewWidget, StatusCardWidget};

/// Render the map screen.
pub fn render_ui(frame: &mut Frame, snapshot: &ScreenSnapshot<'_>) {
    let [main, footer] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(frame.area());

    let outer = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" geotrack {} ", geotrack::VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let map_area = outer.inner(main);
    frame.render_widget(outer, main);

    frame.render_widget(MapViewWidget::new(snapshot.map), map_area);

    let card = StatusCardWidget::new(snapshot.card);
    let card_area = card.placement(map_area);
    frame.render_widget(card, card_area);

    frame.render_widget(Paragraph::new(footer_line(snapshot)), footer);
}

/// Status bar under the map.
pub(crate) fn footer_line(snapshot: &ScreenSnapshot<'_>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Cyan);
    let sep = || Span::styled("  │  ", dim);

    let tile = snapshot
        .map
        .center_tile()
        .map(|t| t.to_string())
        .unwrap_or_else(|_| "-".to_string());

    let mut spans = vec![
        Span::styled("Zoom ", dim),
        Span::styled(format!("{:.0}", snapshot.map.zoom()), value),
        sep(),
        Span::styled("Tile ", dim),
        Span::styled(tile, value),
        sep(),
        Span::styled("Updates ", dim),
        Span::styled(snapshot.stats.updates_applied.to_string(), value),
        sep(),
        Span::styled("Up ", dim),
        Span::styled(format_duration(snapshot.uptime), value),
    ];

    if snapshot.map.lifecycle() == Lifecycle::Paused {
        spans.push(sep());
        spans.push(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(sep());
    spans.push(Span::styled("q quit  +/- zoom", dim));
    Line::from(spans)
}
