//! Map screen.
//!
//! `Dashboard` owns the terminal for the lifetime of the screen: raw mode,
//! the alternate screen and focus reporting are switched on in
//! [`Dashboard::new`] and restored on drop.

mod render;
pub mod utils;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use geotrack::map::MapCanvas;
use geotrack::status::StatusCard;
use geotrack::tracker::TrackerStats;

pub use render::render_ui;

/// User input relevant to the map screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Quit,
    ZoomIn,
    ZoomOut,
    /// Terminal lost focus; the map pauses.
    FocusLost,
    /// Terminal regained focus; the map resumes.
    FocusGained,
    Resize,
}

/// What a frame shows.
pub struct ScreenSnapshot<'a> {
    pub map: &'a MapCanvas,
    pub card: &'a StatusCard,
    pub stats: TrackerStats,
    pub uptime: Duration,
}

/// Translate a terminal event.
pub fn map_event(event: Event) -> Option<DashboardEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::FocusLost => Some(DashboardEvent::FocusLost),
        Event::FocusGained => Some(DashboardEvent::FocusGained),
        Event::Resize(_, _) => Some(DashboardEvent::Resize),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<DashboardEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(DashboardEvent::Quit)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => Some(DashboardEvent::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(DashboardEvent::ZoomOut),
        _ => None,
    }
}

/// Terminal dashboard for the map screen.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    started: Instant,
}

impl Dashboard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            started: Instant::now(),
        })
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Wait up to `timeout` for input.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<DashboardEvent>> {
        if event::poll(timeout)? {
            Ok(map_event(event::read()?))
        } else {
            Ok(None)
        }
    }

    pub fn draw(&mut self, snapshot: &ScreenSnapshot<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render_ui(frame, snapshot))?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(press(KeyCode::Char('q'))), Some(DashboardEvent::Quit));
        assert_eq!(map_event(press(KeyCode::Esc)), Some(DashboardEvent::Quit));
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(DashboardEvent::Quit)
        );
        assert_eq!(map_event(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_zoom_keys() {
        assert_eq!(map_event(press(KeyCode::Char('+'))), Some(DashboardEvent::ZoomIn));
        assert_eq!(map_event(press(KeyCode::Char('-'))), Some(DashboardEvent::ZoomOut));
    }

    #[test]
    fn test_focus_events() {
        assert_eq!(map_event(Event::FocusLost), Some(DashboardEvent::FocusLost));
        assert_eq!(map_event(Event::FocusGained), Some(DashboardEvent::FocusGained));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event(Event::Key(key)), None);
    }
}
