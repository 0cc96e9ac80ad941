//! Front-end loops for the run command.
//!
//! # Architecture
//!
//! - `run_tui()` - interactive map screen with keyboard and focus handling
//! - `run_headless()` - plain output for non-TTY environments
//!
//! Both drive the same [`GeoTrackApp`]: they apply queued location and
//! permission events, then present the tracker's state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use geotrack::app::GeoTrackApp;
use geotrack::coord::Coordinate;
use geotrack::map::Lifecycle;
use geotrack::status::StatusCard;
use geotrack::store::LocationWatch;

use crate::error::CliError;
use crate::ui::dashboard::utils::{print_card_header, print_session_summary, status_line};
use crate::ui::{Dashboard, DashboardEvent, ScreenSnapshot};

/// Redraw interval of the map screen.
const TICK_RATE: Duration = Duration::from_millis(100);

/// How long one input poll may block.
const POLL_TIMEOUT: Duration = Duration::from_millis(25);

/// Zoom step for the +/- keys.
const ZOOM_STEP: f64 = 1.0;

/// Run the interactive map screen until quit or shutdown.
pub fn run_tui(app: &mut GeoTrackApp, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new()?;
    let mut last_draw: Option<Instant> = None;

    while !shutdown.load(Ordering::SeqCst) {
        let mut force_draw = app.pump() > 0;

        match dashboard.poll_event(POLL_TIMEOUT)? {
            Some(DashboardEvent::Quit) => break,
            Some(DashboardEvent::ZoomIn) => {
                force_draw |= app.tracker_mut().map_mut().widget_mut().zoom_by(ZOOM_STEP);
            }
            Some(DashboardEvent::ZoomOut) => {
                force_draw |= app.tracker_mut().map_mut().widget_mut().zoom_by(-ZOOM_STEP);
            }
            Some(DashboardEvent::FocusLost) => app.tracker_mut().map_mut().pause(),
            Some(DashboardEvent::FocusGained) => {
                app.tracker_mut().map_mut().resume();
                force_draw = true;
            }
            Some(DashboardEvent::Resize) => force_draw = true,
            None => {}
        }

        // A paused map keeps its last frame
        let paused = app.tracker().map().widget().lifecycle() == Lifecycle::Paused;
        let due = last_draw.map_or(true, |t| t.elapsed() >= TICK_RATE);
        if (due || force_draw) && !paused {
            let tracker = app.tracker();
            let card = tracker.status_card();
            let uptime = dashboard.uptime();
            dashboard.draw(&ScreenSnapshot {
                map: tracker.map().widget(),
                card: &card,
                stats: tracker.stats(),
                uptime,
            })?;
            last_draw = Some(Instant::now());
        }
    }

    let uptime = dashboard.uptime();
    drop(dashboard);
    print_session_summary(&app.tracker().stats(), uptime);
    Ok(())
}

/// Print the status card whenever the published location changes.
pub fn run_headless(app: &mut GeoTrackApp, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    let started = Instant::now();
    let mut location = app.store().watch();

    let card = app.tracker().status_card();
    print_card_header(&card);
    println!("{}", status_line(&card, started.elapsed()));

    while !shutdown.load(Ordering::SeqCst) {
        app.wait_for_event(Duration::from_millis(200));

        if let Some(current) = take_change(&mut location) {
            let card = StatusCard::from_location(current);
            println!("{}", status_line(&card, started.elapsed()));
        }
    }

    print_session_summary(&app.tracker().stats(), started.elapsed());
    Ok(())
}

/// The newly published location, if it changed since the last call.
fn take_change(location: &mut LocationWatch) -> Option<Option<Coordinate>> {
    match location.has_changed() {
        Ok(true) => Some(*location.borrow_and_update()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrack::store::LocationStore;

    #[test]
    fn test_take_change_reports_each_publish_once() {
        let store = LocationStore::new();
        let mut location = store.watch();
        assert_eq!(take_change(&mut location), None);

        store.publish(Coordinate::new(14.5995, 120.9842));
        assert_eq!(
            take_change(&mut location),
            Some(Some(Coordinate::new(14.5995, 120.9842)))
        );
        assert_eq!(take_change(&mut location), None);
    }

    #[test]
    fn test_take_change_keeps_latest_of_burst() {
        let store = LocationStore::new();
        let mut location = store.watch();

        store.publish(Coordinate::new(1.0, 1.0));
        store.publish(Coordinate::new(2.0, 2.0));
        assert_eq!(
            take_change(&mut location),
            Some(Some(Coordinate::new(2.0, 2.0)))
        );
    }
}
