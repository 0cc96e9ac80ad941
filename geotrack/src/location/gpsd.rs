//! gpsd location source.
//!
//! Connects to a gpsd daemon, enables JSON watch mode and turns TPV reports
//! into location callbacks. Reports without a 2D/3D fix become empty
//! readings. Connection failures are logged and end the stream; the caller
//! simply stops receiving updates.

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::gate::IntervalGate;
use super::request::LocationRequest;
use super::service::{deliver, LocationService};
use super::subscription::LocationSubscription;
use super::types::{LocationError, LocationResult};
use crate::coord::Coordinate;
use crate::event::EventSender;

/// Default gpsd host.
pub const DEFAULT_GPSD_HOST: &str = "localhost";

/// Default gpsd port.
pub const DEFAULT_GPSD_PORT: u16 = 2947;

/// Command enabling JSON streaming.
const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// Subset of a gpsd report we care about.
#[derive(Debug, Deserialize)]
struct GpsdReport {
    class: String,
    #[serde(default)]
    mode: u8,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Parse one line of gpsd output.
///
/// Returns `None` for anything other than a TPV report. A TPV report without
/// a usable fix yields an empty [`LocationResult`].
pub fn parse_report(line: &str) -> Option<LocationResult> {
    let report: GpsdReport = match serde_json::from_str(line) {
        Ok(report) => report,
        Err(e) => {
            debug!(error = %e, "Ignoring unparseable gpsd line");
            return None;
        }
    };

    if report.class != "TPV" {
        return None;
    }

    // mode: 0/1 = no fix, 2 = 2D, 3 = 3D
    let fix = match (report.mode, report.lat, report.lon) {
        (mode, Some(lat), Some(lon)) if mode >= 2 => Coordinate::checked(lat, lon).ok(),
        _ => None,
    };

    Some(LocationResult {
        last_location: fix,
    })
}

/// Location service reading from gpsd.
pub struct GpsdLocationService {
    runtime: Handle,
    host: String,
    port: u16,
}

impl GpsdLocationService {
    pub fn new(runtime: Handle, host: impl Into<String>, port: u16) -> Self {
        Self {
            runtime,
            host: host.into(),
            port,
        }
    }

    /// Address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LocationService for GpsdLocationService {
    fn name(&self) -> &'static str {
        "gpsd"
    }

    fn subscribe(
        &self,
        request: &LocationRequest,
        events: EventSender,
    ) -> Result<LocationSubscription, LocationError> {
        request.validate()?;

        let token = CancellationToken::new();
        let cancel = token.clone();
        let address = self.address();
        let gate = IntervalGate::new(request.min_update_interval());

        info!(
            address = %address,
            min_interval_ms = request.min_update_interval().as_millis() as u64,
            priority = %request.priority(),
            "Starting gpsd location updates"
        );

        self.runtime.spawn(async move {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("gpsd location task cancelled");
                }

                result = stream_reports(&address, gate, &events) => {
                    if let Err(e) = result {
                        warn!(address = %address, error = %e, "gpsd stream ended");
                    } else {
                        debug!(address = %address, "gpsd stream closed");
                    }
                }
            }
        });

        Ok(LocationSubscription::new(self.name(), token))
    }
}

/// Read reports until the connection or the event channel closes.
async fn stream_reports(
    address: &str,
    mut gate: IntervalGate,
    events: &EventSender,
) -> Result<(), LocationError> {
    let mut stream = TcpStream::connect(address).await?;
    stream.write_all(WATCH_COMMAND).await?;

    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(result) = parse_report(&line) else {
            continue;
        };
        if !gate.admit_result(&result, tokio::time::Instant::now().into_std()) {
            continue;
        }
        if !deliver(events, result) {
            break;
        }
    }

    Ok(())
}
