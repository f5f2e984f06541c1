//! System telemetry snapshot (battery, disk, CPU)
//!
//! Each field is collected on its own; a failure in one source turns that
//! field into [`Reading::Unavailable`] and leaves the others intact.
//! Formatting into speech happens only through the `*_line` accessors.

use std::{fmt, path::PathBuf, time::Duration};

use starship_battery::{units::ratio, State as BatteryState};
use sysinfo::{CpuRefreshKind, Disks, RefreshKind, System};
use tracing::debug;

use crate::config::TelemetryConfig;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A best-effort value: either collected or the reason it was not
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Reading<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Available(value) => Some(value),
            Reading::Unavailable(_) => None,
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Reading<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Reading::Available(value),
            Err(e) => Reading::Unavailable(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    pub percent: f32,
    pub charging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub percent_used: f64,
    pub total_bytes: u64,
}

impl DiskUsage {
    pub fn total_gb(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_GB
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuUsage {
    pub percent: f32,
}

/// Point-in-time system status passed read-only into each dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub battery: Reading<BatteryStatus>,
    pub disk: Reading<DiskUsage>,
    pub cpu: Reading<CpuUsage>,
}

impl TelemetrySnapshot {
    /// Snapshot with every field unavailable, used before the first capture
    pub fn unavailable(reason: &str) -> Self {
        Self {
            battery: Reading::Unavailable(reason.to_string()),
            disk: Reading::Unavailable(reason.to_string()),
            cpu: Reading::Unavailable(reason.to_string()),
        }
    }

    pub fn battery_line(&self) -> String {
        match &self.battery {
            Reading::Available(b) => format!(
                "Battery: {}% {}",
                b.percent.round(),
                if b.charging { "Charging" } else { "Discharging" }
            ),
            Reading::Unavailable(_) => "Battery status not available".to_string(),
        }
    }

    pub fn disk_line(&self) -> String {
        match &self.disk {
            Reading::Available(d) => format!(
                "Disk Usage: {:.1}% used ({:.1}GB total)",
                d.percent_used,
                d.total_gb()
            ),
            Reading::Unavailable(_) => "Disk usage not available".to_string(),
        }
    }

    pub fn cpu_line(&self) -> String {
        match &self.cpu {
            Reading::Available(c) => format!("CPU Usage: {:.1}%", c.percent),
            Reading::Unavailable(_) => "CPU usage not available".to_string(),
        }
    }

    /// Battery, disk, CPU, in the order they are spoken
    pub fn lines(&self) -> [String; 3] {
        [self.battery_line(), self.disk_line(), self.cpu_line()]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("{0} not available on this system")]
    NotAvailable(&'static str),

    #[error("Battery backend error: {0}")]
    Battery(#[from] starship_battery::Error),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Source of the three telemetry fields. `capture` never fails.
pub trait TelemetrySource: Send + Sync {
    fn battery(&self) -> TelemetryResult<BatteryStatus>;
    fn disk(&self) -> TelemetryResult<DiskUsage>;
    fn cpu(&self) -> TelemetryResult<CpuUsage>;

    fn capture(&self) -> TelemetrySnapshot {
        let snapshot = TelemetrySnapshot {
            battery: self.battery().into(),
            disk: self.disk().into(),
            cpu: self.cpu().into(),
        };
        debug!(?snapshot, "Telemetry captured");
        snapshot
    }
}

/// Telemetry from the running machine: `sysinfo` for disk and CPU,
/// `starship-battery` for the first battery the platform reports
#[derive(Debug, Clone)]
pub struct SystemTelemetry {
    disk_mount: PathBuf,
    cpu_sample: Duration,
}

impl SystemTelemetry {
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            disk_mount: config.disk_mount.clone(),
            cpu_sample: Duration::from_millis(config.cpu_sample_ms)
                .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

/// Anything but an explicit discharge counts as charging (full, unknown
/// and empty batteries are on mains or about to be).
fn battery_status(percent: f32, state: BatteryState) -> BatteryStatus {
    BatteryStatus {
        percent,
        charging: state != BatteryState::Discharging,
    }
}

impl TelemetrySource for SystemTelemetry {
    fn battery(&self) -> TelemetryResult<BatteryStatus> {
        let manager = starship_battery::Manager::new()?;
        let battery = manager
            .batteries()?
            .flatten()
            .next()
            .ok_or(TelemetryError::NotAvailable("Battery"))?;

        Ok(battery_status(
            battery.state_of_charge().get::<ratio::percent>(),
            battery.state(),
        ))
    }

    fn disk(&self) -> TelemetryResult<DiskUsage> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .iter()
            .find(|disk| disk.mount_point() == self.disk_mount.as_path())
            .or_else(|| disks.iter().next())
            .ok_or(TelemetryError::NotAvailable("Disk"))?;

        let total = disk.total_space();
        if total == 0 {
            return Err(TelemetryError::NotAvailable("Disk"));
        }
        let used = total.saturating_sub(disk.available_space());

        Ok(DiskUsage {
            percent_used: used as f64 / total as f64 * 100.0,
            total_bytes: total,
        })
    }

    fn cpu(&self) -> TelemetryResult<CpuUsage> {
        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );
        if sys.cpus().is_empty() {
            return Err(TelemetryError::NotAvailable("CPU"));
        }

        std::thread::sleep(self.cpu_sample);
        sys.refresh_cpu_usage();

        Ok(CpuUsage {
            percent: sys.global_cpu_usage(),
        })
    }
}
