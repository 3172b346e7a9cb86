/// Metric data shapes shared by the dashboard and detail screens
///
/// Wire shapes deserialize straight from the backend JSON; the aggregate
/// `SystemStats` is what the panels render. Memory values become formatted
/// GB strings at merge time, everything else stays verbatim.

use ratatui::style::Color;
use serde::Deserialize;

use crate::utils::constants::{PLACEHOLDER_TEXT, STATUS_EXITED, STATUS_RUNNING};
use crate::utils::helpers::format_gb_floor;

#[derive(Debug, Clone, Deserialize)]
pub struct OsInfo {
    pub platform: String,
    pub distro: String,
    pub architecture: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CpuInfo {
    pub brand: String,
    pub cores: u32,
    pub speed: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageEntry {
    pub fs: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub used: u64,
    #[serde(rename = "use")]
    pub used_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerEntry {
    pub name: String,
    pub tag: String,
    pub uptime: u64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MemoryUsageBytes {
    pub total: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MemoryUsage {
    pub usage: MemoryUsageBytes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationInfo {
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UptimeInfo {
    pub uptime: String,
    pub timezone: String,
}

/// Memory figures as displayed: whole GB, floored.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryInfo {
    pub total: String,
    pub used: String,
    pub free: String,
}

impl MemoryInfo {
    /// Total and used floor independently; free floors after the
    /// subtraction, so it can disagree with `total - used` of the floored
    /// values by 1 GB at boundaries.
    pub fn from_usage(usage: &MemoryUsageBytes) -> Self {
        Self {
            total: format_gb_floor(usage.total),
            used: format_gb_floor(usage.used),
            free: format_gb_floor(usage.total.saturating_sub(usage.used)),
        }
    }

    fn placeholder() -> Self {
        Self {
            total: PLACEHOLDER_TEXT.to_string(),
            used: PLACEHOLDER_TEXT.to_string(),
            free: PLACEHOLDER_TEXT.to_string(),
        }
    }
}

/// Aggregate snapshot of everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu: f64,
    pub containers: u32,
    pub cpu_info: CpuInfo,
    pub memory_info: MemoryInfo,
    pub os_info: OsInfo,
    pub storage_info: Vec<StorageEntry>,
    pub containers_info: Vec<ContainerEntry>,
}

impl SystemStats {
    /// Sentinel-valued snapshot shown before any fetch completes.
    /// `storage_info` and `containers_info` carry one placeholder entry
    /// each: panel code reads position 0 unconditionally.
    pub fn placeholder() -> Self {
        Self {
            cpu: 0.0,
            containers: 0,
            cpu_info: CpuInfo {
                brand: PLACEHOLDER_TEXT.to_string(),
                cores: 0,
                speed: PLACEHOLDER_TEXT.to_string(),
            },
            memory_info: MemoryInfo::placeholder(),
            os_info: OsInfo {
                platform: PLACEHOLDER_TEXT.to_string(),
                distro: PLACEHOLDER_TEXT.to_string(),
                architecture: PLACEHOLDER_TEXT.to_string(),
            },
            storage_info: vec![StorageEntry {
                fs: PLACEHOLDER_TEXT.to_string(),
                kind: PLACEHOLDER_TEXT.to_string(),
                size: 0,
                used: 0,
                used_percent: 0.0,
            }],
            containers_info: vec![ContainerEntry {
                name: PLACEHOLDER_TEXT.to_string(),
                tag: PLACEHOLDER_TEXT.to_string(),
                uptime: 0,
                status: PLACEHOLDER_TEXT.to_string(),
            }],
        }
    }
}

/// Footer strip data. The defaults stand in until the mount-time fetch
/// lands; either half may be replaced independently.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub location: String,
    pub timezone: String,
    pub uptime: String,
}

impl ServerInfo {
    pub fn placeholder() -> Self {
        Self {
            location: "US East".to_string(),
            timezone: "UTC-4".to_string(),
            uptime: "3d 14h 22m".to_string(),
        }
    }
}

/// Split containers into running and stopped buckets by exact status
/// match. Any other status ("paused", "restarting", ...) lands in neither
/// bucket.
pub fn partition_containers(
    list: &[ContainerEntry],
) -> (Vec<&ContainerEntry>, Vec<&ContainerEntry>) {
    let running = list.iter().filter(|c| c.status == STATUS_RUNNING).collect();
    let stopped = list.iter().filter(|c| c.status == STATUS_EXITED).collect();
    (running, stopped)
}

/// The closed set of metric kinds the dashboard drills into. Each kind maps
/// to a fixed display descriptor, so no untyped icon/color values travel
/// through the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cpu,
    Memory,
    Storage,
    Containers,
}

impl Metric {
    pub fn all() -> &'static [Metric] {
        &[Metric::Cpu, Metric::Memory, Metric::Storage, Metric::Containers]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage",
            Metric::Memory => "Memory Usage",
            Metric::Storage => "Storage Usage",
            Metric::Containers => "Container Status",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Metric::Cpu => "⚙",
            Metric::Memory => "▤",
            Metric::Storage => "⛁",
            Metric::Containers => "◫",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Metric::Cpu => Color::Blue,
            Metric::Memory => Color::Magenta,
            Metric::Storage => Color::Green,
            Metric::Containers => Color::LightBlue,
        }
    }

    /// Route key, as used by `servmon stats <key>`.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Storage => "storage",
            Metric::Containers => "containers",
        }
    }

    pub fn from_key(key: &str) -> Option<Metric> {
        Metric::all().iter().copied().find(|m| m.key() == key)
    }
}

/// Snapshot backing the detail screen. These are the fixed sample values
/// the drill-down shipped with; they are not wired to the live fetcher.
// TODO: feed this from the aggregate once the fetch layer records
// per-metric history instead of a single point.
#[derive(Debug, Clone)]
pub struct DetailSnapshot {
    pub cpu: f64,
    pub memory: f64,
    pub storage: f64,
    pub containers: u32,
    pub cpu_model: &'static str,
    pub cpu_cores: u32,
    pub cpu_speed: &'static str,
    pub memory_total: &'static str,
    pub memory_used: &'static str,
    pub memory_free: &'static str,
    pub platform: &'static str,
    pub version: &'static str,
    pub architecture: &'static str,
}

impl DetailSnapshot {
    pub fn sample() -> Self {
        Self {
            cpu: 45.0,
            memory: 68.0,
            storage: 72.0,
            containers: 3,
            cpu_model: "Intel Xeon E5-2680 v4",
            cpu_cores: 14,
            cpu_speed: "2.4 GHz",
            memory_total: "32 GB",
            memory_used: "21.76 GB",
            memory_free: "10.24 GB",
            platform: "Linux",
            version: "Ubuntu 22.04 LTS",
            architecture: "x86_64",
        }
    }

    /// Headline value for a metric, as a chartable number.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Memory => self.memory,
            Metric::Storage => self.storage,
            Metric::Containers => self.containers as f64,
        }
    }
}

/// X-axis labels for the detail chart.
pub const HISTORY_LABELS: [&str; 5] = ["1h ago", "45m ago", "30m ago", "15m ago", "Now"];

/// Five-point series rendered by the detail chart; the first four points
/// are seed history, the last is the metric's current value.
pub fn history_series(current: f64) -> [(f64, f64); 5] {
    [(0.0, 65.0), (1.0, 59.0), (2.0, 80.0), (3.0, 81.0), (4.0, current)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(name: &str, status: &str) -> ContainerEntry {
        ContainerEntry {
            name: name.to_string(),
            tag: "latest".to_string(),
            uptime: 7500,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_partition_is_exact_match_only() {
        let list = vec![
            container("web", "running"),
            container("db", "exited"),
            container("cache", "paused"),
        ];

        let (running, stopped) = partition_containers(&list);
        assert_eq!(running.len(), 1);
        assert_eq!(stopped.len(), 1);
        assert_eq!(running[0].name, "web");
        assert_eq!(stopped[0].name, "db");
        // "paused" is displayed in neither bucket
        assert_eq!(running.len() + stopped.len(), 2);
    }

    #[test]
    fn test_memory_info_floors() {
        let info = MemoryInfo::from_usage(&MemoryUsageBytes {
            total: 34_359_738_368,
            used: 17_179_869_184,
        });
        assert_eq!(info.total, "32 GB");
        assert_eq!(info.used, "16 GB");
        assert_eq!(info.free, "16 GB");
    }

    #[test]
    fn test_memory_free_floors_after_subtraction() {
        // used is one byte past 1 GiB, so free is one byte short of 1 GiB:
        // the subtraction-first form floors to 0 while independently
        // floored total/used would suggest 1.
        let gib = 1024u64 * 1024 * 1024;
        let info = MemoryInfo::from_usage(&MemoryUsageBytes {
            total: 2 * gib,
            used: gib + 1,
        });
        // floor(total - used) = floor(1 GiB - 1 byte) = 0
        assert_eq!(info.free, "0 GB");
        // while floor(total) - floor(used) = 2 - 1 = 1
        assert_eq!(info.total, "2 GB");
        assert_eq!(info.used, "1 GB");
    }

    #[test]
    fn test_placeholder_lists_never_empty() {
        let stats = SystemStats::placeholder();
        assert!(!stats.storage_info.is_empty());
        assert!(!stats.containers_info.is_empty());
    }

    #[test]
    fn test_metric_keys_roundtrip() {
        for metric in Metric::all() {
            assert_eq!(Metric::from_key(metric.key()), Some(*metric));
        }
        assert_eq!(Metric::from_key("network"), None);
    }

    #[test]
    fn test_history_series_ends_at_current() {
        let series = history_series(45.0);
        assert_eq!(series.len(), 5);
        assert_eq!(series[4], (4.0, 45.0));
    }
}
