/// Ping gate, stats batch and the page state machine
///
/// The dashboard lifecycle is a small explicit state machine instead of a
/// scatter of booleans: one state per page, advanced only through the named
/// transition functions below, with `loading` derived from the state. The
/// probe result is a one-way latch for the page lifetime; only the manual
/// re-ping action enters `Probing` again.

use log::error;
use serde_json::Value;

use crate::core::api::{ApiClient, ApiError};
use crate::core::stats::{
    ContainerEntry, CpuInfo, LocationInfo, MemoryInfo, MemoryUsage, OsInfo, ServerInfo,
    StorageEntry, SystemStats, UptimeInfo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Probing,
    /// Probe failed or came back falsy. Terminal until a manual re-ping.
    Unreachable,
    Reachable,
    Fetching,
    /// Batch abandoned; the aggregate keeps its prior values.
    FetchFailed,
    FetchSucceeded,
}

#[derive(Debug)]
pub struct Page {
    state: PageState,
}

impl Page {
    pub fn new() -> Self {
        Self { state: PageState::Idle }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// The single loading predicate the skeletons key off.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Probing | PageState::Fetching)
    }

    /// True once the gate has opened, in this or any later state.
    pub fn is_reachable(&self) -> bool {
        matches!(
            self.state,
            PageState::Reachable
                | PageState::Fetching
                | PageState::FetchFailed
                | PageState::FetchSucceeded
        )
    }

    /// Enter `Probing`. Allowed initially and from any settled state (the
    /// manual re-ping); refused while a probe or fetch is in flight.
    pub fn begin_probe(&mut self) -> bool {
        match self.state {
            PageState::Idle
            | PageState::Unreachable
            | PageState::FetchFailed
            | PageState::FetchSucceeded => {
                self.state = PageState::Probing;
                true
            }
            _ => false,
        }
    }

    pub fn probe_succeeded(&mut self) {
        if self.state == PageState::Probing {
            self.state = PageState::Reachable;
        }
    }

    pub fn probe_failed(&mut self) {
        if self.state == PageState::Probing {
            self.state = PageState::Unreachable;
        }
    }

    /// Enter `Fetching`. Only legal from `Reachable`, which makes the batch
    /// fire exactly once per opened gate.
    pub fn begin_fetch(&mut self) -> bool {
        if self.state == PageState::Reachable {
            self.state = PageState::Fetching;
            true
        } else {
            false
        }
    }

    pub fn fetch_succeeded(&mut self) {
        if self.state == PageState::Fetching {
            self.state = PageState::FetchSucceeded;
        }
    }

    pub fn fetch_failed(&mut self) {
        if self.state == PageState::Fetching {
            self.state = PageState::FetchFailed;
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// JS-style truthiness, applied to the ping response body.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Run the gate probe once. Failures are logged here and collapse to
/// "unreachable"; nothing propagates to the widget tree.
pub async fn probe_host(client: &ApiClient, host: &str) -> bool {
    match client.ping_host(host).await {
        Ok(body) => is_truthy(&body),
        Err(e) => {
            error!("ping probe failed for {}: {}", host, e);
            false
        }
    }
}

/// The settled bodies of one stats batch.
#[derive(Debug)]
pub struct StatsBatch {
    pub os_info: OsInfo,
    pub cpu_info: CpuInfo,
    pub cpu_usage: Value,
    pub memory: MemoryUsage,
    pub storage: Vec<StorageEntry>,
    pub containers: Vec<ContainerEntry>,
}

/// Issue the fixed batch of six concurrent GETs and wait for all of them
/// to settle before reading any result. All-or-nothing: the first error in
/// the fixed order abandons the batch and no partial state escapes.
pub async fn fetch_stats(client: &ApiClient) -> Result<StatsBatch, ApiError> {
    let (os, cpu, cpu_usage, memory, storage, containers) = tokio::join!(
        client.server_info(),
        client.cpu_info(),
        client.cpu_usage(),
        client.memory_usage(),
        client.storage_info(),
        client.containers(),
    );

    Ok(StatsBatch {
        os_info: os?,
        cpu_info: cpu?,
        cpu_usage: cpu_usage?,
        memory: memory?,
        storage: storage?,
        containers: containers?,
    })
}

/// Merge a settled batch into the aggregate. A shallow replacement of the
/// fetched sections; the `cpu` and `containers` counters are not part of
/// the merge — the CPU usage response is joined with the batch but its
/// value never lands in the aggregate.
pub fn merge_batch(stats: &mut SystemStats, batch: StatsBatch) {
    stats.os_info = batch.os_info;
    stats.cpu_info = batch.cpu_info;
    stats.memory_info = MemoryInfo::from_usage(&batch.memory.usage);
    // panel code indexes entry 0; an empty backend list keeps the sentinel
    if !batch.storage.is_empty() {
        stats.storage_info = batch.storage;
    }
    if !batch.containers.is_empty() {
        stats.containers_info = batch.containers;
    }
}

/// Footer data fetched on mount, independent of the ping gate. Each half
/// applies on its own so one failing endpoint does not blank the other.
#[derive(Debug, Default)]
pub struct FooterUpdate {
    pub location: Option<LocationInfo>,
    pub uptime: Option<UptimeInfo>,
}

pub async fn fetch_server_info(client: &ApiClient) -> FooterUpdate {
    let (location, uptime) = tokio::join!(client.server_location(), client.server_uptime());

    FooterUpdate {
        location: match location {
            Ok(l) => Some(l),
            Err(e) => {
                error!("location fetch failed: {}", e);
                None
            }
        },
        uptime: match uptime {
            Ok(u) => Some(u),
            Err(e) => {
                error!("uptime fetch failed: {}", e);
                None
            }
        },
    }
}

pub fn apply_footer(info: &mut ServerInfo, update: FooterUpdate) {
    if let Some(l) = update.location {
        info.location = format!("{} {} {}", l.city, l.region, l.country);
    }
    if let Some(u) = update.uptime {
        info.uptime = u.uptime;
        info.timezone = u.timezone;
    }
}
