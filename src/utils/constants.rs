/// Backend endpoint paths and display constants
///
/// The monitoring backend exposes a small REST surface; every path the
/// client touches is defined here so the fetch layer and the tests agree
/// on a single spelling.

/// Default backend base URL when neither flag, env nor config file set one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Environment variable overriding the backend base URL (a `.env` file is
/// honored via dotenv before the variable is read).
pub const ENV_BACKEND_URL: &str = "SERVMON_BACKEND_URL";

/// Environment variable overriding the host name sent to the reachability
/// probe. Defaults to the host component of the backend URL.
pub const ENV_HOST: &str = "SERVMON_HOST";

// REST endpoints, relative to the base URL
pub const PING_PATH: &str = "/api/ping/pingHost";
pub const SERVER_INFO_PATH: &str = "/api/server/info";
pub const SERVER_LOCATION_PATH: &str = "/api/server/location";
pub const SERVER_UPTIME_PATH: &str = "/api/server/uptime";
pub const CPU_INFO_PATH: &str = "/api/cpu/info";
pub const CPU_USAGE_PATH: &str = "/api/cpu/usage";
pub const MEMORY_USAGE_PATH: &str = "/api/memory/usage";
pub const STORAGE_INFO_PATH: &str = "/api/storage/info";
pub const CONTAINERS_PATH: &str = "/api/docker/containers";

/// Container status values the panels bucket on. Anything else is shown in
/// neither bucket.
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_EXITED: &str = "exited";

/// Request timeout applied client-wide; there is no per-request retry.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// UI event-poll tick.
pub const TICK_RATE_MS: u64 = 250;

/// Sentinel text shown in fields that have not been populated yet.
pub const PLACEHOLDER_TEXT: &str = "------";

pub const GIB: u64 = 1024 * 1024 * 1024;
