/// REST client for the monitoring backend
///
/// One method per endpoint the dashboard consumes. The backend is the only
/// source of metric data; nothing is sampled locally.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::stats::{
    ContainerEntry, CpuInfo, LocationInfo, MemoryUsage, OsInfo, StorageEntry, UptimeInfo,
};
use crate::utils::constants::{
    CONTAINERS_PATH, CPU_INFO_PATH, CPU_USAGE_PATH, HTTP_TIMEOUT_SECS, MEMORY_USAGE_PATH,
    PING_PATH, SERVER_INFO_PATH, SERVER_LOCATION_PATH, SERVER_UPTIME_PATH, STORAGE_INFO_PATH,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    BadStatus(StatusCode),
    #[error("invalid JSON body: {0}")]
    Parse(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON body, requiring a success status.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus(status));
        }

        response.json::<T>().await.map_err(ApiError::Parse)
    }

    /// GET a JSON body without inspecting the status first. The batch only
    /// status-checks the os/cpu/memory responses; the others are decoded
    /// regardless, so an error body that happens to parse still flows
    /// through.
    async fn get_json_lenient<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::Network)?;

        response.json::<T>().await.map_err(ApiError::Parse)
    }

    /// Reachability probe. Returns the raw JSON body; the gate applies the
    /// truthiness test.
    pub async fn ping_host(&self, host: &str) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(self.url(PING_PATH))
            .query(&[("host", host)])
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus(status));
        }

        response.json::<Value>().await.map_err(ApiError::Parse)
    }

    pub async fn server_info(&self) -> Result<OsInfo, ApiError> {
        self.get_json(SERVER_INFO_PATH).await
    }

    pub async fn server_location(&self) -> Result<LocationInfo, ApiError> {
        self.get_json(SERVER_LOCATION_PATH).await
    }

    pub async fn server_uptime(&self) -> Result<UptimeInfo, ApiError> {
        self.get_json(SERVER_UPTIME_PATH).await
    }

    pub async fn cpu_info(&self) -> Result<CpuInfo, ApiError> {
        self.get_json(CPU_INFO_PATH).await
    }

    /// Current CPU usage. Joined with the batch but never merged into the
    /// aggregate; kept as raw JSON.
    pub async fn cpu_usage(&self) -> Result<Value, ApiError> {
        self.get_json_lenient(CPU_USAGE_PATH).await
    }

    pub async fn memory_usage(&self) -> Result<MemoryUsage, ApiError> {
        self.get_json(MEMORY_USAGE_PATH).await
    }

    pub async fn storage_info(&self) -> Result<Vec<StorageEntry>, ApiError> {
        self.get_json_lenient(STORAGE_INFO_PATH).await
    }

    pub async fn containers(&self) -> Result<Vec<ContainerEntry>, ApiError> {
        self.get_json_lenient(CONTAINERS_PATH).await
    }
}
