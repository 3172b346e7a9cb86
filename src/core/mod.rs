pub mod api;
pub mod fetch;
pub mod stats;

pub use api::{ApiClient, ApiError};
pub use fetch::{Page, PageState};
pub use stats::{Metric, SystemStats};
