/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Check execution
    pub const CHECK_TIMEOUT_SECS: u64 = 30;

    // Logging
    pub const DEFAULT_LOG_FILTER: &'static str = "ifsentry=info";
}
