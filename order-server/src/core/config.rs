/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/washam | Store file and logs |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ADMIN_ACCESS_KEY | (empty) | Admin dashboard shared secret |
/// | RESEND_API_KEY | (unset) | Email provider key; notifications off when unset |
/// | ADMIN_EMAIL | (unset) | Recipient of order-created notifications |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | tracing level filter |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/washam HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the store file and log output
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Shared secret for the admin dashboard gate. An empty key means the
    /// gate never opens.
    pub admin_access_key: String,
    /// Resend API key; email notifications are disabled when unset
    pub resend_api_key: Option<String>,
    /// Recipient of order-created notifications
    pub admin_email: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults when unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/washam".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            admin_access_key: std::env::var("ADMIN_ACCESS_KEY").unwrap_or_default(),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Override the fields tests care about.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Path of the order store file inside the working directory.
    pub fn store_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("orders.redb")
    }
}
