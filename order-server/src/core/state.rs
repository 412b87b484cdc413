use std::sync::Arc;

use crate::core::Config;
use crate::notify::{NoopNotifier, Notifier, ResendNotifier};
use crate::store::OrderStore;

/// Server state - the shared handles every request sees
///
/// Explicitly constructed once at process start and shared by reference
/// (cheap `Clone`, the store is an `Arc` internally). Handlers receive it
/// through axum's `State` extractor rather than a process-global.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | store | Order store (redb) |
/// | notifier | Order-created email sink |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Order store
    pub store: OrderStore,
    /// Order-created notification sink
    pub notifier: Arc<dyn Notifier>,
}

impl ServerState {
    /// Initialize state from configuration: create the working directory,
    /// open the store, and wire the notifier.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = OrderStore::open(config.store_path())?;

        let notifier: Arc<dyn Notifier> =
            match (config.resend_api_key.as_deref(), config.admin_email.as_deref()) {
                (Some(api_key), Some(admin_email)) => {
                    tracing::info!(recipient = %admin_email, "Email notifications enabled");
                    Arc::new(ResendNotifier::new(api_key, admin_email))
                }
                _ => {
                    tracing::info!("Email notifications disabled (RESEND_API_KEY/ADMIN_EMAIL unset)");
                    Arc::new(NoopNotifier)
                }
            };

        Ok(Self {
            config: config.clone(),
            store,
            notifier,
        })
    }
}
