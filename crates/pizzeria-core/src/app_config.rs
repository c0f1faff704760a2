/// Runtime settings for the client, read from `PIZZERIA_*` environment
/// variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the commerce API; `power/...` paths are joined onto it.
    pub api_base_url: String,
    /// Root of the order tracker; `orderstorage/...` paths are joined onto it.
    pub tracker_base_url: String,
    pub log_level: String,
    pub user_agent: String,
    /// Whole-request timeout. `None` means requests may block indefinitely.
    pub request_timeout_secs: Option<u64>,
}
