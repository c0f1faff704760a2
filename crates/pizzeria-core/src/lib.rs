//! Domain core for the pizzeria checkout client.
//!
//! Holds the menu catalog, the line-item builder, the order accumulator and
//! its JSON wire format, plus configuration loading. Nothing here performs
//! I/O beyond reading environment variables.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod customer;
pub mod error;
pub mod line_item;
pub mod order;

mod wire;

pub use app_config::AppConfig;
pub use catalog::{resolve_size, resolve_topping, topping_names, SizeCode, Topping};
pub use config::{load_app_config, load_app_config_from_env};
pub use customer::{normalize_phone, Customer};
pub use error::{ConfigError, OrderError};
pub use line_item::{build_line_item, LineItem};
pub use order::{Address, OrderAccumulator, OrderDefaults, PriceQuote, ORDER_DEFAULTS};
