//! Client for the pizzeria commerce API and order tracker.
//!
//! [`PowerClient`] performs the HTTP round-trips, [`StoreDirectory`] finds
//! stores for an address, and [`Checkout`] sequences a whole order from
//! address to placement. The tracker is independent of any checkout; see
//! [`PowerClient::track_orders`].

pub mod checkout;
pub mod client;
mod commerce;
pub mod error;
pub mod stores;
pub mod tracker;
pub mod types;

pub use checkout::{Checkout, CheckoutState};
pub use client::PowerClient;
pub use error::{CheckoutError, ErrorKind};
pub use stores::StoreDirectory;
pub use tracker::parse_tracker_response;
pub use types::{OrderStatusEntry, PlacedOrder, Store, StoreLookup};
