//! Response types for the commerce and tracker endpoints.
//!
//! ## Observed locator shape
//!
//! `GET power/store-locator` returns `{"Address": {...}, "Stores": [...]}`.
//! Each store carries `StoreID` as a string, an `AddressDescription` with
//! embedded `\n` line breaks, and `IsOnlineNow`. The echoed `Address` is the
//! service's normalized spelling of the query and may omit `Type`.

use pizzeria_core::Address;
use serde::Deserialize;
use serde_json::Value;

/// Top-level response from the store locator.
#[derive(Debug, Deserialize)]
pub(crate) struct LocatorResponse {
    #[serde(rename = "Address", default)]
    pub address: Option<Address>,
    #[serde(rename = "Stores")]
    pub stores: Vec<RawStore>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStore {
    #[serde(rename = "StoreID")]
    pub store_id: String,
    #[serde(rename = "AddressDescription", default)]
    pub address_description: String,
    /// Absent means the store is not taking online orders.
    #[serde(rename = "IsOnlineNow", default)]
    pub is_online_now: bool,
}

/// A candidate store returned by a locate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: String,
    /// Raw multi-line description; use [`Store::display_line`] for output.
    pub address_description: String,
    pub is_online: bool,
}

impl From<RawStore> for Store {
    fn from(raw: RawStore) -> Self {
        Self {
            id: raw.store_id,
            address_description: raw.address_description,
            is_online: raw.is_online_now,
        }
    }
}

impl Store {
    /// Single-line form of the address description: the first line break
    /// becomes `" - "`, any further ones a space.
    #[must_use]
    pub fn display_line(&self) -> String {
        self.address_description
            .trim_end()
            .replacen('\n', " - ", 1)
            .replace(['\r', '\n'], " ")
    }
}

/// Result of a locate call: online stores in service order plus the
/// normalized address the locator echoed back, if any.
#[derive(Debug, Clone)]
pub struct StoreLookup {
    pub stores: Vec<Store>,
    pub address: Option<Address>,
}

/// Outcome of a successful place-order call.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub status: u16,
    /// `Order.OrderID` from the response, when the service assigned one.
    pub order_id: Option<String>,
    pub body: Value,
}

/// One order reported by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusEntry {
    /// Status token, e.g. `"Being Prepared"`.
    pub status: String,
    pub order_id: Option<String>,
    pub store_id: Option<String>,
    pub description: Option<String>,
}
