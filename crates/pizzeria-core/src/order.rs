//! The order accumulator: every field the commerce API needs, filled in as
//! the checkout advances.
//!
//! Ordering rules enforced here:
//! - products can only be added once a store is set;
//! - products are frozen once validation has been requested
//!   ([`OrderAccumulator::lock_products`]); [`OrderAccumulator::clear_products`]
//!   is the only way to start the cart over;
//! - amounts only ever come from a [`PriceQuote`], which has no public
//!   constructor and is produced by deserializing a pricing response.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::line_item::LineItem;
use crate::wire;
use crate::OrderError;

/// Charge category that holds the amount the customer pays.
pub const PAYMENT_CATEGORY: &str = "Payment";

/// Delivery address, in the commerce API's field names.
///
/// Unknown fields are ignored and missing ones default to empty, so the
/// normalized address echoed back by the store locator deserializes too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    /// Dwelling type, e.g. `"House"` or `"Apartment"`.
    #[serde(rename = "Type")]
    pub dwelling_type: String,
}

impl Address {
    #[must_use]
    pub fn new(
        street: &str,
        city: &str,
        region: &str,
        postal_code: &str,
        dwelling_type: &str,
    ) -> Self {
        Self {
            street: street.to_owned(),
            city: city.to_owned(),
            region: region.to_owned(),
            postal_code: postal_code.to_owned(),
            dwelling_type: dwelling_type.to_owned(),
        }
    }

    /// `true` when every field is non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            &self.street,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.dwelling_type,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Charge category → amount, exactly as returned by the pricing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceQuote {
    amounts: BTreeMap<String, Decimal>,
}

impl PriceQuote {
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.amounts.get(category).copied()
    }

    /// The amount due, if the quote carries one.
    #[must_use]
    pub fn payment(&self) -> Option<Decimal> {
        self.get(PAYMENT_CATEGORY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.amounts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub(crate) fn amounts(&self) -> &BTreeMap<String, Decimal> {
        &self.amounts
    }
}

/// Schema constants the commerce API requires on every order. Set once by
/// [`OrderAccumulator::new`] and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDefaults {
    pub language_code: &'static str,
    pub order_channel: &'static str,
    pub order_method: &'static str,
    pub service_method: &'static str,
    pub source_organization_uri: &'static str,
    pub version: &'static str,
    pub no_combine: bool,
}

pub const ORDER_DEFAULTS: OrderDefaults = OrderDefaults {
    language_code: "en",
    order_channel: "OLO",
    order_method: "Web",
    service_method: "Delivery",
    source_organization_uri: "order.dominos.ca",
    version: "1.0",
    no_combine: true,
};

/// The mutable order record for one checkout session.
#[derive(Debug, Clone)]
pub struct OrderAccumulator {
    address: Address,
    customer: Customer,
    store_id: String,
    products: Vec<LineItem>,
    amounts: Option<PriceQuote>,
    products_locked: bool,
    defaults: OrderDefaults,
}

impl Default for OrderAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderAccumulator {
    /// Creates an empty order carrying the fixed schema defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            address: Address::default(),
            customer: Customer::default(),
            store_id: String::new(),
            products: Vec::new(),
            amounts: None,
            products_locked: false,
            defaults: ORDER_DEFAULTS,
        }
    }

    /// Overwrites the delivery address. No format checks happen locally; the
    /// remote validate call is the authority.
    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    /// Overwrites the store id. The caller is responsible for the id coming
    /// from a lookup against the current address.
    pub fn set_store(&mut self, store_id: &str) {
        self.store_id = store_id.to_owned();
    }

    pub fn set_customer(&mut self, customer: Customer) {
        self.customer = customer;
    }

    /// Appends a line item.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Incomplete`] if no store has been set.
    /// - [`OrderError::ProductsLocked`] if validation has been requested.
    /// - [`OrderError::DuplicateLineItem`] if an item with the same id exists.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), OrderError> {
        self.require_store()?;
        if self.products_locked {
            return Err(OrderError::ProductsLocked);
        }
        if self.products.iter().any(|p| p.id == item.id) {
            return Err(OrderError::DuplicateLineItem(item.id));
        }
        self.products.push(item);
        Ok(())
    }

    /// Id to hand to the next built line item: its position in the cart.
    #[must_use]
    pub fn next_line_item_id(&self) -> u32 {
        u32::try_from(self.products.len()).unwrap_or(u32::MAX)
    }

    /// Freezes the product list; called when validation is requested.
    pub fn lock_products(&mut self) {
        self.products_locked = true;
    }

    /// Reverses [`Self::lock_products`] when a validation request never
    /// completed.
    pub fn unlock_products(&mut self) {
        self.products_locked = false;
    }

    /// Empties and unlocks the cart. Any previous quote is discarded since it
    /// priced the old products.
    pub fn clear_products(&mut self) {
        self.products.clear();
        self.products_locked = false;
        self.amounts = None;
    }

    pub fn set_price_quote(&mut self, quote: PriceQuote) {
        self.amounts = Some(quote);
    }

    /// The `Payment` amount from the last pricing round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::PriceNotAvailable`] if the order has not been
    /// priced or the quote has no `Payment` entry.
    pub fn total(&self) -> Result<Decimal, OrderError> {
        self.amounts
            .as_ref()
            .and_then(PriceQuote::payment)
            .ok_or(OrderError::PriceNotAvailable)
    }

    /// # Errors
    ///
    /// Returns [`OrderError::Incomplete`] if the store id is empty.
    pub fn require_store(&self) -> Result<&str, OrderError> {
        if self.store_id.trim().is_empty() {
            return Err(OrderError::Incomplete("store"));
        }
        Ok(&self.store_id)
    }

    /// Serializes the order object (without the `{"Order": ...}` envelope).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Serialize`] if JSON encoding fails.
    pub fn to_wire_format(&self) -> Result<Vec<u8>, OrderError> {
        wire::encode_order(self)
    }

    /// Serializes the request body for the validate, price and place calls:
    /// `{"Order": <wire format>}`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Serialize`] if JSON encoding fails.
    pub fn to_request_body(&self) -> Result<Vec<u8>, OrderError> {
        wire::encode_request(self)
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    #[must_use]
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    #[must_use]
    pub fn products(&self) -> &[LineItem] {
        &self.products
    }

    #[must_use]
    pub fn price_quote(&self) -> Option<&PriceQuote> {
        self.amounts.as_ref()
    }

    #[must_use]
    pub fn products_locked(&self) -> bool {
        self.products_locked
    }

    #[must_use]
    pub fn defaults(&self) -> &OrderDefaults {
        &self.defaults
    }
}
