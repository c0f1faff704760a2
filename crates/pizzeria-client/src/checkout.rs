//! Checkout workflow: drives one [`OrderAccumulator`] through the legal
//! sequence of address, store, cart, validation, pricing, confirmation and
//! placement.
//!
//! Every step checks the current [`CheckoutState`] and fails with
//! [`CheckoutError::OutOfOrder`] otherwise. A remote step that fails leaves
//! the state where it was, so the caller may retry it.

use std::fmt;

use pizzeria_core::{build_line_item, Address, Customer, LineItem, OrderAccumulator, OrderError};
use rust_decimal::Decimal;

use crate::client::PowerClient;
use crate::error::CheckoutError;
use crate::stores::StoreDirectory;
use crate::types::{PlacedOrder, Store};

/// Position of a [`Checkout`] in the ordering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Empty,
    AddressSet,
    StoresLocated,
    StoreSelected,
    CartBuilt,
    Validated,
    Priced,
    Confirmed,
    Placed,
    /// Confirmation was declined. Terminal.
    Aborted,
}

impl CheckoutState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::AddressSet => "address-set",
            Self::StoresLocated => "stores-located",
            Self::StoreSelected => "store-selected",
            Self::CartBuilt => "cart-built",
            Self::Validated => "validated",
            Self::Priced => "priced",
            Self::Confirmed => "confirmed",
            Self::Placed => "placed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkout session against the commerce API.
pub struct Checkout<'a> {
    client: &'a PowerClient,
    order: OrderAccumulator,
    state: CheckoutState,
    candidates: Vec<Store>,
}

impl<'a> Checkout<'a> {
    #[must_use]
    pub fn new(client: &'a PowerClient) -> Self {
        Self {
            client,
            order: OrderAccumulator::new(),
            state: CheckoutState::Empty,
            candidates: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    #[must_use]
    pub fn order(&self) -> &OrderAccumulator {
        &self.order
    }

    /// Online stores from the last locate call, in service order. Emptied
    /// once a store is selected.
    #[must_use]
    pub fn candidates(&self) -> &[Store] {
        &self.candidates
    }

    #[must_use]
    pub fn into_order(self) -> OrderAccumulator {
        self.order
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[CheckoutState],
    ) -> Result<(), CheckoutError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(CheckoutError::OutOfOrder {
                operation,
                state: self.state,
            })
        }
    }

    fn advance(&mut self, next: CheckoutState) {
        tracing::debug!(from = %self.state, to = %next, "checkout transition");
        self.state = next;
    }

    /// Records the delivery address. Only allowed on a fresh checkout.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless the checkout is empty.
    pub fn set_address(&mut self, address: Address) -> Result<(), CheckoutError> {
        self.expect_state("set the address", &[CheckoutState::Empty])?;
        self.order.set_address(address);
        self.advance(CheckoutState::AddressSet);
        Ok(())
    }

    /// Looks up online stores for the recorded address.
    ///
    /// When the locator echoes a normalized address it replaces the order's
    /// address; fields the echo leaves blank keep the user's value.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless the address is set, plus any
    /// error from [`StoreDirectory::locate`].
    pub async fn locate_stores(&mut self) -> Result<&[Store], CheckoutError> {
        self.expect_state("locate stores", &[CheckoutState::AddressSet])?;

        let lookup = StoreDirectory::new(self.client)
            .locate(self.order.address())
            .await?;

        if let Some(echoed) = lookup.address {
            let merged = merge_address(self.order.address(), echoed);
            self.order.set_address(merged);
        }
        self.candidates = lookup.stores;
        self.advance(CheckoutState::StoresLocated);
        Ok(&self.candidates)
    }

    /// Picks the store at 1-based `choice` among the located candidates.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless stores were located;
    /// [`CheckoutError::InvalidSelection`] if `choice` is out of range, in
    /// which case the candidates are kept for another attempt.
    pub fn select_store(&mut self, choice: usize) -> Result<Store, CheckoutError> {
        self.expect_state("select a store", &[CheckoutState::StoresLocated])?;
        let store = StoreDirectory::select(&self.candidates, choice)?.clone();

        self.order.set_store(&store.id);
        self.candidates.clear();
        tracing::info!(store_id = %store.id, "store selected");
        self.advance(CheckoutState::StoreSelected);
        Ok(store)
    }

    /// Adds a prepared line item to the cart.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] before a store is selected or after
    /// validation; [`CheckoutError::Order`] if the accumulator rejects it.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), CheckoutError> {
        self.expect_state(
            "add a pizza",
            &[CheckoutState::StoreSelected, CheckoutState::CartBuilt],
        )?;
        self.order.add_line_item(item)?;
        self.advance(CheckoutState::CartBuilt);
        Ok(())
    }

    /// Builds a pizza from raw size and topping input and adds it to the
    /// cart. Returns the item as stored.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::Order`] with [`OrderError::UnresolvedSize`] if `size`
    /// names no known size, otherwise as [`Self::add_line_item`].
    pub fn add_pizza<S: AsRef<str>>(
        &mut self,
        size: &str,
        toppings: &[S],
    ) -> Result<&LineItem, CheckoutError> {
        self.expect_state(
            "add a pizza",
            &[CheckoutState::StoreSelected, CheckoutState::CartBuilt],
        )?;
        let item = build_line_item(size, toppings, self.order.next_line_item_id())?;
        self.add_line_item(item)?;
        self.order
            .products()
            .last()
            .ok_or(CheckoutError::Order(OrderError::Incomplete("products")))
    }

    /// Asks the service to validate the order. Products are frozen while the
    /// request is in flight and stay frozen only if it succeeds.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless the cart has at least one pizza,
    /// plus any error from [`PowerClient::validate_order`].
    pub async fn validate(&mut self) -> Result<(), CheckoutError> {
        self.expect_state("validate the order", &[CheckoutState::CartBuilt])?;

        self.order.lock_products();
        if let Err(e) = self.client.validate_order(&self.order).await {
            self.order.unlock_products();
            tracing::warn!(error = %e, "order validation failed");
            return Err(e);
        }

        tracing::info!(
            store_id = %self.order.store_id(),
            products = self.order.products().len(),
            "order validated"
        );
        self.advance(CheckoutState::Validated);
        Ok(())
    }

    /// Prices the validated order and returns the amount due.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless validated;
    /// [`CheckoutError::Order`] if the quote carries no `Payment`; plus any
    /// error from [`PowerClient::price_order`].
    pub async fn price(&mut self) -> Result<Decimal, CheckoutError> {
        self.expect_state("price the order", &[CheckoutState::Validated])?;
        self.order.require_store()?;

        let quote = self.client.price_order(&self.order).await?;
        let total = quote.payment().ok_or(OrderError::PriceNotAvailable)?;
        self.order.set_price_quote(quote);

        tracing::info!(%total, "order priced");
        self.advance(CheckoutState::Priced);
        Ok(total)
    }

    /// Records the user's answer to the price confirmation.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless priced;
    /// [`CheckoutError::UserAbort`] when `accepted` is false, after which the
    /// checkout is [`CheckoutState::Aborted`].
    pub fn confirm(&mut self, accepted: bool) -> Result<(), CheckoutError> {
        self.expect_state("confirm the order", &[CheckoutState::Priced])?;
        if accepted {
            self.advance(CheckoutState::Confirmed);
            Ok(())
        } else {
            tracing::info!("order declined at confirmation");
            self.advance(CheckoutState::Aborted);
            Err(CheckoutError::UserAbort)
        }
    }

    /// Attaches customer contact details. Allowed once confirmed and may be
    /// repeated until the order is placed.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless confirmed.
    pub fn set_customer(&mut self, customer: Customer) -> Result<(), CheckoutError> {
        self.expect_state("set customer details", &[CheckoutState::Confirmed])?;
        self.order.set_customer(customer);
        Ok(())
    }

    /// Places the confirmed order.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfOrder`] unless confirmed;
    /// [`CheckoutError::Order`] if the store or customer phone is missing;
    /// plus any error from [`PowerClient::place_order`].
    pub async fn place(&mut self) -> Result<PlacedOrder, CheckoutError> {
        self.expect_state("place the order", &[CheckoutState::Confirmed])?;
        self.order.require_store()?;
        if self.order.customer().phone.is_empty() {
            return Err(OrderError::Incomplete("customer").into());
        }

        let placed = self.client.place_order(&self.order).await?;
        tracing::info!(
            status = placed.status,
            order_id = placed.order_id.as_deref().unwrap_or("-"),
            "order placed"
        );
        self.advance(CheckoutState::Placed);
        Ok(placed)
    }
}

/// Takes the locator's spelling of each field, keeping `ours` where the echo
/// is blank.
fn merge_address(ours: &Address, echoed: Address) -> Address {
    let pick = |theirs: String, mine: &str| {
        if theirs.trim().is_empty() {
            mine.to_owned()
        } else {
            theirs
        }
    };
    Address {
        street: pick(echoed.street, &ours.street),
        city: pick(echoed.city, &ours.city),
        region: pick(echoed.region, &ours.region),
        postal_code: pick(echoed.postal_code, &ours.postal_code),
        dwelling_type: pick(echoed.dwelling_type, &ours.dwelling_type),
    }
}
