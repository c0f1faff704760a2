//! Store directory: find the stores that deliver to an address and pick one.

use pizzeria_core::{Address, OrderError, ORDER_DEFAULTS};

use crate::client::PowerClient;
use crate::error::CheckoutError;
use crate::types::{LocatorResponse, Store, StoreLookup};

const LOCATOR_PATH: &str = "power/store-locator";

/// Store lookups against the locator endpoint.
pub struct StoreDirectory<'a> {
    client: &'a PowerClient,
}

impl<'a> StoreDirectory<'a> {
    #[must_use]
    pub fn new(client: &'a PowerClient) -> Self {
        Self { client }
    }

    /// Looks up delivery stores for `address`, keeping only those online now.
    ///
    /// Stores are returned in the order the locator sent them; proximity
    /// ranking is the service's job.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Order`] if `address` has a blank field.
    /// - [`CheckoutError::Http`] on network failure or non-2xx status.
    /// - [`CheckoutError::Deserialize`] if the body is not a locator response.
    /// - [`CheckoutError::NoStoresAvailable`] if no online store remains.
    pub async fn locate(&self, address: &Address) -> Result<StoreLookup, CheckoutError> {
        if !address.is_complete() {
            return Err(OrderError::Incomplete("address").into());
        }

        let city_line = locator_city_line(address);
        let url = self.client.api_url(
            LOCATOR_PATH,
            &[
                ("type", ORDER_DEFAULTS.service_method),
                ("c", city_line.as_str()),
                ("s", address.street.as_str()),
            ],
        );
        let body = self.client.get_json(&url, "store-locator").await?;
        let response: LocatorResponse =
            serde_json::from_value(body).map_err(|e| CheckoutError::Deserialize {
                context: "store-locator".to_owned(),
                source: e,
            })?;

        let total = response.stores.len();
        let stores: Vec<Store> = response
            .stores
            .into_iter()
            .map(Store::from)
            .filter(|store| store.is_online)
            .collect();
        tracing::info!(total, online = stores.len(), "store lookup complete");

        if stores.is_empty() {
            return Err(CheckoutError::NoStoresAvailable);
        }

        Ok(StoreLookup {
            stores,
            address: response.address,
        })
    }

    /// Picks a store by its 1-based position in `stores`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidSelection`] unless
    /// `1 <= choice <= stores.len()`.
    pub fn select(stores: &[Store], choice: usize) -> Result<&Store, CheckoutError> {
        choice
            .checked_sub(1)
            .and_then(|index| stores.get(index))
            .ok_or(CheckoutError::InvalidSelection {
                choice,
                available: stores.len(),
            })
    }
}

/// The locator's `c` parameter: `"{city},{region}{postal}"`.
fn locator_city_line(address: &Address) -> String {
    format!("{},{}{}", address.city, address.region, address.postal_code)
}
