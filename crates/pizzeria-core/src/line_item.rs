//! Pizza line items and the builder that turns raw prompt input into one.

use std::collections::BTreeMap;

use crate::catalog::{resolve_size, resolve_topping, SizeCode, Topping};
use crate::OrderError;

/// Delimiter between toppings in a single line of user input.
pub const TOPPING_DELIMITER: char = ',';

/// One pizza within an order.
///
/// Identical pizzas are never merged: two medium pepperoni pizzas are two
/// line items with distinct ids and `quantity == 1` each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub size: SizeCode,
    /// Topping occurrences in input order; a repeated topping is a double portion.
    pub toppings: Vec<Topping>,
    pub quantity: u32,
    /// Position-assigned id, unique within the owning order.
    pub id: u32,
    pub instructions: String,
}

impl LineItem {
    /// Topping code → number of units, in code order.
    #[must_use]
    pub fn topping_units(&self) -> BTreeMap<&'static str, u32> {
        let mut units = BTreeMap::new();
        for topping in &self.toppings {
            *units.entry(topping.code()).or_insert(0) += 1;
        }
        units
    }
}

/// Builds a line item from a size name and raw topping input.
///
/// Each element of `raw_toppings` is split on [`TOPPING_DELIMITER`] and every
/// token is resolved through the catalog; tokens that match nothing are
/// dropped without error.
///
/// # Errors
///
/// Returns [`OrderError::UnresolvedSize`] when `size` matches no known size.
pub fn build_line_item<S: AsRef<str>>(
    size: &str,
    raw_toppings: &[S],
    next_id: u32,
) -> Result<LineItem, OrderError> {
    let size =
        resolve_size(size).ok_or_else(|| OrderError::UnresolvedSize(size.trim().to_owned()))?;

    let toppings = raw_toppings
        .iter()
        .flat_map(|raw| raw.as_ref().split(TOPPING_DELIMITER))
        .filter_map(resolve_topping)
        .collect();

    Ok(LineItem {
        size,
        toppings,
        quantity: 1,
        id: next_id,
        instructions: String::new(),
    })
}
