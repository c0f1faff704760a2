//! Validate, price and place endpoints.

use pizzeria_core::{OrderAccumulator, PriceQuote};
use serde_json::Value;

use crate::client::{failure_codes, PowerClient};
use crate::error::CheckoutError;
use crate::types::PlacedOrder;

impl PowerClient {
    /// Submits the order for remote validation.
    ///
    /// Only a parseable response is required; the body is returned for
    /// logging. Failure codes in it are logged, not raised.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Http`] on network failure or non-2xx status.
    /// - [`CheckoutError::Deserialize`] if the body is not valid JSON.
    pub async fn validate_order(&self, order: &OrderAccumulator) -> Result<Value, CheckoutError> {
        let (_, body) = self.post_order("validate-order", order).await?;
        Ok(body)
    }

    /// Prices the order and returns the `Order.Amounts` quote.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Http`] on network failure or non-2xx status.
    /// - [`CheckoutError::Deserialize`] if the body or the amounts are not
    ///   valid JSON of the expected shape.
    /// - [`CheckoutError::Rejected`] if `Order.Amounts` is absent and the
    ///   service reported a failure status.
    /// - [`CheckoutError::MissingField`] if `Order.Amounts` is otherwise absent.
    pub async fn price_order(&self, order: &OrderAccumulator) -> Result<PriceQuote, CheckoutError> {
        let (_, body) = self.post_order("price-order", order).await?;
        extract_price_quote(body)
    }

    /// Places the order. As with validation, a parseable response is
    /// success.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Http`] on network failure or non-2xx status.
    /// - [`CheckoutError::Deserialize`] if the body is not valid JSON.
    pub async fn place_order(&self, order: &OrderAccumulator) -> Result<PlacedOrder, CheckoutError> {
        let (status, body) = self.post_order("place-order", order).await?;
        let order_id = body
            .get("Order")
            .and_then(|o| o.get("OrderID"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_owned);
        Ok(PlacedOrder {
            status: status.as_u16(),
            order_id,
            body,
        })
    }
}

fn extract_price_quote(mut body: Value) -> Result<PriceQuote, CheckoutError> {
    let Some(amounts) = body
        .get_mut("Order")
        .and_then(|order| order.get_mut("Amounts"))
        .map(Value::take)
    else {
        return Err(match failure_codes(&body) {
            Some(codes) => CheckoutError::Rejected {
                operation: "price-order",
                codes,
            },
            None => CheckoutError::MissingField {
                context: "price-order".to_owned(),
                field: "Order.Amounts",
            },
        });
    };

    serde_json::from_value(amounts).map_err(|e| CheckoutError::Deserialize {
        context: "price-order Order.Amounts".to_owned(),
        source: e,
    })
}
