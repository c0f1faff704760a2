use pizzeria_core::OrderError;
use thiserror::Error;

use crate::checkout::CheckoutState;

/// Coarse classification of a [`CheckoutError`], used by the CLI to word its
/// final message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, DNS, TLS, or non-2xx HTTP status.
    Transport,
    /// Response body is not valid JSON/XML or lacks an expected field.
    Decode,
    /// Input that cannot be resolved, or an order the remote service rejected.
    Validation,
    /// An operation invoked out of the checkout's required order.
    State,
    /// The user declined to place the order.
    UserAbort,
}

/// Errors returned by the commerce client and the checkout workflow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Network or TLS failure, or a non-2xx status, from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML in {context}: {reason}")]
    MalformedXml { context: String, reason: String },

    #[error("response from {context} is missing {field}")]
    MissingField {
        context: String,
        field: &'static str,
    },

    /// The service answered `"Status": -1` without the data the call needs.
    #[error("{operation} rejected by the remote service: {}", .codes.join(", "))]
    Rejected {
        operation: &'static str,
        codes: Vec<String>,
    },

    #[error("no stores are delivering to this address right now")]
    NoStoresAvailable,

    #[error("invalid store selection {choice}: choose between 1 and {available}")]
    InvalidSelection { choice: usize, available: usize },

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("cannot {operation} while checkout is {state}")]
    OutOfOrder {
        operation: &'static str,
        state: CheckoutState,
    },

    #[error("order not placed: confirmation declined")]
    UserAbort,
}

impl CheckoutError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckoutError::Http(_) | CheckoutError::InvalidBaseUrl { .. } => ErrorKind::Transport,
            CheckoutError::Deserialize { .. }
            | CheckoutError::Xml(_)
            | CheckoutError::MalformedXml { .. }
            | CheckoutError::MissingField { .. }
            | CheckoutError::Order(OrderError::Serialize(_)) => ErrorKind::Decode,
            CheckoutError::Rejected { .. }
            | CheckoutError::NoStoresAvailable
            | CheckoutError::InvalidSelection { .. }
            | CheckoutError::Order(OrderError::UnresolvedSize(_)) => ErrorKind::Validation,
            CheckoutError::Order(_) | CheckoutError::OutOfOrder { .. } => ErrorKind::State,
            CheckoutError::UserAbort => ErrorKind::UserAbort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_errors_are_classified_by_cause() {
        assert_eq!(
            CheckoutError::Order(OrderError::Incomplete("store")).kind(),
            ErrorKind::State
        );
        assert_eq!(
            CheckoutError::Order(OrderError::PriceNotAvailable).kind(),
            ErrorKind::State
        );
        assert_eq!(
            CheckoutError::Order(OrderError::UnresolvedSize("xl".to_owned())).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn selection_and_lookup_failures_are_validation_errors() {
        assert_eq!(
            CheckoutError::InvalidSelection {
                choice: 0,
                available: 2
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(CheckoutError::NoStoresAvailable.kind(), ErrorKind::Validation);
    }

    #[test]
    fn decode_failures_are_decode_errors() {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        let err = CheckoutError::Deserialize {
            context: "price-order".to_owned(),
            source: src,
        };
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(
            CheckoutError::MissingField {
                context: "price-order".to_owned(),
                field: "Order.Amounts"
            }
            .kind(),
            ErrorKind::Decode
        );
    }

    #[test]
    fn rejected_message_lists_codes() {
        let err = CheckoutError::Rejected {
            operation: "validate-order",
            codes: vec!["AddressInvalid".to_owned(), "StoreClosed".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "validate-order rejected by the remote service: AddressInvalid, StoreClosed"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn out_of_order_mentions_state() {
        let err = CheckoutError::OutOfOrder {
            operation: "price the order",
            state: CheckoutState::StoreSelected,
        };
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(
            err.to_string(),
            "cannot price the order while checkout is store-selected"
        );
    }

    #[test]
    fn user_abort_is_its_own_kind() {
        assert_eq!(CheckoutError::UserAbort.kind(), ErrorKind::UserAbort);
    }
}
