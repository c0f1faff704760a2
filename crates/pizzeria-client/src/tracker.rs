//! Order tracker: phone-keyed status lookup over a SOAP/XML endpoint.
//!
//! The statuses live at `Envelope/Body/GetTrackerDataResponse/OrderStatuses`.
//! Each `OrderStatus` element under that path is one order. Current responses
//! nest the token in a child element of the same name alongside `OrderID`,
//! `StoreID` and `OrderDescription`; older ones carry the token as the
//! element's own text. Both shapes are accepted and namespace prefixes
//! (`soap:Envelope`) are ignored.

use pizzeria_core::{normalize_phone, OrderError};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::client::PowerClient;
use crate::error::CheckoutError;
use crate::types::OrderStatusEntry;

const TRACKER_PATH: &str = "orderstorage/GetTrackerData";
const CONTEXT: &str = "GetTrackerData";

const RESPONSE_ELEMENT: &str = "GetTrackerDataResponse";
const STATUSES_PATH: [&str; 4] = ["Envelope", "Body", RESPONSE_ELEMENT, "OrderStatuses"];
const STATUS_ELEMENT: &str = "OrderStatus";

impl PowerClient {
    /// Fetches the status of every recent order placed with `phone`.
    ///
    /// The phone number is normalized the same way as on an order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Order`] if `phone` is blank.
    /// - [`CheckoutError::Http`] on network failure or non-2xx status.
    /// - [`CheckoutError::Xml`], [`CheckoutError::MalformedXml`], or
    ///   [`CheckoutError::MissingField`] if the envelope cannot be decoded.
    pub async fn track_orders(&self, phone: &str) -> Result<Vec<OrderStatusEntry>, CheckoutError> {
        let phone = normalize_phone(phone);
        if phone.is_empty() {
            return Err(OrderError::Incomplete("phone").into());
        }

        let url = self.tracker_url(TRACKER_PATH, &[("Phone", phone.as_str())]);
        let body = self.get_text(&url).await?;
        let entries = parse_tracker_response(&body)?;
        tracing::info!(orders = entries.len(), "tracker lookup complete");
        Ok(entries)
    }
}

/// Accumulates the fields of one `OrderStatus` element while it is open.
#[derive(Default)]
struct EntryBuilder {
    own_text: String,
    nested_status: Option<String>,
    order_id: Option<String>,
    store_id: Option<String>,
    description: Option<String>,
}

impl EntryBuilder {
    fn record(&mut self, field: Option<&str>, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match field {
            None => self.own_text.push_str(text),
            Some("OrderStatus") => self.nested_status = Some(text.to_owned()),
            Some("OrderID") => self.order_id = Some(text.to_owned()),
            Some("StoreID") => self.store_id = Some(text.to_owned()),
            Some("OrderDescription") => self.description = Some(text.to_owned()),
            Some(_) => {}
        }
    }

    fn finish(self) -> Option<OrderStatusEntry> {
        let status = self.nested_status.unwrap_or(self.own_text);
        if status.is_empty() {
            return None;
        }
        Some(OrderStatusEntry {
            status,
            order_id: self.order_id,
            store_id: self.store_id,
            description: self.description,
        })
    }
}

fn path_is(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Decodes a tracker SOAP envelope into order status entries.
///
/// An `OrderStatuses` element with no children means no recent orders and
/// yields an empty list.
///
/// # Errors
///
/// - [`CheckoutError::Xml`] if the document is not well-formed.
/// - [`CheckoutError::MalformedXml`] if text cannot be unescaped or the
///   document ends with elements still open.
/// - [`CheckoutError::MissingField`] if there is no `GetTrackerDataResponse`
///   inside the SOAP body.
pub fn parse_tracker_response(xml: &str) -> Result<Vec<OrderStatusEntry>, CheckoutError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let entry_depth = STATUSES_PATH.len() + 1;
    let mut stack: Vec<String> = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    let mut found_response = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(e.local_name().as_ref());
                if name == RESPONSE_ELEMENT && path_is(&stack, &STATUSES_PATH[..2]) {
                    found_response = true;
                }
                if name == STATUS_ELEMENT && path_is(&stack, &STATUSES_PATH) {
                    current = Some(EntryBuilder::default());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref());
                if name == RESPONSE_ELEMENT && path_is(&stack, &STATUSES_PATH[..2]) {
                    found_response = true;
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| CheckoutError::MalformedXml {
                    context: CONTEXT.to_owned(),
                    reason: err.to_string(),
                })?;
                record_text(&mut current, &stack, entry_depth, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                record_text(&mut current, &stack, entry_depth, &text);
            }
            Event::End(_) => {
                if stack.len() == entry_depth {
                    if let Some(entry) = current.take().and_then(EntryBuilder::finish) {
                        entries.push(entry);
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CheckoutError::MalformedXml {
            context: CONTEXT.to_owned(),
            reason: format!("document ended inside <{}>", stack.join("/")),
        });
    }
    if !found_response {
        return Err(CheckoutError::MissingField {
            context: CONTEXT.to_owned(),
            field: RESPONSE_ELEMENT,
        });
    }

    Ok(entries)
}

fn record_text(
    current: &mut Option<EntryBuilder>,
    stack: &[String],
    entry_depth: usize,
    text: &str,
) {
    let Some(builder) = current.as_mut() else {
        return;
    };
    if stack.len() == entry_depth {
        builder.record(None, text);
    } else if stack.len() == entry_depth + 1 {
        builder.record(stack.last().map(String::as_str), text);
    }
}
