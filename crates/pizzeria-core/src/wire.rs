//! JSON shape of an order as the commerce API expects it.
//!
//! A borrowed view over [`OrderAccumulator`]; fields the client never fills
//! (coupons, payments, tags, partners, ids) go out as empty values because the
//! API rejects orders that omit them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::SizeCode;
use crate::customer::Customer;
use crate::line_item::LineItem;
use crate::order::{Address, OrderAccumulator};
use crate::OrderError;

/// Portion key for a topping spread over the whole pizza.
const WHOLE_PIZZA: &str = "1/1";

#[derive(Serialize)]
struct RequestBody<'a> {
    #[serde(rename = "Order")]
    order: WireOrder<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct WireOrder<'a> {
    address: &'a Address,
    amounts: BTreeMap<&'a str, Decimal>,
    coupons: [&'a str; 0],
    #[serde(rename = "CustomerID")]
    customer_id: &'a str,
    email: &'a str,
    extension: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    language_code: &'a str,
    order_channel: &'a str,
    #[serde(rename = "OrderID")]
    order_id: &'a str,
    order_method: &'a str,
    order_taker: Option<&'a str>,
    payments: [&'a str; 0],
    phone: &'a str,
    products: Vec<WireProduct>,
    service_method: &'a str,
    #[serde(rename = "SourceOrganizationURI")]
    source_organization_uri: &'a str,
    #[serde(rename = "StoreID")]
    store_id: &'a str,
    tags: BTreeMap<&'a str, &'a str>,
    version: &'a str,
    no_combine: bool,
    partners: BTreeMap<&'a str, &'a str>,
}

#[derive(Serialize)]
struct WireProduct {
    #[serde(rename = "Code")]
    code: SizeCode,
    #[serde(rename = "Qty")]
    qty: u32,
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Instructions")]
    instructions: String,
    #[serde(rename = "isNew")]
    is_new: bool,
    #[serde(rename = "Options")]
    options: BTreeMap<&'static str, BTreeMap<&'static str, String>>,
}

impl From<&LineItem> for WireProduct {
    fn from(item: &LineItem) -> Self {
        let options = item
            .topping_units()
            .into_iter()
            .map(|(code, units)| (code, BTreeMap::from([(WHOLE_PIZZA, units.to_string())])))
            .collect();
        Self {
            code: item.size,
            qty: item.quantity,
            id: item.id,
            instructions: item.instructions.clone(),
            is_new: true,
            options,
        }
    }
}

impl<'a> WireOrder<'a> {
    fn from_order(order: &'a OrderAccumulator) -> Self {
        let Customer {
            first_name,
            last_name,
            email,
            phone,
        } = order.customer();
        let defaults = order.defaults();
        let amounts = order
            .price_quote()
            .map(|quote| {
                quote
                    .amounts()
                    .iter()
                    .map(|(k, v)| (k.as_str(), *v))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            address: order.address(),
            amounts,
            coupons: [],
            customer_id: "",
            email,
            extension: "",
            first_name,
            last_name,
            language_code: defaults.language_code,
            order_channel: defaults.order_channel,
            order_id: "",
            order_method: defaults.order_method,
            order_taker: None,
            payments: [],
            phone,
            products: order.products().iter().map(WireProduct::from).collect(),
            service_method: defaults.service_method,
            source_organization_uri: defaults.source_organization_uri,
            store_id: order.store_id(),
            tags: BTreeMap::new(),
            version: defaults.version,
            no_combine: defaults.no_combine,
            partners: BTreeMap::new(),
        }
    }
}

pub(crate) fn encode_order(order: &OrderAccumulator) -> Result<Vec<u8>, OrderError> {
    Ok(serde_json::to_vec(&WireOrder::from_order(order))?)
}

pub(crate) fn encode_request(order: &OrderAccumulator) -> Result<Vec<u8>, OrderError> {
    let body = RequestBody {
        order: WireOrder::from_order(order),
    };
    Ok(serde_json::to_vec(&body)?)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::customer::Customer;
    use crate::line_item::build_line_item;
    use crate::order::{Address, OrderAccumulator, PriceQuote};

    fn request_json(order: &OrderAccumulator) -> Value {
        serde_json::from_slice(&order.to_request_body().unwrap()).unwrap()
    }

    #[test]
    fn empty_order_carries_every_schema_key() {
        let body = request_json(&OrderAccumulator::new());
        let order = body["Order"].as_object().expect("Order must be an object");
        let expected = [
            "Address",
            "Amounts",
            "Coupons",
            "CustomerID",
            "Email",
            "Extension",
            "FirstName",
            "LastName",
            "LanguageCode",
            "OrderChannel",
            "OrderID",
            "OrderMethod",
            "OrderTaker",
            "Payments",
            "Phone",
            "Products",
            "ServiceMethod",
            "SourceOrganizationURI",
            "StoreID",
            "Tags",
            "Version",
            "NoCombine",
            "Partners",
        ];
        assert_eq!(order.len(), expected.len());
        for key in expected {
            assert!(order.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn empty_order_uses_fixed_defaults() {
        let body = request_json(&OrderAccumulator::new());
        let order = &body["Order"];
        assert_eq!(order["LanguageCode"], "en");
        assert_eq!(order["OrderChannel"], "OLO");
        assert_eq!(order["OrderMethod"], "Web");
        assert_eq!(order["ServiceMethod"], "Delivery");
        assert_eq!(order["SourceOrganizationURI"], "order.dominos.ca");
        assert_eq!(order["Version"], "1.0");
        assert_eq!(order["NoCombine"], true);
        assert_eq!(order["OrderTaker"], Value::Null);
        assert_eq!(order["Amounts"], json!({}));
        assert_eq!(order["Coupons"], json!([]));
        assert_eq!(order["Payments"], json!([]));
        assert_eq!(order["Tags"], json!({}));
        assert_eq!(order["Partners"], json!({}));
        assert_eq!(order["StoreID"], "");
    }

    #[test]
    fn wire_format_is_the_request_body_without_envelope() {
        let mut order = OrderAccumulator::new();
        order.set_store("10090");
        let bare: Value = serde_json::from_slice(&order.to_wire_format().unwrap()).unwrap();
        assert_eq!(request_json(&order)["Order"], bare);
    }

    #[test]
    fn customer_and_amounts_are_serialized() {
        let mut order = OrderAccumulator::new();
        order.set_address(Address::new("1 Main St", "City", "Region", "A1A1A1", "House"));
        order.set_store("10090");
        order.set_customer(Customer::new("Ada", "Lovelace", "ada@example.com", "604-555-0123"));
        let quote: PriceQuote =
            serde_json::from_value(json!({"Payment": 23.45, "Tax": 2.51})).unwrap();
        order.set_price_quote(quote);

        let body = request_json(&order);
        let wire = &body["Order"];
        assert_eq!(wire["FirstName"], "Ada");
        assert_eq!(wire["LastName"], "Lovelace");
        assert_eq!(wire["Email"], "ada@example.com");
        assert_eq!(wire["Phone"], "6045550123");
        assert_eq!(wire["StoreID"], "10090");
        assert_eq!(wire["Amounts"]["Payment"].as_f64(), Some(23.45));
        assert_eq!(wire["Amounts"]["Tax"].as_f64(), Some(2.51));
    }

    #[test]
    fn double_topping_is_encoded_as_unit_count() {
        let mut order = OrderAccumulator::new();
        order.set_store("10090");
        order
            .add_line_item(build_line_item("s", &["pepperoni, pepperoni, feta"], 0).unwrap())
            .unwrap();
        let body = request_json(&order);
        assert_eq!(
            body["Order"]["Products"][0]["Options"],
            json!({"P": {"1/1": "2"}, "Fe": {"1/1": "1"}})
        );
    }

    #[test]
    fn products_keep_insertion_order_and_ids() {
        let mut order = OrderAccumulator::new();
        order.set_store("10090");
        for (id, size) in ["s", "m", "l"].into_iter().enumerate() {
            let id = u32::try_from(id).unwrap();
            order
                .add_line_item(build_line_item(size, &["cheese"], id).unwrap())
                .unwrap();
        }
        let body = request_json(&order);
        let codes: Vec<&str> = body["Order"]["Products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["Code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, ["10SCREEN", "12SCREEN", "14SCREEN"]);
        assert_eq!(body["Order"]["Products"][2]["ID"], 2);
    }
}
