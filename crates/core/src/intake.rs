use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::order::{parse_amount, Order, OrderId, OrderLine, OrderPayload, OrderStatus};
use crate::errors::OrderValidationError;

/// Hands out strictly increasing order ids. Seeded from the wall clock so ids stay
/// numeric and roughly time-ordered, but two submissions in the same millisecond never
/// collide.
#[derive(Debug)]
pub struct OrderIdGenerator {
    next: AtomicU64,
}

impl OrderIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }

    pub fn from_clock() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(1);
        Self::starting_at(millis.max(1))
    }

    pub fn next_id(&self) -> OrderId {
        OrderId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::from_clock()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub items: Vec<OrderLine>,
    pub total: Option<Decimal>,
}

pub fn validate_order(payload: &OrderPayload) -> Result<ValidatedOrder, OrderValidationError> {
    let first_name =
        required_text(payload.first_name.as_deref()).ok_or(OrderValidationError::MissingFirstName)?;
    let last_name =
        required_text(payload.last_name.as_deref()).ok_or(OrderValidationError::MissingLastName)?;
    let address =
        required_text(payload.address.as_deref()).ok_or(OrderValidationError::MissingAddress)?;

    let raw_items = match payload.items.as_ref() {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(OrderValidationError::NoItems),
    };
    // Past this point nothing is rejected: items are kept as sent.
    let items = raw_items.iter().map(OrderLine::from_value).collect();

    Ok(ValidatedOrder {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        address: address.to_string(),
        items,
        total: parse_amount(payload.total.as_ref()),
    })
}

fn required_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Accepts orders. Nothing is stored: the accepted [`Order`] is handed back to the
/// caller for logging and acknowledgement.
#[derive(Debug, Default)]
pub struct OrderIntake {
    ids: OrderIdGenerator,
}

impl OrderIntake {
    pub fn new(ids: OrderIdGenerator) -> Self {
        Self { ids }
    }

    pub fn submit(&self, payload: &OrderPayload) -> Result<Order, OrderValidationError> {
        self.submit_at(payload, Utc::now())
    }

    pub fn submit_at(
        &self,
        payload: &OrderPayload,
        order_date: DateTime<Utc>,
    ) -> Result<Order, OrderValidationError> {
        let validated = validate_order(payload)?;

        Ok(Order {
            id: self.ids.next_id(),
            first_name: validated.first_name,
            last_name: validated.last_name,
            address: validated.address,
            items: validated.items,
            total: validated.total,
            status: OrderStatus::Confirmed,
            order_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use crate::domain::order::{OrderPayload, OrderStatus};
    use crate::errors::OrderValidationError;

    use super::{validate_order, OrderIdGenerator, OrderIntake};

    fn payload(value: Value) -> OrderPayload {
        serde_json::from_value(value).expect("payload shape")
    }

    fn valid() -> Value {
        json!({
            "firstName": "  Grace ",
            "lastName": "Hopper",
            "address": "1 Compiler Rd",
            "items": [{ "id": 2, "name": "Smart Watch", "price": 199.99, "quantity": 1 }],
            "total": "199.99"
        })
    }

    fn with(mut base: Value, key: &str, replacement: Value) -> Value {
        base[key] = replacement;
        base
    }

    #[test]
    fn valid_payload_is_accepted_with_trimmed_fields() {
        let validated = validate_order(&payload(valid())).expect("valid order");

        assert_eq!(validated.first_name, "Grace");
        assert_eq!(validated.items.len(), 1);
        assert_eq!(validated.total, Some(Decimal::new(19999, 2)));
    }

    #[test]
    fn blank_fields_fail_in_fixed_order() {
        let all_blank = json!({ "firstName": " ", "lastName": "", "address": "\t", "items": [] });
        assert_eq!(
            validate_order(&payload(all_blank)),
            Err(OrderValidationError::MissingFirstName)
        );

        let last_and_address_blank =
            with(with(valid(), "lastName", json!("   ")), "address", json!(""));
        assert_eq!(
            validate_order(&payload(last_and_address_blank)),
            Err(OrderValidationError::MissingLastName)
        );

        let address_missing = {
            let mut value = valid();
            value.as_object_mut().expect("object").remove("address");
            value
        };
        assert_eq!(
            validate_order(&payload(address_missing)),
            Err(OrderValidationError::MissingAddress)
        );
    }

    #[test]
    fn empty_missing_or_non_array_items_are_rejected() {
        for items in [json!([]), json!(null), json!({ "id": 1 }), json!("1,2"), json!(3)] {
            assert_eq!(
                validate_order(&payload(with(valid(), "items", items))),
                Err(OrderValidationError::NoItems)
            );
        }
    }

    #[test]
    fn name_checks_win_over_item_checks() {
        let value = with(with(valid(), "firstName", json!(null)), "items", json!([]));
        assert_eq!(validate_order(&payload(value)), Err(OrderValidationError::MissingFirstName));
    }

    #[test]
    fn any_item_shape_passes_once_field_checks_succeed() {
        let shapes = [
            json!([{ "productId": 1, "name": "Wireless Headphones", "quantity": 1 }]),
            json!([{ "name": "Smart Watch", "price": 199.99, "quantity": -1 }]),
            json!([{ "name": "Smart Watch", "price": "199.99", "quantity": "2" }]),
            json!([1]),
            json!([null, "x", { "quantity": 1.5 }]),
        ];

        for items in shapes {
            let expected = items.as_array().map_or(0, Vec::len);
            let validated = validate_order(&payload(with(valid(), "items", items.clone())))
                .unwrap_or_else(|error| panic!("{items} rejected: {error}"));
            assert_eq!(validated.items.len(), expected);
        }
    }

    #[test]
    fn item_prices_and_total_are_not_cross_checked() {
        let value = with(valid(), "total", json!(0.01));
        let validated = validate_order(&payload(value)).expect("total is trusted");

        assert_eq!(validated.total, Some(Decimal::new(1, 2)));
    }

    #[test]
    fn intake_confirms_and_assigns_increasing_ids() {
        let intake = OrderIntake::new(OrderIdGenerator::starting_at(500));

        let first = intake.submit(&payload(valid())).expect("first");
        let second = intake.submit(&payload(valid())).expect("second");

        assert_eq!(first.status, OrderStatus::Confirmed);
        assert_eq!(first.id.0, 500);
        assert_eq!(second.id.0, 501);
        assert_eq!(first.confirmation().status, OrderStatus::Confirmed);
    }

    #[test]
    fn clock_seeded_ids_never_repeat_under_rapid_submission() {
        let generator = OrderIdGenerator::from_clock();
        let mut ids: Vec<u64> = (0..1_000).map(|_| generator.next_id().0).collect();
        let before = ids.len();
        ids.dedup();

        assert_eq!(ids.len(), before);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn rejected_orders_do_not_consume_ids() {
        let intake = OrderIntake::new(OrderIdGenerator::starting_at(10));

        let _ = intake.submit(&payload(json!({})));
        let accepted = intake.submit(&payload(valid())).expect("accepted");

        assert_eq!(accepted.id.0, 10);
    }
}
