//! Shopping Cart Request Models
//!
//! Request bodies and query strings accepted by the cart endpoints. Cart
//! items themselves are stored as opaque documents; only the fields the
//! routes act on get a type here.

use mongodb::bson::Bson;
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// Request Models
// =============================================================================

/// Query string for GET /cart
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    /// Owner address; a missing parameter filters on the empty string
    #[serde(default)]
    pub email: String,
}

/// Body for PUT /cart/:id
///
/// `quantity` stays untyped until validation so that a wrong type is
/// reported as an invalid quantity rather than a generic body rejection.
/// Built from the raw JSON body: only a JSON object can carry a quantity.
#[derive(Debug, Default)]
pub struct UpdateQuantityInput {
    pub quantity: Option<Value>,
}

impl From<Value> for UpdateQuantityInput {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                quantity: fields.remove("quantity").filter(|q| !q.is_null()),
            },
            _ => Self::default(),
        }
    }
}

// =============================================================================
// Validated Values
// =============================================================================

/// A cart quantity known to be a finite number greater than zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Whole(i64),
    Fractional(f64),
}

impl Quantity {
    /// Validates a raw JSON value. Returns `None` for anything that is not
    /// a positive number.
    pub fn from_json(value: &Value) -> Option<Self> {
        let Value::Number(number) = value else {
            return None;
        };

        if let Some(whole) = number.as_i64() {
            return (whole > 0).then_some(Self::Whole(whole));
        }
        if number.is_u64() {
            // Above i64::MAX; still positive, kept as a double like any JS number.
            return number.as_f64().map(Self::Fractional);
        }
        let float = number.as_f64().filter(|f| f.is_finite() && *f > 0.0)?;
        // JSON `2.0` and `2` are the same number to a JavaScript client.
        if float.fract() == 0.0 && float < i64::MAX as f64 {
            Some(Self::Whole(float as i64))
        } else {
            Some(Self::Fractional(float))
        }
    }
}

impl From<Quantity> for Bson {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Whole(n) => match i32::try_from(n) {
                Ok(small) => Bson::Int32(small),
                Err(_) => Bson::Int64(n),
            },
            Quantity::Fractional(f) => Bson::Double(f),
        }
    }
}
