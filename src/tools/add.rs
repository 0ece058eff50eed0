//! Handler for the `add` tool.
//!
//! Takes numbers `a` and `b` and returns `{"sum": a + b}`.

use serde_json::{Number, Value, json};

use crate::error::{InvokeError, InvokeResult};
use crate::tools::{JsonObject, ToolHandler};

const NOT_NUMBERS: &str = "a and b must be numbers";
const NOT_FINITE: &str = "sum of a and b is not a finite number";

/// Handler for the `add` tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddToolHandler;

impl AddToolHandler {
    /// Create a new add tool handler.
    pub fn new() -> Self {
        Self
    }
}

impl ToolHandler for AddToolHandler {
    fn id(&self) -> &str {
        "add"
    }

    fn name(&self) -> &str {
        "Add two numbers"
    }

    fn description(&self) -> &str {
        "Takes numbers a and b and returns a + b."
    }

    fn params_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert(
            "properties".to_string(),
            json!({
                "a": { "type": "number" },
                "b": { "type": "number" }
            }),
        );
        schema.insert("required".to_string(), json!(["a", "b"]));
        schema
    }

    fn invoke(&self, params: &JsonObject) -> InvokeResult<Value> {
        let (a, b) = match (params.get("a"), params.get("b")) {
            (Some(Value::Number(a)), Some(Value::Number(b))) => (a, b),
            _ => return Err(InvokeError::invalid_params(NOT_NUMBERS)),
        };

        let sum = add_numbers(a, b).ok_or_else(|| InvokeError::invalid_params(NOT_FINITE))?;
        Ok(json!({ "sum": sum }))
    }
}

/// Add two JSON numbers.
///
/// Integer operands are summed exactly in `i128` and serialized verbatim.
/// Any float operand, an integer literal outside the `i128` range, or an
/// `i128` overflow falls back to `f64` addition. Returns `None` when the
/// float sum is not finite.
pub fn add_numbers(a: &Number, b: &Number) -> Option<Number> {
    if let (Some(x), Some(y)) = (a.as_i128(), b.as_i128()) {
        if let Some(sum) = x.checked_add(y) {
            return Number::from_i128(sum);
        }
    }

    Number::from_f64(a.as_f64()? + b.as_f64()?)
}
