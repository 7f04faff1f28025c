use serde_json::Value;

use super::flatten;

/// Key answer per command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "summary.final_balance",
    "summary.total_interest",
    "succeeded",
    "monthly_return_rate",
];

/// Print just the key answer value from the output.
///
/// Looks for the well-known result fields above, then falls back to the
/// first scalar field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return super::format_value(result_obj);
    };

    let flat = flatten(map);
    for key in PRIORITY_KEYS {
        if let Some((_, val)) = flat.fields.iter().find(|(k, _)| k == key) {
            if !val.is_empty() {
                return val.clone();
            }
        }
    }

    flat.fields
        .first()
        .map(|(key, val)| format!("{}: {}", key, val))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loan_answer_is_monthly_payment() {
        let value = json!({
            "result": { "monthly_payment": "1145.83", "summary": { "total_interest": "1.00" } }
        });
        assert_eq!(minimal_answer(&value), "1145.83");
    }

    #[test]
    fn test_savings_answer_is_final_balance() {
        let value = json!({
            "result": { "monthly_return_rate": "0.0056", "summary": { "final_balance": "105197.38" } }
        });
        assert_eq!(minimal_answer(&value), "105197.38");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = json!({ "result": { "other": 3 } });
        assert_eq!(minimal_answer(&value), "other: 3");
    }
}
