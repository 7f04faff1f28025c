pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// A result object split into printable parts.
#[derive(Debug, Default)]
pub struct Flattened<'a> {
    /// Scalar leaves keyed by dotted path (`summary.total_interest`).
    pub fields: Vec<(String, String)>,
    /// Arrays of objects (schedules, scenario outcomes) keyed by dotted path.
    pub sections: Vec<(String, &'a [Value])>,
}

/// Walk an object, collecting scalar leaves and row sections.
pub fn flatten(map: &Map<String, Value>) -> Flattened<'_> {
    let mut out = Flattened::default();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into<'a>(prefix: &str, map: &'a Map<String, Value>, out: &mut Flattened<'a>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&path, inner, out),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                out.sections.push((path, items.as_slice()));
            }
            other => out.fields.push((path, format_value(other))),
        }
    }
}

/// Flatten rows of a section into a header list and string cells.
///
/// Nested objects become dotted columns; nested row arrays are dropped so
/// each record stays one line.
pub fn tabulate(rows: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = Vec::new();
    let mut flat_rows: Vec<Vec<(String, String)>> = Vec::with_capacity(rows.len());

    for row in rows {
        let fields = match row {
            Value::Object(map) => flatten(map).fields,
            other => vec![("value".to_string(), format_value(other))],
        };
        for (key, _) in &fields {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        flat_rows.push(fields);
    }

    let cells = flat_rows
        .into_iter()
        .map(|fields| {
            headers
                .iter()
                .map(|h| {
                    fields
                        .iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    (headers, cells)
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
