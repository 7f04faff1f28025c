use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_value, tabulate};

/// Format output as tables using the tabled crate.
///
/// Scalar results become one Field/Value table; every schedule or outcome
/// list gets a table of its own below it.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_tables(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    print_object(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let flat = flatten(map);

    if !flat.fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &flat.fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in &flat.sections {
        println!("\n{}:", name);
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    if !rows.iter().any(Value::is_object) {
        for item in rows {
            println!("{}", format_value(item));
        }
        return;
    }

    let (headers, cells) = tabulate(rows);
    let mut builder = Builder::default();
    builder.push_record(headers);
    for row in cells {
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
