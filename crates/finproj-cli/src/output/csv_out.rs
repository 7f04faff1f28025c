use serde_json::Value;
use std::io;

use super::{flatten, format_value, tabulate};

/// Sections written in preference order when a result carries several.
const PREFERRED_SECTIONS: [&str; 3] = ["monthly_schedule", "yearly_schedule", "outcomes"];

/// Write output as CSV to stdout.
///
/// A result with a schedule is written as one row per period (the monthly
/// schedule wins when both are present); anything else becomes
/// `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let target = match value {
        Value::Object(map) => map.get("result").unwrap_or(value),
        other => other,
    };

    match target {
        Value::Object(map) => {
            let flat = flatten(map);
            let section = PREFERRED_SECTIONS
                .iter()
                .find_map(|name| flat.sections.iter().find(|(path, _)| path == name))
                .or_else(|| flat.sections.first());

            if let Some((_, rows)) = section {
                write_rows(wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in &flat.fields {
                    wtr.write_record([key.as_str(), val.as_str()])?;
                }
            }
        }
        Value::Array(rows) => write_rows(wtr, rows)?,
        other => wtr.write_record([format_value(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let (headers, cells) = tabulate(rows);
    wtr.write_record(&headers)?;
    for row in cells {
        wtr.write_record(&row)?;
    }
    Ok(())
}
