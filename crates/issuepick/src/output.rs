use colored::Colorize;
use serde_json::Value;

use crate::prelude::{println, *};

/// Print a projection result as pretty JSON, or as a two-column table
///
/// Only mappings render as tables; anything else falls back to JSON.
pub fn print_value(value: &Value, table: bool) -> Result<()> {
    match value {
        Value::Object(map) if table => {
            let mut rows = new_table();
            for (key, value) in map {
                rows.add_row(prettytable::row![key.bold().cyan(), cell(value)]);
            }
            rows.printstd();
        }
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }

    Ok(())
}

/// Render a value for a table cell
///
/// Sequences put one element per line; mappings stay compact JSON.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
        other => other.to_string(),
    }
}
