//! Output rendering for `slth` commands.

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let rows: Vec<[String; 2]> = map
                .into_iter()
                .map(|(key, value)| [key, value_to_cell(&value)])
                .collect();
            Ok(render_rows(&["key", "value"], &rows))
        }
        scalar => Ok(render_rows(&["value"], &[[value_to_cell(&scalar)]])),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let Some(objects) = items
        .iter()
        .map(Value::as_object)
        .collect::<Option<Vec<_>>>()
    else {
        let rows: Vec<[String; 1]> = items.iter().map(|item| [value_to_cell(item)]).collect();
        return render_rows(&["value"], &rows);
    };

    let mut headers: Vec<String> = Vec::new();
    for map in &objects {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h).map_or_else(|| "-".to_string(), value_to_cell))
                .collect()
        })
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    render_rows(&header_refs, &rows)
}

fn render_rows<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.as_ref().iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.iter().map(|h| (*h).to_string()), &widths));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in rows {
        lines.push(format_row(row.as_ref().iter().cloned(), &widths));
    }
    lines.join("\n")
}

fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        compound => serde_json::to_string(compound).unwrap_or_else(|_| "?".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn json_renders_pretty_and_raw_renders_compact() {
        let value = json!({"a": 1, "b": "x"});
        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert!(pretty.contains('\n'));
        let raw = render(&value, OutputFormat::Raw).unwrap();
        assert_eq!(raw, r#"{"a":1,"b":"x"}"#);
    }

    #[test]
    fn object_renders_as_key_value_table() {
        let value = json!({"name": "checkout", "tier": 1});
        let table = render(&value, OutputFormat::Table).unwrap();
        assert!(table.starts_with("key"));
        assert!(table.contains("checkout"));
    }

    #[test]
    fn array_of_objects_unions_headers() {
        let value = json!([{"a": 1}, {"a": 2, "b": "x"}]);
        let table = render(&value, OutputFormat::Table).unwrap();
        let mut lines = table.lines();
        assert_eq!(lines.next().unwrap().trim_end(), "a  b");
        assert!(table.contains('-'));
        assert!(table.lines().last().unwrap().contains('x'));
    }

    #[test]
    fn empty_array_says_so() {
        let value = json!([]);
        assert_eq!(render(&value, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
