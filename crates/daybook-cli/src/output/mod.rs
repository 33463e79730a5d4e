use daybook_api::Loadable;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

pub use table::{Table, bar};

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Like [`output`], but table mode uses a purpose-built table.
pub fn output_with_table<T, F>(value: &T, format: OutputFormat, table: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Table,
{
    if format == OutputFormat::Table {
        print_table(&table(value));
        return Ok(());
    }
    output(value, format)
}

/// Print a purpose-built table, or a placeholder when it has no rows.
pub fn print_table(table: &Table) {
    if table.is_empty() {
        println!("(no rows)");
    } else {
        println!("{}", table.render(table_options()));
    }
}

/// Print a settled fetch. Empty and failed states print their message
/// instead of data; neither is an error for the process.
pub fn output_loadable<T: Serialize>(
    loadable: &Loadable<T>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    output_loadable_with(loadable, format, |value| {
        serde_json::to_value(value)
            .map_err(anyhow::Error::from)
            .and_then(|value| render_value_table(&value))
    })
}

/// [`output_loadable`] with a purpose-built table for the loaded value.
pub fn output_loadable_table<T, F>(
    loadable: &Loadable<T>,
    format: OutputFormat,
    table: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Table,
{
    output_loadable_with(loadable, format, |value| {
        let table = table(value);
        Ok(if table.is_empty() {
            String::from("(no rows)")
        } else {
            table.render(table_options())
        })
    })
}

fn output_loadable_with<T, F>(
    loadable: &Loadable<T>,
    format: OutputFormat,
    render_loaded: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> anyhow::Result<String>,
{
    if format != OutputFormat::Table {
        return output(loadable, format);
    }
    match loadable {
        Loadable::Loaded(value) => println!("{}", render_loaded(value)?),
        Loadable::Empty(message) => println!("{message}"),
        Loadable::Failed { kind, message } => eprintln!("{kind}: {message}"),
    }
    Ok(())
}

fn render_value_table(value: &Value) -> anyhow::Result<String> {
    let options = table_options();
    match value {
        Value::Array(items) => Ok(render_array_table(items, options)),
        Value::Object(map) => {
            let mut table = Table::new(["key", "value"]);
            for (key, value) in map {
                table.push([key.clone(), value_to_cell(value)]);
            }
            Ok(table.render(options))
        }
        scalar => {
            let mut table = Table::new(["value"]);
            table.push([value_to_cell(scalar)]);
            Ok(table.render(options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.push([value_to_cell(item)]);
        }
        return table.render(options);
    }

    // Columns are the union of all keys.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut table = Table::new(headers.iter().map(String::as_str));
    for map in items.iter().filter_map(Value::as_object) {
        table.push(headers.iter().map(|header| {
            map.get(header)
                .map_or_else(|| String::from("-"), value_to_cell)
        }));
    }
    table.render(options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => format!("[{}]", items.len()),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use daybook_core::errors::ErrorKind;
    use serde::Serialize;

    use super::{render, render_value_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: i64,
        title: &'static str,
        blocks: Vec<u8>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: 3, title: "x", blocks: vec![1] };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 3);
        assert_eq!(parsed["title"], "x");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: 3, title: "x", blocks: vec![] };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn array_tables_union_keys_and_count_nested_lists() {
        let value = serde_json::json!([
            {"id": 1, "title": "first", "blocks": [1, 2]},
            {"id": 2, "title": "second", "blocks": []}
        ]);
        let out = render_value_table(&value).expect("table");
        let mut lines = out.lines();
        let header = lines.next().expect("header");
        for column in ["blocks", "id", "title"] {
            assert!(header.contains(column));
        }
        assert!(out.contains("[2]"));
    }

    #[test]
    fn loadable_failures_serialize_with_kind() {
        let failed: daybook_api::Loadable<u8> = daybook_api::Loadable::Failed {
            kind: ErrorKind::Network,
            message: "offline".into(),
        };
        let out = render(&failed, OutputFormat::Raw).expect("raw");
        assert_eq!(
            out,
            r#"{"status":"failed","data":{"kind":"network_error","message":"offline"}}"#
        );
    }
}
