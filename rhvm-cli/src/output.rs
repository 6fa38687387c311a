use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

pub trait OutputFormatter {
    fn format<T: Serialize>(&self, data: T) -> String;
    fn format_table<T: Tabled + Serialize>(&self, data: Vec<T>) -> String;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, data: T) -> String {
        match self {
            OutputFormat::Table => match serde_json::to_value(&data) {
                Ok(value) => field_table(&value),
                Err(e) => e.to_string(),
            },
            OutputFormat::Json => {
                serde_json::to_string_pretty(&data).unwrap_or_else(|e| e.to_string())
            }
            OutputFormat::Yaml => serde_yaml::to_string(&data).unwrap_or_else(|e| e.to_string()),
        }
    }

    fn format_table<T: Tabled + Serialize>(&self, data: Vec<T>) -> String {
        match self {
            OutputFormat::Table if data.is_empty() => "No data to display".to_string(),
            OutputFormat::Table => Table::new(data).to_string(),
            _ => self.format(data),
        }
    }
}

/// Two-column field/value table for a single record. Nested values are
/// flattened to dotted field names.
fn field_table(value: &Value) -> String {
    let mut rows = Vec::new();
    collect_fields("", value, &mut rows);

    if rows.is_empty() {
        return "No data to display".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["field".to_string(), "value".to_string()]);
    for (field, value) in rows {
        builder.push_record([field, value]);
    }
    builder.build().to_string()
}

fn collect_fields(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let field = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_fields(&field, nested, rows);
            }
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(scalar).collect();
            rows.push((prefix.to_string(), items.join(", ")));
        }
        other => rows.push((prefix.to_string(), scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_format_flattens_fields() {
        let rendered = OutputFormat::Table.format(json!({
            "vm_ref": "/api/vms/1",
            "update": "clear",
            "storage": { "primary": null, "storages": [] }
        }));

        assert!(rendered.contains("vm_ref"));
        assert!(rendered.contains("/api/vms/1"));
        assert!(rendered.contains("storage.primary"));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_json_format_is_json() {
        let rendered = OutputFormat::Json.format(json!({ "supported": true }));
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["supported"], Value::Bool(true));
    }
}
