//! Terminal rendering of query results.

use anyhow::{Context, Result};
use rusqlite::types::Value;
use serde::Serialize;

use crate::infra::db::QueryResult;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// Pretty-printed JSON object with `columns` and `rows`
    Json,
}

pub fn render(result: &QueryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// Pretty JSON for domain records and command summaries.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

pub fn render_table(result: &QueryResult) -> String {
    let cells: Vec<Vec<String>> = result
        .rows()
        .iter()
        .map(|row| row.values().iter().map(display_value).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns().iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, result.columns().iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }

    let n = cells.len();
    out.push_str(&format!("({n} row{})\n", if n == 1 { "" } else { "s" }));
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        Value::Blob(v) => format!("<{} bytes>", v.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::db::Database;

    fn sample(db: &Database) -> QueryResult {
        db.execute_query(
            "SELECT 'Springfield' AS City, 12 AS Count UNION ALL SELECT 'Ogdenville', 3",
            [],
        )
        .unwrap()
    }

    #[test]
    fn test_table_is_aligned() {
        let db = Database::open_in_memory().unwrap();
        let text = render_table(&sample(&db));
        assert_eq!(
            text,
            "City        | Count\n\
             ----------- | -----\n\
             Springfield | 12\n\
             Ogdenville  | 3\n\
             (2 rows)\n"
        );
    }

    #[test]
    fn test_empty_result_keeps_header() {
        let db = Database::open_in_memory().unwrap();
        let result = db.execute_query("SELECT * FROM Claims", []).unwrap();
        let text = render_table(&result);
        assert!(text.starts_with("Claim_ID | Food_ID | Receiver_ID | Status | Timestamp\n"));
        assert!(text.ends_with("(0 rows)\n"));
    }

    #[test]
    fn test_json_output() {
        let db = Database::open_in_memory().unwrap();
        let json = render(&sample(&db), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["rows"][1]["City"], "Ogdenville");
        assert_eq!(parsed["columns"][1], "Count");
    }

    #[test]
    fn test_table_and_json_show_the_same_real() {
        let db = Database::open_in_memory().unwrap();
        let result = db.execute_query("SELECT 133.0 / 6 AS Avg_Quantity", []).unwrap();
        let table = render_table(&result);
        let json: serde_json::Value =
            serde_json::from_str(&render(&result, OutputFormat::Json).unwrap()).unwrap();
        let real = json["rows"][0]["Avg_Quantity"].as_f64().unwrap();
        assert!(table.contains(&format!("{real}\n")));
    }

    #[test]
    fn test_render_json_ends_with_newline() {
        let json = render_json(&vec!["Springfield", "Shelbyville"]).unwrap();
        assert!(json.ends_with("]\n"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Null), "NULL");
        assert_eq!(display_value(&Value::Real(7.5)), "7.5");
        assert!(display_value(&Value::Real(133.0 / 6.0)).starts_with("22.16666666"));
        assert_eq!(display_value(&Value::Blob(vec![1, 2])), "<2 bytes>");
    }
}
