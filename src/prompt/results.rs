use serde_json::Value;

use crate::llm::models::Row;

pub const DEFAULT_MAX_ROWS: usize = 30;
pub const NO_ROWS: &str = "No rows returned.";

/// Renders up to `max_rows` rows as a pipe-separated text table.
///
/// Column order comes from the first row. Keys a later row lacks render as
/// empty cells and keys the first row lacks are dropped. When rows are cut
/// off, a trailing line says how many were left out.
pub fn format_rows(rows: &[Row], max_rows: usize) -> String {
    let Some(first) = rows.first() else {
        return NO_ROWS.to_string();
    };

    let cols: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut lines: Vec<String> = Vec::with_capacity(rows.len().min(max_rows) + 3);
    lines.push(cols.join(" | "));
    lines.push(
        cols.iter()
            .map(|c| "-".repeat(c.len()))
            .collect::<Vec<_>>()
            .join("-+-"),
    );

    for row in rows.iter().take(max_rows) {
        let values: Vec<String> = cols
            .iter()
            .map(|c| row.get(*c).map(cell_text).unwrap_or_default())
            .collect();
        lines.push(values.join(" | "));
    }

    if rows.len() > max_rows {
        lines.push(format!("... ({} more rows not shown)", rows.len() - max_rows));
    }

    lines.join("\n")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_input_reports_no_rows() {
        assert_eq!(format_rows(&[], DEFAULT_MAX_ROWS), "No rows returned.");
    }

    #[test]
    fn renders_header_separator_and_values() {
        let data = rows(json!([
            {"ServerName": "web-01", "CpuUsage": 91.5, "Healthy": false},
            {"ServerName": "web-02", "CpuUsage": null},
        ]));

        let text = format_rows(&data, DEFAULT_MAX_ROWS);

        assert_eq!(
            text,
            "ServerName | CpuUsage | Healthy\n\
             -----------+----------+--------\n\
             web-01 | 91.5 | false\n\
             web-02 | NULL | "
        );
    }

    #[test]
    fn columns_absent_from_first_row_are_ignored() {
        let data = rows(json!([
            {"a": 1},
            {"a": 2, "b": "extra"},
        ]));
        let text = format_rows(&data, DEFAULT_MAX_ROWS);
        assert_eq!(text, "a\n-\n1\n2");
    }

    #[test]
    fn truncates_and_reports_hidden_rows() {
        let data: Vec<Row> = (0..35)
            .map(|i| {
                let mut row = Row::new();
                row.insert("n".to_string(), json!(i));
                row
            })
            .collect();

        let text = format_rows(&data, 30);
        let lines: Vec<&str> = text.lines().collect();

        // header + separator + 30 data lines + trailer
        assert_eq!(lines.len(), 33);
        assert_eq!(lines[2], "0");
        assert_eq!(lines[31], "29");
        assert_eq!(lines[32], "... (5 more rows not shown)");
        assert!(text.contains("5 more rows not shown"));
    }

    #[test]
    fn exactly_at_cap_has_no_trailer() {
        let data: Vec<Row> = (0..30)
            .map(|i| rows(json!([{ "n": i }])).remove(0))
            .collect();
        assert!(!format_rows(&data, 30).contains("more rows not shown"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let data = rows(json!([{"x": "a", "y": [1, 2]}]));
        assert_eq!(format_rows(&data, 30), format_rows(&data, 30));
    }
}
