use std::fmt::Write;

use crate::llm::models::RagMetadata;

pub const NO_METADATA: &str =
    "No explicit metadata provided. You must still only use known telemetry tables.";

/// Renders retrieval metadata as labeled sections separated by blank lines.
///
/// Only non-empty sections are emitted, always in the order tables, columns,
/// joins, semantic tags, examples. When nothing is available the fixed
/// [`NO_METADATA`] line is returned instead.
pub fn format_metadata(metadata: Option<&RagMetadata>) -> String {
    let Some(metadata) = metadata else {
        return NO_METADATA.to_string();
    };

    let mut sections: Vec<String> = Vec::new();

    if let Some(tables) = non_empty(&metadata.tables) {
        let mut section = String::from("Tables:");
        for t in tables {
            let _ = write!(
                section,
                "\n- {}.{}: {}",
                t.schema,
                t.name,
                t.description.as_deref().unwrap_or("")
            );
        }
        sections.push(section);
    }

    if let Some(columns) = non_empty(&metadata.columns) {
        let mut section = String::from("Columns:");
        for c in columns {
            let _ = write!(
                section,
                "\n- {}.{}.{} ({}): {}",
                c.table_schema,
                c.table_name,
                c.name,
                c.data_type.as_deref().unwrap_or("unknown"),
                c.description.as_deref().unwrap_or("")
            );
        }
        sections.push(section);
    }

    if let Some(joins) = non_empty(&metadata.joins) {
        let mut section = String::from("Joins:");
        for j in joins {
            let _ = write!(
                section,
                "\n- {}.{}.{} {} JOIN {}.{}.{}",
                j.from_table_schema,
                j.from_table_name,
                j.from_column,
                j.join_type,
                j.to_table_schema,
                j.to_table_name,
                j.to_column
            );
        }
        sections.push(section);
    }

    if let Some(tags) = non_empty(&metadata.tags) {
        let mut section = String::from("Semantic Tags:");
        for tag in tags {
            // {:?} keeps the decimal point on whole weights (1.0, not 1)
            let _ = write!(
                section,
                "\n- [{}] {} -> {} (w={:?})",
                tag.target_type, tag.target, tag.tag, tag.weight
            );
        }
        sections.push(section);
    }

    if let Some(examples) = non_empty(&metadata.examples) {
        let mut section = String::from("Examples:");
        for ex in examples {
            let _ = write!(
                section,
                "\n- NL: {}\n  SQL: {}",
                ex.natural_language_query,
                ex.sql_example.trim()
            );
        }
        sections.push(section);
    }

    if sections.is_empty() {
        return NO_METADATA.to_string();
    }

    sections.join("\n\n")
}

fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::{ColumnInfo, ExampleQuery, JoinInfo, SemanticTag, TableInfo};

    fn table(name: &str, description: Option<&str>) -> TableInfo {
        TableInfo {
            schema: "dbo".to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn full_metadata() -> RagMetadata {
        RagMetadata {
            tables: Some(vec![table("CpuPerformance", Some("CPU samples per server"))]),
            columns: Some(vec![ColumnInfo {
                table_schema: "dbo".to_string(),
                table_name: "CpuPerformance".to_string(),
                name: "CpuUsage".to_string(),
                data_type: None,
                description: Some("Percent busy".to_string()),
            }]),
            joins: Some(vec![JoinInfo {
                from_table_schema: "dbo".to_string(),
                from_table_name: "CpuPerformance".to_string(),
                from_column: "ServerName".to_string(),
                to_table_schema: "dbo".to_string(),
                to_table_name: "MemoryPerformance".to_string(),
                to_column: "ServerName".to_string(),
                join_type: "INNER".to_string(),
            }]),
            tags: Some(vec![SemanticTag {
                target_type: "column".to_string(),
                target: "dbo.CpuPerformance.CpuUsage".to_string(),
                tag: "cpu".to_string(),
                weight: 1.0,
            }]),
            examples: Some(vec![ExampleQuery {
                natural_language_query: "busiest servers".to_string(),
                sql_example: "\n  SELECT TOP 10 ServerName FROM dbo.CpuPerformance  \n".to_string(),
            }]),
        }
    }

    #[test]
    fn absent_metadata_yields_fallback_sentence() {
        assert_eq!(format_metadata(None), NO_METADATA);
    }

    #[test]
    fn metadata_without_any_section_yields_fallback_sentence() {
        let empty = RagMetadata {
            tables: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(format_metadata(Some(&empty)), NO_METADATA);
    }

    #[test]
    fn tables_only_renders_single_section() {
        let metadata = RagMetadata {
            tables: Some(vec![
                table("CpuPerformance", Some("CPU samples")),
                table("DiskPerformance", None),
            ]),
            ..Default::default()
        };

        let text = format_metadata(Some(&metadata));

        assert_eq!(
            text,
            "Tables:\n- dbo.CpuPerformance: CPU samples\n- dbo.DiskPerformance: "
        );
        for header in ["Columns:", "Joins:", "Semantic Tags:", "Examples:"] {
            assert!(!text.contains(header), "unexpected {header}");
        }
    }

    #[test]
    fn all_sections_render_in_order() {
        let text = format_metadata(Some(&full_metadata()));

        let expected = "Tables:\n\
- dbo.CpuPerformance: CPU samples per server\n\
\n\
Columns:\n\
- dbo.CpuPerformance.CpuUsage (unknown): Percent busy\n\
\n\
Joins:\n\
- dbo.CpuPerformance.ServerName INNER JOIN dbo.MemoryPerformance.ServerName\n\
\n\
Semantic Tags:\n\
- [column] dbo.CpuPerformance.CpuUsage -> cpu (w=1.0)\n\
\n\
Examples:\n\
- NL: busiest servers\n  SQL: SELECT TOP 10 ServerName FROM dbo.CpuPerformance";
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_leading_section_leaves_no_blank_prefix() {
        let metadata = RagMetadata {
            joins: full_metadata().joins,
            ..Default::default()
        };
        assert!(format_metadata(Some(&metadata)).starts_with("Joins:\n- "));
    }

    #[test]
    fn rendering_is_deterministic() {
        let metadata = full_metadata();
        assert_eq!(format_metadata(Some(&metadata)), format_metadata(Some(&metadata)));
    }
}
