use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Retrieval context supplied alongside a SQL generation request

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub table_schema: String,
    pub table_name: String,
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinInfo {
    pub from_table_schema: String,
    pub from_table_name: String,
    pub from_column: String,
    pub to_table_schema: String,
    pub to_table_name: String,
    pub to_column: String,
    pub join_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticTag {
    pub target_type: String,
    pub target: String,
    pub tag: String,
    #[serde(default = "default_tag_weight")]
    pub weight: f64,
}

fn default_tag_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleQuery {
    pub natural_language_query: String,
    pub sql_example: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagMetadata {
    #[serde(default)]
    pub tables: Option<Vec<TableInfo>>,
    #[serde(default)]
    pub columns: Option<Vec<ColumnInfo>>,
    #[serde(default)]
    pub joins: Option<Vec<JoinInfo>>,
    #[serde(default)]
    pub tags: Option<Vec<SemanticTag>>,
    #[serde(default)]
    pub examples: Option<Vec<ExampleQuery>>,
}

// Input for SQL generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlGenRequest {
    pub natural_language: String,
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub metric_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<RagMetadata>,
}

// Output from SQL generation
#[derive(Debug, Serialize, Deserialize)]
pub struct SqlGenResponse {
    pub generated_sql: String,
}

/// One result row, keyed by column name in the order the columns came back.
pub type Row = Map<String, Value>;

// Input for result analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub sql: Option<String>,
}

// Output from result analysis
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}
