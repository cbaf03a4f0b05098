use tracing::{debug, info};

use crate::llm::models::AnalyzeRequest;
use crate::llm::CompletionClient;
use crate::prompt::templates::PromptTemplates;
use crate::prompt::{format_rows, DEFAULT_MAX_ROWS};
use crate::services::GenerationError;

pub const NO_QUERY_METADATA: &str = "No extra query metadata.";
const MAX_SQL_DISPLAY_CHARS: usize = 1000;

/// Describes where the rows came from: the question asked and the SQL that ran.
pub fn build_context_block(query: Option<&str>, sql: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        lines.push(format!("Original NL query: {}", query));
    }

    if let Some(sql) = sql.filter(|s| !s.is_empty()) {
        lines.push("SQL used (truncated):".to_string());
        let sql = sql.trim();
        let display = match sql.char_indices().nth(MAX_SQL_DISPLAY_CHARS) {
            Some((cut, _)) => format!("{}... [truncated]", &sql[..cut]),
            None => sql.to_string(),
        };
        lines.push(display);
    }

    if lines.is_empty() {
        return NO_QUERY_METADATA.to_string();
    }

    lines.join("\n")
}

pub fn build_analysis_prompt(
    templates: &PromptTemplates,
    request: &AnalyzeRequest,
) -> Result<String, GenerationError> {
    let table_text = format_rows(&request.rows, DEFAULT_MAX_ROWS);
    let context_block = build_context_block(request.query.as_deref(), request.sql.as_deref());

    Ok(templates.render_analysis_prompt(&context_block, &table_text)?)
}

/// Asks `model` for a capacity analysis of the request's rows.
pub async fn analyze_results(
    client: &dyn CompletionClient,
    templates: &PromptTemplates,
    model: &str,
    request: &AnalyzeRequest,
) -> Result<String, GenerationError> {
    let prompt = build_analysis_prompt(templates, request)?;
    debug!("Analysis prompt:\n{}", prompt);

    let raw = client.generate(model, &prompt).await?;
    let analysis = raw.trim();
    if analysis.is_empty() {
        return Err(GenerationError::EmptyCompletion("analysis"));
    }
    info!(
        "Analysis generated with model {} for {} rows",
        model,
        request.rows.len()
    );

    Ok(analysis.to_string())
}
