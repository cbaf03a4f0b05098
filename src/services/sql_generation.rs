use tracing::{debug, info, warn};

use crate::config::SqlGuardMode;
use crate::llm::models::SqlGenRequest;
use crate::llm::CompletionClient;
use crate::prompt::format_metadata;
use crate::prompt::json::to_prompt_json;
use crate::prompt::templates::PromptTemplates;
use crate::services::sql_safety::check_read_only;
use crate::services::GenerationError;

const FENCE: &str = "```";

/// Builds the full SQL generation prompt for a request.
pub fn build_sql_prompt(
    templates: &PromptTemplates,
    request: &SqlGenRequest,
) -> Result<String, GenerationError> {
    let metadata_block = format_metadata(request.metadata.as_ref());

    let mut hints = Vec::new();
    if let Some(time_range) = non_blank(request.time_range.as_deref()) {
        hints.push(format!("Time range hint: {}", time_range));
    }
    if let Some(metric_type) = non_blank(request.metric_type.as_deref()) {
        hints.push(format!("Metric type hint: {}", metric_type));
    }
    if let Some(filters) = request.filters.as_ref().filter(|f| !f.is_empty()) {
        hints.push(format!(
            "Structured filters: {}",
            to_prompt_json(filters)?
        ));
    }

    Ok(templates.render_sql_prompt(&request.natural_language, &hints, &metadata_block)?)
}

/// Strips markdown code fences and a leading `sql` language tag.
///
/// Text without fences is only trimmed.
pub fn clean_generated_sql(raw: &str) -> String {
    let sql = raw.trim();
    if !sql.contains(FENCE) {
        return sql.to_string();
    }

    let parts: Vec<&str> = sql.split(FENCE).collect();
    let inner = if parts.len() >= 3 {
        parts[1].to_string()
    } else {
        parts.concat()
    };

    strip_language_tag(inner.trim()).trim().to_string()
}

fn strip_language_tag(text: &str) -> &str {
    match text.get(..3) {
        Some(tag) if tag.eq_ignore_ascii_case("sql") => {
            let rest = &text[3..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                text
            }
        }
        _ => text,
    }
}

/// Generates a bare SQL string for the request using `model`.
pub async fn generate_sql(
    client: &dyn CompletionClient,
    templates: &PromptTemplates,
    model: &str,
    guard: SqlGuardMode,
    request: &SqlGenRequest,
) -> Result<String, GenerationError> {
    let prompt = build_sql_prompt(templates, request)?;
    debug!("SQL generation prompt:\n{}", prompt);

    let raw = client.generate(model, &prompt).await?;
    debug!("Raw SQL completion: {}", raw);

    let sql = clean_generated_sql(&raw);
    if sql.is_empty() {
        return Err(GenerationError::EmptyCompletion("SQL query"));
    }
    info!("Generated SQL with model {}: {}", model, sql);

    if guard != SqlGuardMode::Off {
        if let Err(reason) = check_read_only(&sql) {
            if guard == SqlGuardMode::Reject {
                return Err(reason.into());
            }
            warn!("Generated SQL failed the read-only check ({}): {}", reason, sql);
        }
    }

    Ok(sql)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
