//! Read-only check for generated SQL.
//!
//! The generation prompt asks for a single SELECT, but nothing forces the
//! model to comply. This is the executable counterpart of those instructions.

use regex::Regex;
use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

const FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "MERGE", "ALTER", "DROP", "TRUNCATE", "EXEC", "EXECUTE",
    "CREATE", "GRANT", "REVOKE", "BACKUP", "RESTORE",
];

const FORBIDDEN_SCHEMAS: &[&str] = &[
    "MASTERDB",
    "RAGDB",
    "MSDB",
    "TEMPDB",
    "SYS.",
    "INFORMATION_SCHEMA",
];

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[^\n]*").unwrap());
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static FORBIDDEN_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", FORBIDDEN_KEYWORDS.join("|"))).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeSql {
    NotASelect,
    ForbiddenKeyword(String),
    ForbiddenSchema(String),
}

impl fmt::Display for UnsafeSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsafeSql::NotASelect => write!(f, "Unsafe SQL: must start with SELECT or WITH"),
            UnsafeSql::ForbiddenKeyword(k) => write!(f, "Unsafe SQL keyword: {}", k),
            UnsafeSql::ForbiddenSchema(s) => write!(f, "Unsafe schema: {}", s),
        }
    }
}

impl Error for UnsafeSql {}

fn strip_comments(sql: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(sql, " ");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Accepts only statements that read from the analytics telemetry tables.
///
/// Comments are ignored only when looking for the leading SELECT/WITH.
/// Keywords and schemas are searched in the full text, quoted literals and
/// comments included.
pub fn check_read_only(sql: &str) -> Result<(), UnsafeSql> {
    let statement = strip_comments(sql).trim().to_uppercase();

    if !(statement.starts_with("SELECT") || statement.starts_with("WITH")) {
        return Err(UnsafeSql::NotASelect);
    }

    let upper = sql.to_uppercase();

    if let Some(m) = FORBIDDEN_KEYWORD.find(&upper) {
        return Err(UnsafeSql::ForbiddenKeyword(m.as_str().to_string()));
    }

    if let Some(schema) = FORBIDDEN_SCHEMAS.iter().find(|s| upper.contains(*s)) {
        return Err(UnsafeSql::ForbiddenSchema(schema.to_string()));
    }

    Ok(())
}
