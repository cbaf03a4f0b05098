use minijinja::{context, Environment};
use serde::Serialize;

pub const SQL_GENERATION: &str = "sql_generation.txt";
pub const ANALYSIS: &str = "analysis.txt";

/// The fixed prompt layouts, compiled once at startup.
///
/// Templates use the `.txt` suffix so minijinja applies no auto-escaping.
pub struct PromptTemplates {
    env: Environment<'static>,
}

impl PromptTemplates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(
            SQL_GENERATION,
            include_str!("../../templates/sql_generation.txt"),
        )?;
        env.add_template(ANALYSIS, include_str!("../../templates/analysis.txt"))?;
        Ok(Self { env })
    }

    /// System instructions, separator, then the user request, any hint
    /// lines and the metadata block.
    pub fn render_sql_prompt(
        &self,
        natural_language: &str,
        hints: &[String],
        metadata_block: &str,
    ) -> Result<String, minijinja::Error> {
        self.render(
            SQL_GENERATION,
            context! {
                natural_language => natural_language,
                hints => hints,
                metadata_block => metadata_block,
            },
        )
    }

    pub fn render_analysis_prompt(
        &self,
        context_block: &str,
        table_text: &str,
    ) -> Result<String, minijinja::Error> {
        self.render(
            ANALYSIS,
            context! {
                context => context_block,
                table => table_text,
            },
        )
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}
