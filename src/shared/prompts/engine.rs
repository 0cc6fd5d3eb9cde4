//! Template engine for prompt management using Jinja2 syntax.
//!
//! Prompt templates live under `templates/prompts/` and are compiled into the
//! binary, so rendering never depends on the working directory.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Templates bundled at build time, keyed by their path under `templates/prompts/`
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (
        "ai/classify_system.jinja",
        include_str!("../../../templates/prompts/ai/classify_system.jinja"),
    ),
    (
        "ai/classify_user.jinja",
        include_str!("../../../templates/prompts/ai/classify_user.jinja"),
    ),
    (
        "ai/keywords_system.jinja",
        include_str!("../../../templates/prompts/ai/keywords_system.jinja"),
    ),
    (
        "ai/sentiment_system.jinja",
        include_str!("../../../templates/prompts/ai/sentiment_system.jinja"),
    ),
    (
        "ai/suggestion_system.jinja",
        include_str!("../../../templates/prompts/ai/suggestion_system.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in EMBEDDED_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Arguments
/// * `template_name` - Path under `templates/prompts/`, e.g. "ai/classify_user.jinja"
/// * `context` - A HashMap of variable names to values
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_missing_template() {
        let ctx = HashMap::new();
        let result = render_template("nonexistent.jinja", &ctx);
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_embedded_templates_load() {
        for (name, _) in EMBEDDED_TEMPLATES {
            assert!(template_exists(name), "{} should be loaded", name);
        }
        assert!(!template_exists("definitely_not_a_real_template.jinja"));
    }
}
