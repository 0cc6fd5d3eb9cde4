//! Prompt template management module.
//!
//! Templates are stored in `templates/prompts/` and use Jinja2 syntax.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

use crate::features::ai::models::SENTIMENT_LABELS;
use crate::features::reports::models::{ReportCategory, ReportUrgency};

/// Render the classification system prompt from the category and urgency taxonomies.
pub fn render_classify_system_prompt() -> Result<String, TemplateError> {
    let categories: Vec<Value> = ReportCategory::ALL
        .iter()
        .map(|c| Value::from_iter([("value", c.as_str()), ("hint", c.classifier_hint())]))
        .collect();
    let urgencies: Vec<Value> = ReportUrgency::ALL
        .iter()
        .map(|u| Value::from_iter([("value", u.as_str()), ("hint", u.classifier_hint())]))
        .collect();

    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("categories", Value::from(categories));
    ctx.insert("urgencies", Value::from(urgencies));

    render_template("ai/classify_system.jinja", &ctx)
}

/// Render the user turn of a classification request.
pub fn render_classify_user_prompt(text: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("text", Value::from(text));

    render_template("ai/classify_user.jinja", &ctx)
}

pub fn render_keywords_system_prompt() -> Result<String, TemplateError> {
    render_template("ai/keywords_system.jinja", &HashMap::new())
}

pub fn render_sentiment_system_prompt() -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("sentiments", Value::from(SENTIMENT_LABELS.to_vec()));

    render_template("ai/sentiment_system.jinja", &ctx)
}

pub fn render_suggestion_system_prompt() -> Result<String, TemplateError> {
    render_template("ai/suggestion_system.jinja", &HashMap::new())
}
