use std::env;
use std::sync::Arc;

use anyhow::Result;
use illustrator::AutomationBridge;
use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Per-session state handed to the tool router: the automation bridge chosen
/// at startup plus the router itself. Nothing here mutates across calls.
#[derive(Clone)]
pub struct IllustratorWrapper {
    pub bridge: Arc<dyn AutomationBridge>,
    pub tool_router: rmcp::handler::server::tool::ToolRouter<Self>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EmptyArgs {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunScriptArgs {
    #[schemars(description = "ExtendScript code to execute.")]
    pub code: Option<String>,
}

// `category` stays a plain string so an out-of-set value reaches the handler
// and gets the tailored "available categories" message instead of a schema
// deserialization fault.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PromptSuggestionsArgs {
    #[schemars(
        description = "Optional: Filter by category. One of 'basic_shapes', 'typography', \
                       'logos', 'illustrations', 'icons', 'artistic', 'charts', 'print'."
    )]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AdvancedTemplateArgs {
    #[schemars(
        description = "Type of template to get. One of 'logo_design', 'illustration', \
                       'infographic', 'icon_set'."
    )]
    pub template_type: Option<String>,
    #[schemars(
        description = "Parameters to fill in the template (varies by template type)."
    )]
    pub parameters: Option<serde_json::Value>,
}

pub fn init_logging() -> Result<()> {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    // stdout carries the MCP stdio transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    Ok(())
}
