pub use crate::utils::IllustratorWrapper;
use crate::prompt;
use crate::prompt::PromptError;
use crate::utils::{AdvancedTemplateArgs, EmptyArgs, PromptSuggestionsArgs, RunScriptArgs};

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use illustrator::AutomationBridge;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, ErrorData as McpError, ServerHandler};
use rmcp::{tool_handler, tool_router};
use tracing::{error, info, warn};

/// Wraps a single text message as a complete tool result. Used for both
/// normal text results and soft failures, which by policy are reported as
/// text content rather than protocol-level errors.
fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

#[tool_router]
impl IllustratorWrapper {
    pub fn new(bridge: Arc<dyn AutomationBridge>) -> Self {
        Self {
            bridge,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "View a screenshot of the Adobe Illustrator window.")]
    pub async fn view(
        &self,
        Parameters(_args): Parameters<EmptyArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!("Capturing screenshot of the Illustrator window");
        let png = match self.bridge.capture_window().await {
            Ok(screenshot) => screenshot.to_png(),
            Err(e) => Err(e),
        };
        match png {
            Ok(png) => {
                let data = general_purpose::STANDARD.encode(&png);
                Ok(CallToolResult::success(vec![Content::image(
                    data,
                    "image/png".to_string(),
                )]))
            }
            Err(e) => {
                error!("Failed to capture screenshot: {e}");
                Ok(text_result(format!("Failed to capture screenshot: {e}")))
            }
        }
    }

    #[tool(description = "Run ExtendScript code in Illustrator.")]
    pub async fn run(
        &self,
        Parameters(args): Parameters<RunScriptArgs>,
    ) -> Result<CallToolResult, McpError> {
        let Some(code) = args.code else {
            warn!("No code provided for run tool");
            return Ok(text_result("No code provided"));
        };

        info!("Running ExtendScript code in Illustrator");
        match self.bridge.execute_script(&code).await {
            Ok(()) => {
                info!("ExtendScript executed successfully");
                Ok(text_result("Script executed successfully"))
            }
            Err(e) => {
                error!("Failed to execute script: {e}");
                Ok(text_result(format!("Failed to execute script: {e}")))
            }
        }
    }

    #[tool(
        description = "Get categorized prompt suggestions for creating content in Illustrator."
    )]
    pub async fn get_prompt_suggestions(
        &self,
        Parameters(args): Parameters<PromptSuggestionsArgs>,
    ) -> Result<CallToolResult, McpError> {
        let suggestions = prompt::get_prompt_suggestions();

        let text = match args.category.as_deref() {
            Some(category) => match prompt::category_label(category) {
                Some(label) => {
                    let mut text = format!("**{label}**\n\n");
                    for (_, items) in suggestions.iter().filter(|(l, _)| *l == label) {
                        for suggestion in items {
                            text.push_str(&format!("• {suggestion}\n"));
                        }
                    }
                    text
                }
                None => format!(
                    "Category '{category}' not found. Available categories: {}",
                    prompt::CATEGORY_KEYS.join(", ")
                ),
            },
            None => {
                let mut text = String::from("# 🎨 Illustrator Prompt Suggestions\n\n");
                for (label, items) in &suggestions {
                    text.push_str(&format!("## {label}\n\n"));
                    for suggestion in items {
                        text.push_str(&format!("• {suggestion}\n"));
                    }
                    text.push('\n');
                }
                text
            }
        };

        Ok(text_result(text))
    }

    #[tool(
        description = "Get the system prompt template for better AI guidance when working with Illustrator."
    )]
    pub async fn get_system_prompt(
        &self,
        Parameters(_args): Parameters<EmptyArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(prompt::get_system_prompt()))
    }

    #[tool(description = "Get tips for creating better prompts when working with Illustrator.")]
    pub async fn get_prompting_tips(
        &self,
        Parameters(_args): Parameters<EmptyArgs>,
    ) -> Result<CallToolResult, McpError> {
        let mut text = String::from("# 💡 Prompting Tips for Adobe Illustrator\n\n");
        for tip in prompt::get_prompting_tips() {
            text.push_str(&format!("{tip}\n"));
        }
        Ok(text_result(text))
    }

    #[tool(description = "Get an advanced prompt template for complex design tasks.")]
    pub async fn get_advanced_template(
        &self,
        Parameters(args): Parameters<AdvancedTemplateArgs>,
    ) -> Result<CallToolResult, McpError> {
        let Some(template_type) = args.template_type.as_deref() else {
            return Ok(text_result("Template type is required"));
        };

        let Some(body) = prompt::template(template_type) else {
            return Ok(text_result(format!(
                "Template '{template_type}' not found. Available templates: {}",
                prompt::template_ids().join(", ")
            )));
        };

        let parameters = args.parameters.as_ref().and_then(|v| v.as_object());
        let text = match parameters {
            Some(map) if !map.is_empty() => {
                match prompt::format_advanced_template(template_type, map) {
                    Ok(filled) => filled,
                    Err(PromptError::MissingParameter(key)) => {
                        // Recoverable degradation: hand back the unfilled
                        // template instead of discarding partial work.
                        format!(
                            "**{} Template:**\n\n{body}\n\n**Missing parameter:** {key}\n\
                             Please provide the required parameters to fill in the template.",
                            prompt::template_title(template_type)
                        )
                    }
                    Err(e) => {
                        error!("Error getting advanced template: {e}");
                        format!("Error: {e}")
                    }
                }
            }
            _ => format!(
                "**{} Template:**\n\n{body}",
                prompt::template_title(template_type)
            ),
        };

        Ok(text_result(text))
    }

    #[tool(
        description = "Display comprehensive help information for using the Illustrator MCP server."
    )]
    pub async fn help(
        &self,
        Parameters(_args): Parameters<EmptyArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text_result(prompt::display_help()))
    }
}

#[tool_handler]
impl ServerHandler for IllustratorWrapper {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(prompt::get_server_instructions()),
        }
    }
}
