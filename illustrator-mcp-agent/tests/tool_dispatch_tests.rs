use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use illustrator::{AutomationBridge, AutomationError, ScreenshotResult};
use illustrator_mcp_agent::prompt;
use illustrator_mcp_agent::server::IllustratorWrapper;
use illustrator_mcp_agent::utils::{
    AdvancedTemplateArgs, EmptyArgs, PromptSuggestionsArgs, RunScriptArgs,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::json;

/// Records every bridge invocation and can be switched into a failing mode
/// mid-test to simulate the automation subsystem going away.
#[derive(Default)]
struct FakeBridge {
    captures: AtomicUsize,
    executions: AtomicUsize,
    fail: AtomicBool,
}

impl FakeBridge {
    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl AutomationBridge for FakeBridge {
    async fn capture_window(&self) -> Result<ScreenshotResult, AutomationError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AutomationError::PlatformError(
                "screen capture subsystem offline".to_string(),
            ));
        }
        Ok(ScreenshotResult {
            image_data: vec![0u8; 2 * 2 * 4],
            width: 2,
            height: 2,
        })
    }

    async fn execute_script(&self, _source: &str) -> Result<(), AutomationError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AutomationError::ScriptFailed(
                "COM rejected the request".to_string(),
            ));
        }
        Ok(())
    }
}

fn wrapper_with_bridge() -> (Arc<FakeBridge>, IllustratorWrapper) {
    let bridge = Arc::new(FakeBridge::default());
    let wrapper = IllustratorWrapper::new(bridge.clone());
    (bridge, wrapper)
}

fn first_text(result: &CallToolResult) -> &str {
    match &result
        .content
        .first()
        .expect("tool result should never be empty")
        .raw
    {
        RawContent::Text(text) => &text.text,
        other => panic!("expected text content, got {other:?}"),
    }
}

#[test]
fn catalog_and_dispatch_stay_in_lockstep() {
    let (_, wrapper) = wrapper_with_bridge();

    let expected: HashSet<&str> = [
        "view",
        "run",
        "get_prompt_suggestions",
        "get_system_prompt",
        "get_prompting_tips",
        "get_advanced_template",
        "help",
    ]
    .into_iter()
    .collect();

    let listed: HashSet<String> = wrapper
        .tool_router
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();

    assert_eq!(
        listed,
        expected.iter().map(|s| s.to_string()).collect::<HashSet<_>>()
    );
    for name in expected {
        assert!(wrapper.tool_router.has_route(name), "no route for {name}");
    }
}

#[test]
fn unknown_tool_name_has_no_route() {
    let (_, wrapper) = wrapper_with_bridge();
    assert!(!wrapper.tool_router.has_route("definitely_not_a_tool"));
}

#[tokio::test]
async fn run_without_code_short_circuits() {
    let (bridge, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .run(Parameters(RunScriptArgs { code: None }))
        .await
        .unwrap();

    assert_eq!(first_text(&result), "No code provided");
    assert_eq!(bridge.executions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn run_reports_success() {
    let (bridge, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .run(Parameters(RunScriptArgs {
            code: Some("app.documents.add();".to_string()),
        }))
        .await
        .unwrap();

    assert_eq!(first_text(&result), "Script executed successfully");
    assert_eq!(bridge.executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn view_returns_png_image_content() {
    let (bridge, wrapper) = wrapper_with_bridge();

    let result = wrapper.view(Parameters(EmptyArgs {})).await.unwrap();

    match &result.content.first().unwrap().raw {
        RawContent::Image(image) => {
            assert_eq!(image.mime_type, "image/png");
            assert!(!image.data.is_empty());
        }
        other => panic!("expected image content, got {other:?}"),
    }
    assert_eq!(bridge.captures.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bridge_failures_become_text_and_leave_dispatcher_usable() {
    let (bridge, wrapper) = wrapper_with_bridge();
    bridge.set_failing(true);

    let view = wrapper.view(Parameters(EmptyArgs {})).await.unwrap();
    assert!(first_text(&view).contains("Failed to capture screenshot"));

    let run = wrapper
        .run(Parameters(RunScriptArgs {
            code: Some("app.documents.add();".to_string()),
        }))
        .await
        .unwrap();
    assert!(first_text(&run).contains("Failed to execute script"));

    // Dispatcher keeps serving once the subsystem comes back.
    bridge.set_failing(false);
    let run = wrapper
        .run(Parameters(RunScriptArgs {
            code: Some("app.documents.add();".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(first_text(&run), "Script executed successfully");
}

#[tokio::test]
async fn suggestions_without_category_cover_every_category() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_prompt_suggestions(Parameters(PromptSuggestionsArgs { category: None }))
        .await
        .unwrap();

    let text = first_text(&result);
    for (label, _) in prompt::get_prompt_suggestions() {
        assert!(text.contains(label), "listing missing category {label}");
    }
}

#[tokio::test]
async fn suggestions_filter_by_category() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_prompt_suggestions(Parameters(PromptSuggestionsArgs {
            category: Some("logos".to_string()),
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    assert!(text.contains("Logos & Branding"));
    assert!(!text.contains("Typography & Text"));
}

#[tokio::test]
async fn unknown_category_lists_valid_keys() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_prompt_suggestions(Parameters(PromptSuggestionsArgs {
            category: Some("sculpture".to_string()),
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    assert!(text.contains("Category 'sculpture' not found"));
    for key in prompt::CATEGORY_KEYS {
        assert!(text.contains(key), "missing category key {key}");
    }
}

#[tokio::test]
async fn advanced_template_substitutes_all_parameters() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_advanced_template(Parameters(AdvancedTemplateArgs {
            template_type: Some("logo_design".to_string()),
            parameters: Some(json!({
                "company_name": "Acme",
                "industry": "technology",
                "style": "minimalist",
                "colors": "blue and white",
                "elements": "lettermark",
                "size": "1024x1024",
            })),
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    for value in [
        "Acme",
        "technology",
        "minimalist",
        "blue and white",
        "lettermark",
        "1024x1024",
    ] {
        assert!(text.contains(value), "substituted value {value} missing");
    }
    assert!(!text.contains("{company_name}"));
}

#[tokio::test]
async fn advanced_template_missing_parameter_returns_raw_template() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_advanced_template(Parameters(AdvancedTemplateArgs {
            template_type: Some("logo_design".to_string()),
            parameters: Some(json!({
                "company_name": "Acme",
                "industry": "technology",
                "style": "minimalist",
                "elements": "lettermark",
                "size": "1024x1024",
            })),
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    assert!(text.contains("{company_name}"), "raw placeholders expected");
    assert!(text.contains("Missing parameter"));
    assert!(text.contains("colors"));
}

#[tokio::test]
async fn advanced_template_without_parameters_keeps_placeholders() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_advanced_template(Parameters(AdvancedTemplateArgs {
            template_type: Some("logo_design".to_string()),
            parameters: None,
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    assert!(text.contains("Logo Design Template"));
    assert!(text.contains("{company_name}"));
}

#[tokio::test]
async fn unknown_template_lists_catalog_ids() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_advanced_template(Parameters(AdvancedTemplateArgs {
            template_type: Some("nonexistent_template".to_string()),
            parameters: None,
        }))
        .await
        .unwrap();

    let text = first_text(&result);
    assert!(text.contains("Template 'nonexistent_template' not found"));
    for id in prompt::template_ids() {
        assert!(text.contains(id), "missing template id {id}");
    }
}

#[tokio::test]
async fn missing_template_type_is_soft_error() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_advanced_template(Parameters(AdvancedTemplateArgs {
            template_type: None,
            parameters: Some(json!({"company_name": "Acme"})),
        }))
        .await
        .unwrap();

    assert_eq!(first_text(&result), "Template type is required");
}

#[tokio::test]
async fn static_text_tools_return_non_empty_text() {
    let (_, wrapper) = wrapper_with_bridge();

    let system = wrapper
        .get_system_prompt(Parameters(EmptyArgs {}))
        .await
        .unwrap();
    assert!(!first_text(&system).is_empty());

    let help = wrapper.help(Parameters(EmptyArgs {})).await.unwrap();
    assert!(first_text(&help).contains("get_advanced_template"));
}

#[tokio::test]
async fn prompting_tips_are_concatenated_in_order() {
    let (_, wrapper) = wrapper_with_bridge();

    let result = wrapper
        .get_prompting_tips(Parameters(EmptyArgs {}))
        .await
        .unwrap();

    let text = first_text(&result);
    let mut last_index = 0;
    for tip in prompt::get_prompting_tips() {
        let index = text[last_index..]
            .find(tip)
            .unwrap_or_else(|| panic!("tip out of order or missing: {tip}"));
        last_index += index + tip.len();
    }
}
