use std::env;

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),
}

/// Short category keys accepted by the `get_prompt_suggestions` tool, in the
/// order they are listed back to the caller.
pub const CATEGORY_KEYS: [&str; 8] = [
    "basic_shapes",
    "typography",
    "logos",
    "illustrations",
    "icons",
    "artistic",
    "charts",
    "print",
];

/// Maps a short category key to the display label used in the suggestion
/// listing.
pub fn category_label(key: &str) -> Option<&'static str> {
    match key {
        "basic_shapes" => Some("🎨 Basic Shapes & Geometry"),
        "typography" => Some("📝 Typography & Text"),
        "logos" => Some("🏢 Logos & Branding"),
        "illustrations" => Some("🌆 Illustrations & Scenes"),
        "icons" => Some("🎭 Icons & UI Elements"),
        "artistic" => Some("🎨 Artistic & Creative"),
        "charts" => Some("📊 Charts & Infographics"),
        "print" => Some("🏷️ Print & Layout"),
        _ => None,
    }
}

/// Categorized prompt suggestions, ordered the way they should be rendered.
pub fn get_prompt_suggestions() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "🎨 Basic Shapes & Geometry",
            vec![
                "Draw a 200x200pt blue square centered on the artboard",
                "Create a grid of 5x5 circles with 10pt spacing",
                "Make a hexagon with a 3pt dashed stroke and no fill",
                "Draw three overlapping translucent ellipses in primary colors",
            ],
        ),
        (
            "📝 Typography & Text",
            vec![
                "Add the headline 'Summer Sale' in 72pt bold across the top",
                "Set a paragraph of placeholder text in two balanced columns",
                "Put the company name on a curved path following an arc",
                "Convert the word 'Flow' to outlines and skew it 15 degrees",
            ],
        ),
        (
            "🏢 Logos & Branding",
            vec![
                "Design a minimalist lettermark logo from the initials 'AV'",
                "Create a circular badge logo with text around the rim",
                "Build a geometric mountain logo using two triangles and a circle",
                "Draft a monochrome wordmark with generous letter spacing",
            ],
        ),
        (
            "🌆 Illustrations & Scenes",
            vec![
                "Illustrate a flat-style city skyline at dusk",
                "Draw a simple landscape with rolling hills and a sun",
                "Create an isometric desk scene with a laptop and coffee mug",
                "Compose an underwater scene with three fish and seaweed",
            ],
        ),
        (
            "🎭 Icons & UI Elements",
            vec![
                "Create a 24x24pt gear icon on a 2pt stroke grid",
                "Draw a set of media player icons: play, pause, stop",
                "Make a rounded-rectangle button with a subtle drop shadow",
                "Design a location pin icon with a punched-out center",
            ],
        ),
        (
            "🎨 Artistic & Creative",
            vec![
                "Generate a spiral of rotated rectangles fading in opacity",
                "Create a gradient mesh sunset in warm tones",
                "Scatter 50 random stars of varying sizes across the artboard",
                "Build a symmetrical mandala from repeated petal shapes",
            ],
        ),
        (
            "📊 Charts & Infographics",
            vec![
                "Draw a bar chart for the values 12, 38, 25, 50",
                "Create a pie chart split 60/25/15 with a legend",
                "Lay out a four-step process diagram with arrows",
                "Make a timeline with five evenly spaced milestones",
            ],
        ),
        (
            "🏷️ Print & Layout",
            vec![
                "Set up an A4 poster with a 20mm margin grid",
                "Create a tri-fold brochure layout with guides",
                "Design a standard 85x55mm business card front",
                "Add crop marks and a 3mm bleed to the current artboard",
            ],
        ),
    ]
}

/// System prompt handed to the calling agent for better ExtendScript output.
pub fn get_system_prompt() -> String {
    "You are controlling Adobe Illustrator through an MCP server. Two tools do the real work: \
     `view` returns a screenshot of the Illustrator window, and `run` executes ExtendScript \
     (Illustrator's JavaScript dialect) inside the application.\n\n\
     Guidelines:\n\
     - Always call `view` first to see the current state of the document before drawing.\n\
     - Write complete, self-contained ExtendScript: obtain the document with \
     `app.activeDocument` (or `app.documents.add()` when none is open) and work in points.\n\
     - Illustrator's Y axis grows downward from the top-left of the artboard; position items \
     with `item.position = [x, y]` and size them via `width`/`height`.\n\
     - Set colors by assigning `RGBColor` instances to `fillColor`/`strokeColor`; never rely \
     on the current tool state.\n\
     - After each `run`, call `view` again to verify the result before continuing.\n\
     - Prefer several small scripts over one large one so a single failure loses less work."
        .to_string()
}

/// Tips shown by the `get_prompting_tips` tool, in display order.
pub fn get_prompting_tips() -> Vec<&'static str> {
    vec![
        "1. Be specific about sizes and positions: '200x200pt square at the artboard center' beats 'a square'.",
        "2. Name exact colors (hex or RGB) instead of vague descriptions like 'nice blue'.",
        "3. Break complex artwork into steps: shapes first, then color, then text, then effects.",
        "4. Ask for a screenshot between steps so mistakes are caught early.",
        "5. Mention the artboard size up front if the layout depends on it.",
        "6. Reference named templates (logo_design, illustration, infographic, icon_set) for bigger tasks.",
        "7. When a script fails, include the reported error in your next request instead of retrying blindly.",
    ]
}

/// Advanced templates keyed by id, ordered for listing. Placeholders use
/// `{name}` syntax and are filled by [`format_advanced_template`].
pub fn get_advanced_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "logo_design",
            "Create a professional logo for {company_name}, a company in the {industry} industry.\n\
             Style: {style}\n\
             Color palette: {colors}\n\
             Key elements to include: {elements}\n\
             Artboard size: {size}\n\n\
             Work vector-first: build the mark from basic shapes, keep it legible at 16px, \
             and place the logotype on its own layer.",
        ),
        (
            "illustration",
            "Create an illustration of {subject} with a {mood} mood.\n\
             Color palette: {palette}\n\
             Composition: {composition}\n\n\
             Block in large background shapes first, then mid-ground elements, then foreground \
             details. Keep every element on a named layer.",
        ),
        (
            "infographic",
            "Design an infographic about {topic} for {audience}.\n\
             Data to visualize: {data_points}\n\
             Layout: {layout}\n\n\
             Establish a typographic hierarchy (title, section headers, captions), use a \
             consistent icon style, and align everything to a column grid.",
        ),
        (
            "icon_set",
            "Create a set of {count} icons on the theme of {theme}.\n\
             Style: {style}\n\
             Grid: {grid_size}\n\n\
             Keep stroke weights identical across the set, snap anchor points to the pixel \
             grid, and give each icon its own artboard.",
        ),
    ]
}

/// Looks up a template body by id.
pub fn template(template_type: &str) -> Option<&'static str> {
    get_advanced_templates()
        .into_iter()
        .find(|(id, _)| *id == template_type)
        .map(|(_, body)| body)
}

/// Template ids, derived from the catalog so a listing never drifts from it.
pub fn template_ids() -> Vec<&'static str> {
    get_advanced_templates().into_iter().map(|(id, _)| id).collect()
}

/// "logo_design" -> "Logo Design"
pub fn template_title(template_type: &str) -> String {
    template_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex is valid"));

/// Substitutes named parameters into the template identified by
/// `template_type`. Fails on the first placeholder with no supplied value and
/// on unknown template ids.
pub fn format_advanced_template(
    template_type: &str,
    parameters: &serde_json::Map<String, serde_json::Value>,
) -> Result<String, PromptError> {
    let body = template(template_type)
        .ok_or_else(|| PromptError::UnknownTemplate(template_type.to_string()))?;

    let mut missing: Option<String> = None;
    let filled = PLACEHOLDER_RE.replace_all(body, |caps: &regex::Captures| {
        let key = &caps[1];
        match parameters.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                if missing.is_none() {
                    missing = Some(key.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    if let Some(key) = missing {
        return Err(PromptError::MissingParameter(key));
    }
    Ok(filled.into_owned())
}

/// Help text for the `help` tool.
pub fn display_help() -> String {
    "# Illustrator MCP Server\n\n\
     Drives Adobe Illustrator on behalf of an AI agent.\n\n\
     ## Tools\n\n\
     - `view` — capture a screenshot of the Illustrator window.\n\
     - `run` — execute ExtendScript code inside Illustrator. Requires a `code` argument.\n\
     - `get_prompt_suggestions` — categorized prompt ideas; pass `category` to filter.\n\
     - `get_system_prompt` — the system prompt template for guiding ExtendScript generation.\n\
     - `get_prompting_tips` — tips for writing better Illustrator prompts.\n\
     - `get_advanced_template` — fill-in templates for complex design tasks \
     (`template_type` required, `parameters` optional).\n\
     - `help` — this text.\n\n\
     ## Typical session\n\n\
     1. `view` to see the current document.\n\
     2. `run` with a small ExtendScript snippet.\n\
     3. `view` again to verify, then iterate.\n\n\
     Illustrator must be running on a Windows host with COM automation available; \
     on other hosts the automation tools report that they are unavailable."
        .to_string()
}

/// Instructions advertised in the MCP `initialize` result: the system prompt
/// plus contextual information about the host.
pub fn get_server_instructions() -> String {
    let current_date_time = Local::now().to_string();
    let current_os = env::consts::OS;
    let current_working_dir = env::current_dir()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "Unknown".to_string());

    format!(
        "{}\n\nContextual information:\n\
         - The current date and time is {current_date_time}.\n\
         - Current operating system: {current_os}.\n\
         - Current working directory: {current_working_dir}.",
        get_system_prompt()
    )
}
