//! Prompt assembly.
//!
//! The template is a static asset (`templates/sales_brief.md.j2`) compiled into
//! the binary and rendered with minijinja in strict mode, so a missing slot
//! is a render error rather than an empty string. Assembly is a pure
//! function of its input.

use minijinja::{Environment, UndefinedBehavior, context};

use salesbrief_types::brief::{CollectedInput, PromptText};
use salesbrief_types::error::BriefError;

/// Template source, embedded at compile time.
pub const TEMPLATE: &str = include_str!("../templates/sales_brief.md.j2");

/// Bumped whenever the template wording changes.
pub const TEMPLATE_VERSION: &str = "2";

const TEMPLATE_NAME: &str = "sales_brief.md";

/// Heading of the section that carries uploaded file content.
pub const FILE_SECTION_HEADING: &str = "File content:";

/// Slot value when neither overview text nor a file was supplied.
pub const NOT_PROVIDED: &str = "Not provided";

/// Render the template for `input` and append the file section if any.
pub fn assemble(input: &CollectedInput) -> Result<PromptText, BriefError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| BriefError::Template(e.to_string()))?;

    let form = &input.form;
    let rendered = env
        .get_template(TEMPLATE_NAME)
        .and_then(|tmpl| {
            tmpl.render(context! {
                product_name => &form.product_name,
                product_category => &form.product_category,
                competitors => &form.competitors,
                value_proposition => &form.value_proposition,
                target_customer => &form.target_customer,
                optional_overview => optional_overview(input),
            })
        })
        .map_err(|e| BriefError::Template(e.to_string()))?;

    Ok(PromptText::new(append_file_section(rendered, input.artifact_text())))
}

/// Value of the optional slot: overview text, else file name, else [`NOT_PROVIDED`].
fn optional_overview(input: &CollectedInput) -> &str {
    if let Some(text) = input
        .form
        .optional_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    {
        return text;
    }
    match &input.artifact {
        Some(artifact) if !artifact.file_name.is_empty() => &artifact.file_name,
        _ => NOT_PROVIDED,
    }
}

fn append_file_section(mut prompt: String, file_text: &str) -> String {
    if !file_text.is_empty() {
        prompt.push_str("\n\n---\n");
        prompt.push_str(FILE_SECTION_HEADING);
        prompt.push('\n');
        prompt.push_str(file_text);
    }
    prompt
}
