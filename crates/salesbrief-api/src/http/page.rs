//! Server-side rendering of the single form page.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use salesbrief_core::collector::MAX_UPLOAD_BYTES;
use salesbrief_core::presenter::download_file_name;
use salesbrief_types::brief::{CompletionResult, FormInput};

use crate::http::error::AppError;

const PAGE_TEMPLATE: &str = include_str!("../../templates/index.html.j2");

/// Severity of the message shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl From<&AppError> for Banner {
    fn from(err: &AppError) -> Self {
        let kind = if err.is_warning() {
            BannerKind::Warning
        } else {
            BannerKind::Error
        };
        Self {
            kind,
            message: err.describe().2,
        }
    }
}

/// Everything the page shows for one render.
#[derive(Debug, Default)]
pub struct PageView {
    /// Values echoed back into the inputs.
    pub form: FormInput,
    pub result: Option<CompletionResult>,
    pub banner: Option<Banner>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    form: &'a FormInput,
    result: Option<&'a CompletionResult>,
    banner: Option<&'a Banner>,
    download_name: Option<String>,
    max_upload_mb: usize,
    provider: &'a str,
    model: &'a str,
}

/// Render the page. Pure: reads the view, never touches session state.
pub fn render(view: &PageView, provider: &str, model: &str) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template("index.html", PAGE_TEMPLATE)
        .map_err(|e| AppError::Internal(format!("page template: {e}")))?;

    let ctx = PageContext {
        form: &view.form,
        result: view.result.as_ref(),
        banner: view.banner.as_ref(),
        download_name: view
            .result
            .as_ref()
            .filter(|r| !r.is_empty())
            .map(|r| download_file_name(&r.product_name)),
        max_upload_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
        provider,
        model,
    };

    env.get_template("index.html")
        .and_then(|t| t.render(&ctx))
        .map_err(|e| AppError::Internal(format!("page render: {e}")))
}

#[cfg(test)]
mod tests {
    use salesbrief_types::error::BriefError;

    use super::*;

    #[test]
    fn test_empty_page_has_form_and_no_result() {
        let html = render(&PageView::default(), "huggingface", "m").unwrap();
        assert!(html.contains("<h1>Sales Assistant</h1>"));
        assert!(html.contains("name=\"overview_file\""));
        assert!(html.contains("max 2 MB"));
        assert!(!html.contains("Download Result"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_result_is_escaped_and_download_named() {
        let view = PageView {
            result: Some(CompletionResult {
                text: "<script>alert(1)</script> & co".into(),
                product_name: "Acme Widget".into(),
            }),
            ..Default::default()
        };
        let html = render(&view, "huggingface", "m").unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("&amp; co"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("sales_insight_Acme Widget.txt"));
        assert!(html.contains("Download Result"));
    }

    #[test]
    fn test_empty_result_is_not_displayed() {
        let view = PageView {
            result: Some(CompletionResult {
                text: String::new(),
                product_name: "Acme Widget".into(),
            }),
            ..Default::default()
        };
        let html = render(&view, "huggingface", "m").unwrap();
        assert!(!html.contains("<h2>Result</h2>"));
        assert!(!html.contains("Download Result"));
    }

    #[test]
    fn test_form_values_are_echoed() {
        let view = PageView {
            form: FormInput {
                product_name: "Acme \"Pro\"".into(),
                optional_text: Some("Spec sheet".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render(&view, "huggingface", "m").unwrap();
        assert!(html.contains("value=\"Acme &quot;Pro&quot;\""));
        assert!(html.contains(">Spec sheet</textarea>"));
    }

    #[test]
    fn test_banner_kinds() {
        let warning = Banner::from(&AppError::Brief(BriefError::EmptyPrompt));
        assert_eq!(warning.kind, BannerKind::Warning);

        let error = Banner::from(&AppError::Brief(BriefError::FileTooLarge { size: 3, max: 2 }));
        assert_eq!(error.kind, BannerKind::Error);

        let html = render(
            &PageView {
                banner: Some(error),
                ..Default::default()
            },
            "huggingface",
            "m",
        )
        .unwrap();
        assert!(html.contains("class=\"banner error\""));
        assert!(html.contains("File too large! Please upload a file smaller than 2 MB."));
    }
}
