//! One-shot `run` and `prompt` commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use salesbrief_core::collector::MAX_UPLOAD_BYTES;
use salesbrief_core::presenter::download_file_name;
use salesbrief_core::{collector, prompt};
use salesbrief_types::brief::{CompletionResult, FormInput, UploadedArtifact};
use salesbrief_types::error::BriefError;

use super::FormArgs;
use crate::state::AppState;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub fields: FormArgs,

    /// Optional product overview file (.txt, max 2 MB).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Write the result to this path.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write the result to `sales_insight_<product_name>.txt` in the current directory.
    #[arg(long, conflicts_with = "out")]
    pub save: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Generate one brief and print (and optionally save) it.
pub async fn run_brief(state: &AppState, args: RunArgs) -> anyhow::Result<()> {
    let artifact = match &args.file {
        Some(path) => Some(read_artifact(path).await?),
        None => None,
    };
    let form = FormInput::from(args.fields);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = state.brief_service.generate(form, artifact).await;
    spinner.finish_and_clear();
    let result = outcome?;

    let target = match (args.out, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(download_file_name(&result.product_name))),
        (None, false) => None,
    };
    if let Some(path) = &target {
        write_result(path, &result).await?;
    }

    if args.json {
        let invoker = state.brief_service.invoker();
        let value = serde_json::json!({
            "text": result.text,
            "product_name": result.product_name,
            "download_file_name": download_file_name(&result.product_name),
            "saved_to": target.as_ref().map(|p| p.display().to_string()),
            "provider": invoker.provider_name(),
            "model": invoker.model(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", result.text);
    if let Some(path) = &target {
        eprintln!(
            "\n  {} Saved to {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

/// Print the assembled prompt. Needs no credential.
pub async fn print_prompt(fields: FormArgs, file: Option<PathBuf>) -> anyhow::Result<()> {
    let artifact = match &file {
        Some(path) => Some(read_artifact(path).await?),
        None => None,
    };
    let collected = collector::collect(FormInput::from(fields), artifact)?;
    let text = prompt::assemble(&collected)?;
    println!("{text}");
    Ok(())
}

/// Read an overview file, refusing oversized files before loading them.
pub async fn read_artifact(path: &Path) -> anyhow::Result<UploadedArtifact> {
    let size = tokio::fs::metadata(path).await?.len() as usize;
    if size > MAX_UPLOAD_BYTES {
        return Err(BriefError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        }
        .into());
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedArtifact::new(file_name, bytes))
}

async fn write_result(path: &Path, result: &CompletionResult) -> anyhow::Result<()> {
    tokio::fs::write(path, &result.text).await?;
    tracing::info!(path = %path.display(), bytes = result.text.len(), "result saved");
    Ok(())
}
