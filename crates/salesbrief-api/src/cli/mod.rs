//! CLI command definitions for the `sbrief` binary.

pub mod run;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use salesbrief_infra::config::{load_config, DEFAULT_CONFIG_FILE};
use salesbrief_types::brief::FormInput;
use salesbrief_types::config::AppConfig;
use salesbrief_types::llm::ProviderKind;

/// Turn a product brief into a sales one-pager.
#[derive(Parser)]
#[command(name = "sbrief", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ./salesbrief.toml if present).
    #[arg(long, global = true, env = "SALESBRIEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Completion provider: huggingface (hf) or openai.
    #[arg(long, global = true, env = "SALESBRIEF_PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// Model identifier.
    #[arg(long, global = true, env = "SALESBRIEF_MODEL")]
    pub model: Option<String>,

    /// Override the provider base URL.
    #[arg(long, global = true, env = "SALESBRIEF_BASE_URL")]
    pub base_url: Option<String>,

    /// Upper bound on generated tokens.
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web form.
    Serve {
        /// Address to bind.
        #[arg(long, env = "SALESBRIEF_HOST")]
        host: Option<String>,

        /// Port to listen on.
        #[arg(short, long, env = "SALESBRIEF_PORT")]
        port: Option<u16>,
    },

    /// Generate one brief and print it.
    Run(run::RunArgs),

    /// Print the assembled prompt without calling the provider.
    Prompt {
        #[command(flatten)]
        fields: FormArgs,

        /// Optional product overview file (.txt, max 2 MB).
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// The form fields as flags. Empty fields are allowed.
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// What product are you selling?
    #[arg(long, default_value = "")]
    pub product_name: String,

    /// One word or a sentence.
    #[arg(long, default_value = "")]
    pub product_category: String,

    /// Competitor names or URLs.
    #[arg(long, default_value = "")]
    pub competitors: String,

    /// A sentence summarizing the product's value.
    #[arg(long, default_value = "")]
    pub value_proposition: String,

    /// Name of the person you are trying to sell to.
    #[arg(long, default_value = "")]
    pub target_customer: String,

    /// Free-text product overview.
    #[arg(long)]
    pub overview: Option<String>,
}

impl From<FormArgs> for FormInput {
    fn from(args: FormArgs) -> Self {
        FormInput {
            product_name: args.product_name,
            product_category: args.product_category,
            competitors: args.competitors,
            value_proposition: args.value_proposition,
            target_customer: args.target_customer,
            optional_text: args.overview,
        }
    }
}

impl Cli {
    /// Load the config file, then layer the global flags on top.
    pub async fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path, true).await?,
            None => load_config(Path::new(DEFAULT_CONFIG_FILE), false).await?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(provider) = self.provider
            && provider != config.provider
        {
            // A file model belongs to the file's provider.
            config.provider = provider;
            config.model = None;
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = Some(max_tokens);
        }
        tracing::debug!(
            provider = %config.provider,
            model = ?config.model,
            base_url = ?config.base_url,
            "configuration resolved"
        );
    }
}
