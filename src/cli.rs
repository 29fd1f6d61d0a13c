use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{resolve, Config, Defaults, OutputFormat};
use crate::error::AzdoError;
use crate::output::{export_report, Report, RequestProgress};
use crate::providers::{AzureDevOpsProvider, TriggerRequest};

#[derive(Parser)]
#[command(name = "azdo")]
#[command(author, version, about = "Azure DevOps projects and pipelines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./azdo.toml, .json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Azure DevOps service root
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CredentialArgs {
    /// Organization name [default: $ORGANIZATION]
    #[arg(long)]
    organization: Option<String>,

    /// Personal access token [default: $PAT]
    #[arg(long)]
    pat: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the projects of an organization
    ListProjects {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Queue a run of a pipeline
    TriggerPipeline {
        #[arg(short = 'P', long)]
        project: String,

        #[arg(long)]
        pipeline_id: String,

        /// Branch to build instead of the pipeline's default
        #[arg(short, long)]
        branch: Option<String>,

        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

impl Commands {
    fn credentials(&self) -> &CredentialArgs {
        match self {
            Self::ListProjects { credentials } | Self::TriggerPipeline { credentials, .. } => {
                credentials
            }
        }
    }

    fn progress_message(&self) -> &'static str {
        match self {
            Self::ListProjects { .. } => "Fetching projects",
            Self::TriggerPipeline { .. } => "Queueing pipeline run",
        }
    }
}

impl Cli {
    /// Resolves settings, performs the command's single request and returns its report.
    ///
    /// Nothing is sent when arguments or credentials are invalid.
    pub async fn collect(&self, env: Defaults, config: &Config) -> Result<Report> {
        let defaults = env.with_fallback(config);
        let args = self.command.credentials();
        let credentials = resolve(args.organization.as_deref(), args.pat.as_deref(), &defaults)?;

        let trigger = match &self.command {
            Commands::TriggerPipeline {
                project,
                pipeline_id,
                branch,
                ..
            } => Some(TriggerRequest::new(project, pipeline_id, branch.as_deref())?),
            Commands::ListProjects { .. } => None,
        };

        let base_url = self.base_url.as_deref().unwrap_or(&config.base_url);
        let timeout = Duration::from_secs(self.timeout.unwrap_or(config.timeout_secs));
        let provider = AzureDevOpsProvider::new(base_url, &credentials, timeout)?;

        let report = match trigger {
            Some(request) => Report::Run(provider.trigger_pipeline(&request).await?),
            None => Report::Projects(provider.list_projects().await?),
        };

        Ok(report)
    }

    pub async fn execute(&self, env: Defaults) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let progress = RequestProgress::start(self.command.progress_message());
        let report = match self.collect(env, &config).await {
            Ok(report) => {
                progress.succeed(self.command.progress_message());
                report
            }
            Err(e) => {
                progress.fail(self.command.progress_message());
                if let Some(401 | 203) = e.downcast_ref::<AzdoError>().and_then(AzdoError::status) {
                    warn!("Azure DevOps rejected the PAT; check that it has not expired and grants the required scopes");
                }
                return Err(e);
            }
        };

        let format = self.format.unwrap_or(config.output.format);
        let pretty = self.pretty || config.output.pretty;

        if let Some(output_path) = &self.output {
            let mut file = std::fs::File::create(output_path)?;
            export_report(&report, format, pretty, &mut file)?;
            info!("Report written to: {}", output_path.display());
        } else {
            export_report(&report, format, pretty, &mut std::io::stdout().lock())?;
        }

        Ok(())
    }
}
