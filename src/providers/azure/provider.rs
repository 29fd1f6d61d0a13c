use log::info;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Credentials;
use crate::error::{AzdoError, Result};
use crate::records::{PipelineRun, Project};

use super::client::AzureDevOpsClient;
use super::{endpoints, normalize};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Validated inputs of a pipeline trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRequest {
    project: String,
    pipeline_id: u32,
    branch: Option<String>,
}

impl TriggerRequest {
    /// Validates the raw trigger arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AzdoError::InvalidArgument`] if:
    /// - the project is blank, `.` or `..`
    /// - the pipeline id is not a positive integer
    /// - the branch is blank or contains whitespace
    pub fn new(project: &str, pipeline_id: &str, branch: Option<&str>) -> Result<Self> {
        let project = project.trim();
        if project.is_empty() {
            return Err(AzdoError::InvalidArgument(
                "project must not be blank".to_string(),
            ));
        }
        // Dot segments would be collapsed out of the request path.
        if matches!(project, "." | "..") {
            return Err(AzdoError::InvalidArgument(format!(
                "project must be a name, got '{project}'"
            )));
        }

        let pipeline_id = pipeline_id
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                AzdoError::InvalidArgument(format!(
                    "pipeline id must be a positive integer, got '{pipeline_id}'"
                ))
            })?;

        let branch = branch.map(normalize_branch).transpose()?;

        Ok(Self {
            project: project.to_string(),
            pipeline_id,
            branch,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn pipeline_id(&self) -> u32 {
        self.pipeline_id
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// `{}` without a branch, otherwise the `resources.repositories.self.refName` override.
    pub fn body(&self) -> Value {
        match &self.branch {
            None => json!({}),
            Some(branch) => json!({
                "resources": {
                    "repositories": {
                        "self": {
                            "refName": format!("{BRANCH_REF_PREFIX}{branch}")
                        }
                    }
                }
            }),
        }
    }
}

fn normalize_branch(branch: &str) -> Result<String> {
    let branch = branch.trim();
    let branch = branch.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(branch);

    if branch.is_empty() || branch.chars().any(char::is_whitespace) {
        return Err(AzdoError::InvalidArgument(format!(
            "branch must be a non-empty ref name without whitespace, got '{branch}'"
        )));
    }

    Ok(branch.to_string())
}

/// Azure DevOps operations for one organization.
pub struct AzureDevOpsProvider {
    client: AzureDevOpsClient,
    organization: String,
}

impl AzureDevOpsProvider {
    /// Creates a provider bound to the resolved organization and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let client = AzureDevOpsClient::new(base_url, &credentials.token, timeout)?;

        Ok(Self {
            client,
            organization: credentials.organization.clone(),
        })
    }

    /// Lists every project of the organization, in the order the service returns them.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        info!("Listing projects for organization: {}", self.organization);

        let url = endpoints::projects_url(self.client.base_url(), &self.organization)?;
        let payload = self.client.invoke(Method::GET, url, None).await?;
        let projects = normalize::projects(payload);

        info!("Fetched {} projects", projects.len());

        Ok(projects)
    }

    /// Queues one run of a pipeline and returns the service's acknowledgment.
    pub async fn trigger_pipeline(&self, request: &TriggerRequest) -> Result<PipelineRun> {
        info!(
            "Triggering pipeline {} in {}/{}{}",
            request.pipeline_id(),
            self.organization,
            request.project(),
            request
                .branch()
                .map(|b| format!(" on branch {b}"))
                .unwrap_or_default()
        );

        let url = endpoints::pipeline_runs_url(
            self.client.base_url(),
            &self.organization,
            request.project(),
            request.pipeline_id(),
        )?;
        let body = request.body();
        let payload = self.client.invoke(Method::POST, url, Some(&body)).await?;
        let run = normalize::pipeline_run(&self.organization, request, payload);

        info!("Queued run {} ({})", run.run_id, run.status);

        Ok(run)
    }
}
