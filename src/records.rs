use serde::Serialize;

/// An Azure DevOps project as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub id: String,
    pub description: String,
    pub url: String,
    pub state: String,
    pub revision: u64,
    pub visibility: String,
    pub last_update_time: String,
}

/// Acknowledgment of a queued pipeline run.
///
/// Combines what was asked for (pipeline, project, organization, branch)
/// with what the service assigned. It is a snapshot: nothing polls it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub pipeline_id: u32,
    pub project: String,
    pub organization: String,
    pub branch: Option<String>,
    pub run_id: u64,
    pub name: String,
    pub status: String,
    pub url: String,
    pub created_date: String,
}
