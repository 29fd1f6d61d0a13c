use log::warn;
use serde_json::Value;

use crate::records::{PipelineRun, Project};

use super::provider::TriggerRequest;
use super::types::{ApiProject, ApiRun};

impl From<ApiProject> for Project {
    fn from(api: ApiProject) -> Self {
        Self {
            name: api.name.unwrap_or_default(),
            id: api.id.unwrap_or_default(),
            description: api.description.unwrap_or_default(),
            url: api.url.unwrap_or_default(),
            state: api.state.unwrap_or_default(),
            revision: api.revision.unwrap_or_default(),
            visibility: api.visibility.unwrap_or_default(),
            last_update_time: api.last_update_time.unwrap_or_default(),
        }
    }
}

/// Maps a project listing payload to records, one per element, in order.
///
/// Accepts the `{"count": n, "value": [...]}` envelope or a bare array.
/// Anything else yields no projects.
pub fn projects(payload: Value) -> Vec<Project> {
    let elements = match payload {
        Value::Array(elements) => elements,
        Value::Object(mut envelope) => match envelope.remove("value") {
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                warn!("Ignoring project listing with non-array 'value': {other}");
                Vec::new()
            }
            None => Vec::new(),
        },
        Value::Null => Vec::new(),
        other => {
            warn!("Ignoring unexpected project listing payload: {other}");
            Vec::new()
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            Project::from(
                serde_json::from_value::<ApiProject>(element).unwrap_or_else(|e| {
                    warn!("Project at index {index} could not be decoded ({e}), using empty record");
                    ApiProject::default()
                }),
            )
        })
        .collect()
}

/// Combines the trigger inputs with the service's acknowledgment.
pub fn pipeline_run(organization: &str, request: &TriggerRequest, payload: Value) -> PipelineRun {
    let run = serde_json::from_value::<ApiRun>(payload).unwrap_or_else(|e| {
        warn!("Run acknowledgment could not be decoded ({e}), using empty fields");
        ApiRun::default()
    });

    PipelineRun {
        pipeline_id: request.pipeline_id(),
        project: request.project().to_string(),
        organization: organization.to_string(),
        branch: request.branch().map(ToString::to_string),
        run_id: run.id.unwrap_or_default(),
        name: run.name.clone().unwrap_or_default(),
        status: run.state.clone().unwrap_or_default(),
        url: run.web_url().unwrap_or_default().to_string(),
        created_date: run.created_date.unwrap_or_default(),
    }
}
