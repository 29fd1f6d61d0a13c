use url::Url;

use crate::error::{AzdoError, Result};

pub const PROJECTS_API_VERSION: &str = "7.1-preview.4";
pub const PIPELINE_RUNS_API_VERSION: &str = "7.1-preview.1";

/// `{base}/{organization}/_apis/projects?api-version=7.1-preview.4`
pub fn projects_url(base_url: &Url, organization: &str) -> Result<Url> {
    api_url(
        base_url,
        &[organization, "_apis", "projects"],
        PROJECTS_API_VERSION,
    )
}

/// `{base}/{organization}/{project}/_apis/pipelines/{id}/runs?api-version=7.1-preview.1`
///
/// The project segment is percent-encoded, so names with spaces are safe.
pub fn pipeline_runs_url(
    base_url: &Url,
    organization: &str,
    project: &str,
    pipeline_id: u32,
) -> Result<Url> {
    let pipeline_id = pipeline_id.to_string();
    api_url(
        base_url,
        &[organization, project, "_apis", "pipelines", pipeline_id.as_str(), "runs"],
        PIPELINE_RUNS_API_VERSION,
    )
}

fn api_url(base_url: &Url, segments: &[&str], api_version: &str) -> Result<Url> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|()| AzdoError::Config(format!("Base URL cannot carry a path: {base_url}")))?
        .pop_if_empty()
        .extend(segments);

    url.query_pairs_mut().append_pair("api-version", api_version);

    Ok(url)
}
