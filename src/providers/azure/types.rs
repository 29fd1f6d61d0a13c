//! Wire shapes of the Azure DevOps responses.
//!
//! Every field is optional: the service schema evolves and a missing, null or
//! retyped field must fall back to an empty value without touching the others.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes one field, turning a type mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One element of `GET _apis/projects`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiProject {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub revision: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub visibility: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub last_update_time: Option<String>,
}

/// Body returned by `POST _apis/pipelines/{id}/runs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRun {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_date: Option<String>,
    #[serde(rename = "_links", deserialize_with = "lenient")]
    pub links: Option<ApiRunLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiRunLinks {
    #[serde(deserialize_with = "lenient")]
    pub web: Option<ApiLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiLink {
    #[serde(deserialize_with = "lenient")]
    pub href: Option<String>,
}

impl ApiRun {
    pub fn web_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.web.as_ref())
            .and_then(|web| web.href.as_deref())
    }
}
