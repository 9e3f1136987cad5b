//! Jira Cloud REST client.
//!
//! Implements [`Tracker`] against the v3 REST API with basic authentication
//! (account email plus API token).

use async_trait::async_trait;
use chrono::NaiveDate;
use fixver_core::{
    Credentials, CurrentUser, IssueFields, NewVersion, Project, ProjectId, TicketKey, Version,
    VersionId,
};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::trait_::{IssuePatch, Result, Tracker, TrackerError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira REST client.
#[derive(Clone)]
pub struct JiraClient {
    /// HTTP client
    client: Client,

    /// Instance base URL, without trailing slash
    host: String,

    /// Basic-auth credentials
    credentials: Credentials,
}

impl JiraClient {
    /// Create a client for `host`.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let client = ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Instance base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/3/{}", self.host, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let response = self.authed(self.client.get(self.url(path))).send().await?;
        decode(check(response).await?).await
    }
}

/// Turn a non-success response into [`TrackerError::Status`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl Tracker for JiraClient {
    async fn get_project(&self, key: &str) -> Result<Project> {
        let wire: WireProject = self.get_json(&format!("project/{}", key)).await?;
        Ok(wire.into_project(key))
    }

    async fn get_project_versions(&self, project: &ProjectId) -> Result<Vec<Version>> {
        let wire: Vec<WireVersion> = self
            .get_json(&format!("project/{}/versions", project))
            .await?;
        Ok(wire.into_iter().map(WireVersion::into_version).collect())
    }

    async fn create_version(&self, fields: &NewVersion) -> Result<Version> {
        debug!("POST version {}", fields.name);
        let response = self
            .authed(self.client.post(self.url("version")))
            .json(&create_version_body(fields))
            .send()
            .await?;
        let wire: WireVersion = decode(check(response).await?).await?;
        Ok(wire.into_version())
    }

    async fn get_issue(&self, key: &TicketKey) -> Result<IssueFields> {
        let wire: WireIssue = self
            .get_json(&format!(
                "issue/{}?fields=summary,assignee,description,issuetype",
                key
            ))
            .await?;
        Ok(wire.into_fields())
    }

    async fn edit_issue(&self, key: &TicketKey, patch: &IssuePatch) -> Result<()> {
        debug!("PUT issue {}", key);
        let response = self
            .authed(self.client.put(self.url(&format!("issue/{}", key))))
            .json(&patch.to_body())
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn get_current_user(&self) -> Result<CurrentUser> {
        let wire: WireUser = self.get_json("myself").await?;
        Ok(wire.into_user())
    }
}

/// Body of `POST /version`; Jira wants a numeric project id.
fn create_version_body(fields: &NewVersion) -> Value {
    let project_id = match fields.project_id.as_str().parse::<i64>() {
        Ok(n) => json!(n),
        Err(_) => json!(fields.project_id.as_str()),
    };
    let mut body = json!({
        "name": fields.name,
        "description": fields.description,
        "projectId": project_id,
        "released": fields.released,
        "releaseDate": fields.release_date.to_string(),
        "archived": fields.archived,
    });
    if let Some(driver) = &fields.driver {
        body["driver"] = json!(driver);
    }
    body
}

#[derive(Debug, Deserialize)]
struct WireProject {
    id: Option<String>,
    key: Option<String>,
    #[serde(default)]
    name: String,
}

impl WireProject {
    fn into_project(self, requested_key: &str) -> Project {
        Project {
            id: self.id.filter(|id| !id.is_empty()).map(ProjectId::new),
            key: self.key.unwrap_or_else(|| requested_key.to_string()),
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVersion {
    id: String,
    name: String,
    description: Option<String>,
    #[serde(default)]
    released: bool,
    release_date: Option<NaiveDate>,
    #[serde(default)]
    archived: bool,
}

impl WireVersion {
    fn into_version(self) -> Version {
        Version {
            id: VersionId::new(self.id),
            name: self.name,
            description: self.description,
            released: self.released,
            release_date: self.release_date,
            archived: self.archived,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    account_id: String,
    #[serde(default)]
    display_name: String,
    email_address: Option<String>,
}

impl WireUser {
    fn into_user(self) -> CurrentUser {
        CurrentUser {
            account_id: self.account_id,
            name: self.display_name,
            email: self.email_address,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    key: String,
    fields: WireIssueFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIssueFields {
    #[serde(default)]
    summary: String,
    assignee: Option<WireUserRef>,
    issuetype: Option<WireIssueType>,
    description: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUserRef {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireIssueType {
    name: Option<String>,
}

impl WireIssue {
    fn into_fields(self) -> IssueFields {
        IssueFields {
            key: self.key,
            summary: self.fields.summary,
            assignee: self.fields.assignee.and_then(|a| a.display_name),
            issue_type: self.fields.issuetype.and_then(|t| t.name),
            description: self.fields.description.as_ref().and_then(first_text),
        }
    }
}

/// First text node of an Atlassian document, or a plain string description.
fn first_text(doc: &Value) -> Option<String> {
    match doc {
        Value::String(s) => Some(s.clone()),
        _ => doc
            .pointer("/content/0/content/0/text")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
