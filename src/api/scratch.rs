use crate::error::Result;
use crate::models::{ProjectDetail, ProjectRecord};
use anyhow::{anyhow, Context};
use reqwest::{Response, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.scratch.mit.edu";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the public Scratch API.
///
/// Each fetch returns `Ok(None)` when the upstream answers with a
/// non-success status, leaving the hard/soft decision to the caller.
/// Transport failures and undecodable bodies surface as errors.
#[derive(Clone)]
pub struct ScratchApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ScratchApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Scratch API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Scratch API base URL cannot be a base: {base_url}"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn new_with_base_url(base_url: impl AsRef<str>) -> anyhow::Result<Self> {
        Self::new(base_url.as_ref(), DEFAULT_TIMEOUT)
    }

    /// `GET /users/{username}`
    pub async fn fetch_user(&self, username: &str) -> Result<Option<Value>> {
        let url = self.endpoint(&["users", username]);
        let Some(resp) = self.get(url).await? else {
            return Ok(None);
        };
        Ok(Some(resp.json().await?))
    }

    /// `GET /users/{username}/projects`
    pub async fn fetch_user_projects(&self, username: &str) -> Result<Option<Vec<ProjectRecord>>> {
        let url = self.endpoint(&["users", username, "projects"]);
        let Some(resp) = self.get(url).await? else {
            return Ok(None);
        };
        Ok(Some(resp.json().await?))
    }

    /// `GET /projects/{id}`, reduced to the owning account's handle.
    pub async fn fetch_project_author(&self, project_id: &str) -> Result<Option<String>> {
        let url = self.endpoint(&["projects", project_id]);
        let Some(resp) = self.get(url).await? else {
            return Ok(None);
        };
        let detail: ProjectDetail = resp.json().await?;
        let author = detail.author_username();
        if author.is_none() {
            warn!(project_id, "Project payload has no author username");
        }
        Ok(author)
    }

    async fn get(&self, url: Url) -> Result<Option<Response>> {
        debug!(%url, "Scratch API request");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "Scratch API non-success status");
            return Ok(None);
        }
        Ok(Some(resp))
    }

    /// Appends each segment percent-encoded, so a handle can never escape
    /// its path position.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
