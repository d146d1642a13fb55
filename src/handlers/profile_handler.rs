use super::resolve_username;
use crate::api::ScratchApi;
use crate::error::{LookupError, Result};
use crate::models::{EnrichedProject, ProjectRecord, UserProfile};
use crate::utils::format_datetime;
use serde_json::Value;
use tracing::{info, warn};

/// Full pipeline: resolve `raw` to a username, then aggregate its profile.
pub async fn resolve_and_aggregate(api: &ScratchApi, raw: &str) -> Result<UserProfile> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LookupError::UsernameRequired);
    }

    let username = resolve_username(api, raw)
        .await?
        .ok_or(LookupError::UsernameRequired)?;

    aggregate_profile(api, &username).await
}

/// Fetch the account and its projects. `username` must already be resolved.
pub async fn aggregate_profile(api: &ScratchApi, username: &str) -> Result<UserProfile> {
    let account_profile = require_account(api, username).await?;
    let projects = projects_or_empty(api, username)
        .await?
        .into_iter()
        .map(enrich_project)
        .collect::<Vec<_>>();

    info!(
        %username,
        project_count = projects.len(),
        "Aggregated user profile"
    );

    Ok(UserProfile {
        account_profile,
        projects,
        resolved_username: username.to_string(),
    })
}

/// The account fetch is the only fatal upstream call.
async fn require_account(api: &ScratchApi, username: &str) -> Result<Value> {
    match api.fetch_user(username).await? {
        Some(profile) => Ok(profile),
        None => {
            info!(%username, "Account not found upstream");
            Err(LookupError::UserNotFound)
        }
    }
}

/// A failed project-list fetch degrades to an empty list.
async fn projects_or_empty(api: &ScratchApi, username: &str) -> Result<Vec<ProjectRecord>> {
    match api.fetch_user_projects(username).await? {
        Some(projects) => Ok(projects),
        None => {
            warn!(%username, "Project list unavailable, returning none");
            Ok(Vec::new())
        }
    }
}

pub fn enrich_project(project: ProjectRecord) -> EnrichedProject {
    let history = project.get("history");
    let published_date = format_datetime(history.and_then(|h| h.get("shared")));
    let modified_date = format_datetime(history.and_then(|h| h.get("modified")));

    EnrichedProject {
        project,
        published_date,
        modified_date,
    }
}
