use crate::api::ScratchApi;
use crate::error::Result;
use crate::parsing::{self, IdentifierMatch};
use tracing::{debug, info};

/// Turn free-form input into a canonical username.
///
/// `Ok(None)` means the input is unresolvable: no rule matched, or it named a
/// project whose author could not be looked up.
pub async fn resolve_username(api: &ScratchApi, raw: &str) -> Result<Option<String>> {
    let normalized = parsing::normalize_identifier(raw.trim());

    match parsing::classify_identifier(&normalized) {
        IdentifierMatch::Username(username) => {
            debug!(%username, "Resolved username directly");
            Ok(Some(username))
        }
        IdentifierMatch::ProjectId(project_id) => {
            let author = api.fetch_project_author(&project_id).await?;
            match &author {
                Some(username) => info!(%project_id, %username, "Resolved project author"),
                None => info!(%project_id, "Project author lookup yielded nothing"),
            }
            Ok(author)
        }
        IdentifierMatch::NoMatch => {
            debug!(input = %normalized, "No identifier rule matched");
            Ok(None)
        }
    }
}
