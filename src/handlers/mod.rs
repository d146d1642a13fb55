mod profile_handler;
mod resolve_handler;

pub use profile_handler::{aggregate_profile, enrich_project, resolve_and_aggregate};
pub use resolve_handler::resolve_username;
