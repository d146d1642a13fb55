pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod parsing;
pub mod server;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub scratch: api::ScratchApi,
}
