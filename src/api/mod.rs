mod scratch;

pub use scratch::{ScratchApi, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
