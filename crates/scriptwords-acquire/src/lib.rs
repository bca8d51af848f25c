pub mod error;
pub mod extract;
pub mod imsdb;

pub use error::AcquireError;
pub use extract::{extract_blocks, Whitespace};
pub use imsdb::{build_client, fetch_page, search_script, search_script_at, BASE_URL};
