pub mod config;
pub mod state;

pub use config::{DeclaredResource, ScanError};
pub use state::{StateError, TerraformCli};
