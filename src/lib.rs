//! tfprune - interactive removal of resources from Terraform state
//!
//! Lists the addresses tracked in the state, correlates them with the
//! resource blocks declared in the working directory, and lets the operator
//! pick entries to drop with `terraform state rm` (the infrastructure
//! itself is untouched).

pub mod cli;
pub mod error;
pub mod picker;
pub mod removal;
pub mod resource;
pub mod terraform;

pub use error::TfpruneError;
pub use resource::Resource;
pub use terraform::{DeclaredResource, TerraformCli};
