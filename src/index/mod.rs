//! @acp:module "Index"
//! @acp:summary "Repository discovery"
//! @acp:domain cli
//! @acp:layer service

pub mod indexer;

pub use indexer::{Repo, RepoIndex};
