//! Project management — Configuration, path resolution and the workspace index.

mod config;
mod error;
mod path_resolver;
mod tracker;
mod workspace;
pub mod workspace_loader;

pub use config::{FeatureToggles, ProjectConfig};
pub use error::ProjectError;
pub use path_resolver::PathResolver;
pub use tracker::{DocumentTracker, ParseTicket};
pub use workspace::{
    BootstrapState, DocumentOrigin, ParseJob, SharedWorkspace, WorkspaceEvent, WorkspaceIndex,
};
pub use workspace_loader::WorkspaceLoader;
