//! Template workspace: client-side controller for a remote store of HTML
//! templates and the document generation workflow built on it.

pub mod config;
pub mod error;
pub mod http_client;
pub mod notifications;
pub mod runtime;
pub mod session;
pub mod workspace;

pub use config::WorkspaceConfig;
pub use error::{Result, WorkspaceError};
