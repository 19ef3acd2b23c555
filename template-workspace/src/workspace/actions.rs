use serde::{Deserialize, Serialize};

use super::state::Draft;

#[derive(Debug, Clone)]
pub enum WorkspaceAction {
    // Session
    Login { username: String, password: String },

    // Collection
    Load,
    Select { id: String },
    New,
    // `revision` is the store revision the edit was based on
    EditDraft { draft: Draft, revision: u64 },
    Save,
    Delete,

    // Confirmation answers
    Confirm,
    Cancel,

    // Generation
    Generate { input_text: String },
    CopyResult,
    DownloadResult,
}

/// Destructive action parked behind a confirmation. Kept as plain data so the
/// pending state can be inspected and serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PendingAction {
    DeleteTemplate { id: String },
}

impl WorkspaceAction {
    pub fn description(&self) -> &'static str {
        match self {
            WorkspaceAction::Login { .. } => "Signing in",
            WorkspaceAction::Load => "Loading templates",
            WorkspaceAction::Select { .. } => "Selecting template",
            WorkspaceAction::New => "Starting new template",
            WorkspaceAction::EditDraft { .. } => "Editing draft",
            WorkspaceAction::Save => "Saving template",
            WorkspaceAction::Delete => "Requesting delete confirmation",
            WorkspaceAction::Confirm => "Confirming pending action",
            WorkspaceAction::Cancel => "Cancelling pending action",
            WorkspaceAction::Generate { .. } => "Generating document",
            WorkspaceAction::CopyResult => "Copying generated HTML",
            WorkspaceAction::DownloadResult => "Downloading generated HTML",
        }
    }

    pub fn requires_network(&self) -> bool {
        match self {
            WorkspaceAction::Login { .. }
            | WorkspaceAction::Load
            | WorkspaceAction::Save
            | WorkspaceAction::Confirm
            | WorkspaceAction::Generate { .. } => true,

            WorkspaceAction::Select { .. }
            | WorkspaceAction::New
            | WorkspaceAction::EditDraft { .. }
            | WorkspaceAction::Delete
            | WorkspaceAction::Cancel
            | WorkspaceAction::CopyResult
            | WorkspaceAction::DownloadResult => false,
        }
    }
}
