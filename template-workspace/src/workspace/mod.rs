pub mod actions;
pub mod client;
pub mod effects;
pub mod manager;
pub mod state;


pub use actions::{PendingAction, WorkspaceAction};
pub use client::{GenerateRequest, TemplateApi, TemplatePayload, TokenResponse};
pub use effects::{download_file_name, UiEffects};
pub use manager::{WorkspaceController, DELETE_CONFIRMATION_MESSAGE};
pub use state::{AppState, Draft, GenerationResult, Template, TemplateStore};
