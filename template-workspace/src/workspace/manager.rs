use std::collections::VecDeque;

use crate::error::{Result, WorkspaceError};
use crate::notifications::Severity;
use crate::session::{Credential, SessionGuard};

use super::actions::{PendingAction, WorkspaceAction};
use super::client::{GenerateRequest, TemplateApi, TemplatePayload};
use super::effects::{download_file_name, UiEffects};
use super::state::{AppState, Draft};

pub const DELETE_CONFIRMATION_MESSAGE: &str =
    "Are you sure you want to delete this template? This action cannot be undone.";

pub struct WorkspaceController<A, U> {
    // Current state - single source of truth
    state: AppState,

    api: A,
    effects: U,

    // Actions are applied strictly in the order they were dispatched
    pending_actions: VecDeque<WorkspaceAction>,

    is_processing: bool,
}

impl<A: TemplateApi, U: UiEffects> WorkspaceController<A, U> {
    pub fn new(api: A, effects: U, session: SessionGuard) -> Self {
        Self {
            state: AppState::new(session),
            api,
            effects,
            pending_actions: VecDeque::new(),
            is_processing: false,
        }
    }

    /// Startup: without a credential nothing else initializes and the user is
    /// sent to the login view; otherwise the collection is loaded.
    pub async fn start(&mut self) {
        if !self.state.session.is_authenticated() {
            log::info!("No session credential, redirecting to login");
            self.effects.redirect_to_login();
            return;
        }

        self.dispatch(WorkspaceAction::Load);
        self.run_pending().await;
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: WorkspaceAction) {
        log::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Processes one queued action. Returns false when the queue was empty.
    pub async fn update(&mut self) -> bool {
        if self.is_processing {
            return false;
        }

        let Some(action) = self.pending_actions.pop_front() else {
            return false;
        };

        self.is_processing = true;
        log::debug!("Processing action: {}", action.description());
        self.handle_action(action).await;
        self.is_processing = false;
        true
    }

    /// Drains the queue, including anything queued while draining.
    pub async fn run_pending(&mut self) {
        while self.update().await {}
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn effects(&self) -> &U {
        &self.effects
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.is_processing
    }

    async fn handle_action(&mut self, action: WorkspaceAction) {
        let outcome = match action {
            WorkspaceAction::Login { username, password } => {
                self.login(&username, &password).await
            }
            WorkspaceAction::Load => self.load().await,
            WorkspaceAction::Select { id } => {
                self.select(&id);
                Ok(())
            }
            WorkspaceAction::New => {
                self.new_template();
                Ok(())
            }
            WorkspaceAction::EditDraft { draft, revision } => {
                self.edit_draft(draft, revision);
                Ok(())
            }
            WorkspaceAction::Save => self.save().await,
            WorkspaceAction::Delete => {
                self.request_delete();
                Ok(())
            }
            WorkspaceAction::Confirm => self.confirm().await,
            WorkspaceAction::Cancel => {
                self.cancel();
                Ok(())
            }
            WorkspaceAction::Generate { input_text } => self.generate(&input_text).await,
            WorkspaceAction::CopyResult => self.copy_result(),
            WorkspaceAction::DownloadResult => self.download_result(),
        };

        if let Err(error) = outcome {
            self.report(error);
        }
    }

    /// Routes a failed flow. A rejected credential tears the session down
    /// and is never shown as a toast; everything else is.
    fn report(&mut self, error: WorkspaceError) {
        match error {
            WorkspaceError::AuthRejected => {
                self.end_session();
                self.effects.redirect_to_login();
            }
            other => {
                log::error!("{}", other);
                self.effects.notify(&other.to_string(), Severity::Error);
            }
        }
    }

    /// Tears down everything tied to the rejected credential. Nothing queued
    /// or parked under it may run in a later session.
    fn end_session(&mut self) {
        self.state.session.reject();
        self.pending_actions.clear();
        self.state.confirmation.cancel();
        self.state.result = None;
    }

    fn credential(&self) -> Result<Credential> {
        self.state
            .session
            .credential()
            .cloned()
            .ok_or(WorkspaceError::AuthRejected)
    }
}

// Flow implementations
impl<A: TemplateApi, U: UiEffects> WorkspaceController<A, U> {
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(WorkspaceError::validation(
                "Username and password are required",
            ));
        }

        let credential = self.api.login(username.trim(), password).await?;
        self.state
            .session
            .establish(credential)
            .map_err(|e| WorkspaceError::SessionPersistence(e.to_string()))?;
        self.state.confirmation.cancel();
        self.state.result = None;

        log::info!("Signed in as {}", username.trim());
        self.load().await
    }

    /// Replaces the collection with the store's current list. On failure the
    /// previous collection stays as it was.
    pub async fn load(&mut self) -> Result<()> {
        let credential = self.credential()?;
        let templates = self.api.list_templates(&credential).await?;

        log::info!("Loaded {} templates", templates.len());
        self.state.store.replace_all(templates);
        Ok(())
    }

    pub fn select(&mut self, id: &str) {
        self.state.store.select(id);
    }

    pub fn new_template(&mut self) {
        self.state.store.clear();
    }

    /// Applies editor input unless the store replaced the draft after the
    /// edit was made, in which case the edit is stale and dropped.
    pub fn edit_draft(&mut self, draft: Draft, revision: u64) {
        let current = self.state.store.draft_revision();
        if revision != current {
            log::debug!(
                "Dropping draft edit based on revision {} (now {})",
                revision,
                current
            );
            return;
        }
        self.state.store.set_draft(draft);
    }

    /// Creates or updates the draft, then reloads and re-selects the saved
    /// template from the fresh collection. The success toast is only shown
    /// once the reload has landed.
    pub async fn save(&mut self) -> Result<()> {
        let draft = self.state.store.draft().clone();
        if draft.name.trim().is_empty() {
            return Err(WorkspaceError::validation("Template name is required"));
        }

        let credential = self.credential()?;
        let payload = TemplatePayload {
            name: draft.name,
            content: draft.content,
        };

        let saved_id = match self.state.store.selection().map(str::to_string) {
            None => {
                let created = self.api.create_template(&credential, &payload).await?;
                log::info!("Created template {}", created.id);
                self.state.store.adopt_selection(created.id.clone());
                created.id
            }
            Some(id) => {
                self.api.update_template(&credential, &id, &payload).await?;
                log::info!("Updated template {}", id);
                id
            }
        };

        self.load().await?;
        self.state.store.select(&saved_id);
        self.effects
            .notify("Template saved successfully", Severity::Success);
        Ok(())
    }

    /// Parks a delete of the selected template behind a confirmation.
    pub fn request_delete(&mut self) {
        let Some(id) = self.state.store.selection().map(str::to_string) else {
            log::debug!("Delete requested with nothing selected");
            return;
        };

        self.state.confirmation.request(
            DELETE_CONFIRMATION_MESSAGE,
            PendingAction::DeleteTemplate { id },
        );
    }

    /// Affirmative answer: runs the pending action, if any.
    pub async fn confirm(&mut self) -> Result<()> {
        match self.state.confirmation.confirm() {
            Some(PendingAction::DeleteTemplate { id }) => self.delete_template(&id).await,
            None => Ok(()),
        }
    }

    pub fn cancel(&mut self) {
        self.state.confirmation.cancel();
    }

    async fn delete_template(&mut self, id: &str) -> Result<()> {
        let credential = self.credential()?;
        self.api.delete_template(&credential, id).await?;
        log::info!("Deleted template {}", id);

        self.state.store.clear();
        self.load().await?;
        self.effects
            .notify("Template deleted successfully", Severity::Success);
        Ok(())
    }

    pub async fn generate(&mut self, input_text: &str) -> Result<()> {
        let template_content = self.state.store.draft().content.clone();
        if template_content.trim().is_empty() || input_text.trim().is_empty() {
            return Err(WorkspaceError::validation(
                "Please provide both a template and input text",
            ));
        }

        let credential = self.credential()?;
        let request = GenerateRequest {
            template_content,
            input_text: input_text.to_string(),
        };
        let result = self.api.generate(&credential, &request).await?;

        log::info!("Generated document: {}", result.summary());
        self.effects.present_result(&result);
        self.state.result = Some(result);
        self.effects
            .notify("Document generated successfully", Severity::Success);
        Ok(())
    }

    pub fn copy_result(&mut self) -> Result<()> {
        let Some(result) = &self.state.result else {
            return Err(WorkspaceError::validation("Nothing to copy yet"));
        };

        match self.effects.copy_to_clipboard(&result.generated_html) {
            Ok(()) => {
                self.effects.notify("Copied to clipboard", Severity::Success);
            }
            Err(e) => {
                log::error!("Clipboard copy failed: {}", e);
                self.effects
                    .notify(&format!("Failed to copy: {}", e), Severity::Error);
            }
        }
        Ok(())
    }

    pub fn download_result(&mut self) -> Result<()> {
        let Some(result) = &self.state.result else {
            return Err(WorkspaceError::validation("Nothing to download yet"));
        };

        let file_name = download_file_name(&self.state.store.draft().name);
        match self.effects.trigger_download(&file_name, &result.generated_html) {
            Ok(()) => {
                log::info!("Downloaded {}", file_name);
                self.effects
                    .notify(&format!("Downloaded {}", file_name), Severity::Success);
            }
            Err(e) => {
                log::error!("Download of {} failed: {}", file_name, e);
                self.effects
                    .notify(&format!("Failed to download: {}", e), Severity::Error);
            }
        }
        Ok(())
    }
}
