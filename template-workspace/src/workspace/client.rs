use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Credential;

use super::state::{GenerationResult, Template};

/// The remote template store as the controller sees it. Every workspace call
/// takes the session credential; implementations must report an
/// unauthorized response as `WorkspaceError::AuthRejected` before looking at
/// anything else in it.
#[async_trait]
pub trait TemplateApi: Send + Sync {
    /// Exchanges user credentials for a bearer token. A wrong password is a
    /// validation failure, not a session rejection.
    async fn login(&self, username: &str, password: &str) -> Result<Credential>;

    async fn list_templates(&self, credential: &Credential) -> Result<Vec<Template>>;

    async fn create_template(
        &self,
        credential: &Credential,
        payload: &TemplatePayload,
    ) -> Result<Template>;

    async fn update_template(
        &self,
        credential: &Credential,
        id: &str,
        payload: &TemplatePayload,
    ) -> Result<Template>;

    async fn delete_template(&self, credential: &Credential, id: &str) -> Result<()>;

    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerateRequest,
    ) -> Result<GenerationResult>;
}

// Request/Response types for the template API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplatePayload {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub template_content: String,
    pub input_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
