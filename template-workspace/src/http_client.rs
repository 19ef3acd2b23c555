//! HTTP client for the remote template store.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::WorkspaceConfig;
use crate::error::{Result, WorkspaceError};
use crate::session::{attach_credential, is_rejected, Credential};
use crate::workspace::{
    GenerateRequest, GenerationResult, Template, TemplateApi, TemplatePayload, TokenResponse,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&WorkspaceConfig {
            api_base_url: base_url.to_string(),
            ..WorkspaceConfig::default()
        })
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments. Each segment is
    /// percent-encoded, so opaque ids cannot change the route.
    fn endpoint(&self, action: &'static str, segments: &[&str]) -> Result<Url> {
        let invalid = |message: String| WorkspaceError::TransportFailure { action, message };

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("invalid base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("base url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, credential: &Credential) -> RequestBuilder {
        log::debug!("[HTTP] {} {}", method, url);
        attach_credential(self.client.request(method, url), credential)
    }

    /// Sends the request and applies the response checks in order: a
    /// rejected credential first, then any other non-success status.
    async fn send(&self, action: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            log::warn!("[HTTP] {} failed before a response: {}", action, e);
            WorkspaceError::TransportFailure {
                action,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        log::debug!("[HTTP] {} -> {}", action, status);

        if is_rejected(status) {
            return Err(WorkspaceError::AuthRejected);
        }
        if !status.is_success() {
            return Err(WorkspaceError::RemoteFailure {
                action,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<R: DeserializeOwned>(action: &'static str, response: Response) -> Result<R> {
        response
            .json::<R>()
            .await
            .map_err(|e| WorkspaceError::TransportFailure {
                action,
                message: format!("invalid response body: {}", e),
            })
    }

    async fn call<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        action: &'static str,
        method: Method,
        segments: &[&str],
        credential: &Credential,
        body: Option<&T>,
    ) -> Result<R> {
        let url = self.endpoint(action, segments)?;
        let mut request = self.request(method, url, credential);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.send(action, request).await?;
        Self::decode(action, response).await
    }
}

#[async_trait]
impl TemplateApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<Credential> {
        let action = "sign in";
        let url = self.endpoint(action, &["api", "token"])?;
        log::debug!("[HTTP] POST {}", url);

        let response = self
            .client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| WorkspaceError::TransportFailure {
                action,
                message: e.to_string(),
            })?;

        let status = response.status();
        log::debug!("[HTTP] {} -> {}", action, status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(WorkspaceError::validation("Incorrect username or password"));
        }
        if !status.is_success() {
            return Err(WorkspaceError::RemoteFailure {
                action,
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = Self::decode(action, response).await?;
        Ok(Credential::new(token.access_token))
    }

    async fn list_templates(&self, credential: &Credential) -> Result<Vec<Template>> {
        self.call::<(), _>(
            "load templates",
            Method::GET,
            &["api", "templates"],
            credential,
            None,
        )
        .await
    }

    async fn create_template(
        &self,
        credential: &Credential,
        payload: &TemplatePayload,
    ) -> Result<Template> {
        self.call(
            "create template",
            Method::POST,
            &["api", "templates"],
            credential,
            Some(payload),
        )
        .await
    }

    async fn update_template(
        &self,
        credential: &Credential,
        id: &str,
        payload: &TemplatePayload,
    ) -> Result<Template> {
        self.call(
            "update template",
            Method::PUT,
            &["api", "templates", id],
            credential,
            Some(payload),
        )
        .await
    }

    async fn delete_template(&self, credential: &Credential, id: &str) -> Result<()> {
        let action = "delete template";
        let url = self.endpoint(action, &["api", "templates", id])?;
        // Body is ignored on success.
        self.send(action, self.request(Method::DELETE, url, credential))
            .await?;
        Ok(())
    }

    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerateRequest,
    ) -> Result<GenerationResult> {
        self.call(
            "generate document",
            Method::POST,
            &["api", "generate"],
            credential,
            Some(request),
        )
        .await
    }
}
