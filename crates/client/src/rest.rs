//! HTTP implementation of [`TaskApi`].
//!
//! This module provides the [`RestTaskClient`] struct, which talks to the
//! task REST API over `reqwest`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use tasknest_protocol::{NewTask, Task, TaskId, TaskPatch};
use tracing::{debug, instrument, warn};

use crate::api::{TaskApi, UserRecord};
use crate::error::{Error, Result};

/// Task API client with optional bearer authentication.
///
/// Endpoints are resolved relative to the base URL, so a base of
/// `https://example.com/api` serves tasks from `https://example.com/api/tasks`.
///
/// # Security
///
/// The token is stored as a [`SecretString`] and only exposed when a request
/// header is built. Without a token, requests go out unauthenticated.
///
/// # Examples
///
/// ```
/// use tasknest_client::RestTaskClient;
///
/// let client = RestTaskClient::new("http://localhost:5000", None).unwrap();
/// assert!(!client.is_authenticated());
/// assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
/// ```
#[derive(Debug)]
pub struct RestTaskClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl RestTaskClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` is not an absolute
    /// `http` or `https` URL, or [`Error::Http`] if the HTTP client cannot be
    /// initialized.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub fn new(base_url: &str, token: Option<SecretString>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| Error::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("tasknest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %parsed, "created task API client");
        Ok(Self {
            http,
            base_url: parsed,
            token,
        })
    }

    /// Returns the base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns whether requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builds the URL for a path below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an identifier can never
    /// escape its position in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot have a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Sends a request and turns any non-success status into an error.
    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "task API returned an error status");
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TaskApi for RestTaskClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.endpoint(&["tasks"])?;
        let response = Self::send(self.request(Method::GET, url)).await?;
        let tasks: Vec<Task> = response.json().await?;
        debug!(count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(title = %task.title, category = %task.category))]
    async fn create_task(&self, task: &NewTask) -> Result<()> {
        let url = self.endpoint(&["tasks"])?;
        Self::send(self.request(Method::POST, url).json(task)).await?;
        debug!("task created");
        Ok(())
    }

    #[instrument(skip(self, patch), fields(%id))]
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        let url = self.endpoint(&["tasks", id.as_str()])?;
        Self::send(self.request(Method::PUT, url).json(patch)).await?;
        debug!("task updated");
        Ok(())
    }

    #[instrument(skip(self), fields(%id))]
    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let url = self.endpoint(&["tasks", id.as_str()])?;
        Self::send(self.request(Method::DELETE, url)).await?;
        debug!("task deleted");
        Ok(())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn register_user(&self, user: &UserRecord) -> Result<()> {
        let url = self.endpoint(&["users"])?;
        Self::send(self.request(Method::POST, url).json(user)).await?;
        debug!("user recorded");
        Ok(())
    }
}
