//! Identity provider contract and implementations.
//!
//! The board never authenticates anyone itself. It asks an
//! [`IdentityProvider`] to sign a user in or up, and keeps the returned
//! [`User`] for as long as the session lasts.
//!
//! Two implementations are provided:
//!
//! - [`IdentityToolkitClient`] speaks the email/password REST endpoints of an
//!   Identity-Toolkit-compatible service.
//! - [`InMemoryIdentity`] keeps accounts in memory, for offline mode and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{AuthError, AuthResult};

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned account identifier.
    pub uid: String,
    /// Account email, if the provider knows one.
    pub email: Option<String>,
    /// Display name set at registration.
    pub display_name: Option<String>,
    /// Profile photo URL set at registration.
    pub photo_url: Option<String>,
}

impl User {
    /// Returns the best label for this user: display name, then email, then uid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_client::User;
    ///
    /// let user = User {
    ///     uid: "u1".into(),
    ///     email: Some("ada@example.com".into()),
    ///     display_name: None,
    ///     photo_url: None,
    /// };
    /// assert_eq!(user.label(), "ada@example.com");
    /// ```
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Email and password submitted to sign in or sign up.
#[derive(Debug)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: SecretString,
}

impl Credentials {
    /// Creates credentials from plain strings.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Profile fields that can be changed after sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// New display name.
    pub display_name: Option<String>,
    /// New photo URL.
    pub photo_url: Option<String>,
}

/// The external authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Returns the user of the session the provider already holds, if any.
    async fn current_user(&self) -> AuthResult<Option<User>>;

    /// Signs in with email and password.
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<User>;

    /// Creates an account and signs it in.
    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<User>;

    /// Updates the signed-in user's profile.
    async fn update_profile(&self, profile: &Profile) -> AuthResult<User>;

    /// Ends the current session.
    async fn sign_out(&self) -> AuthResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// --- Identity Toolkit REST ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, alias = "profilePicture")]
    photo_url: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl AccountResponse {
    fn user(&self) -> User {
        User {
            uid: self.local_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps a provider error code such as `EMAIL_EXISTS` to an [`AuthError`].
fn map_provider_error(message: &str) -> AuthError {
    let code = message.split([' ', ':']).next().unwrap_or(message);
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
        | "INVALID_EMAIL" => AuthError::InvalidCredentials,
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "WEAK_PASSWORD" => AuthError::WeakPassword(
            message
                .split_once(':')
                .map_or(message, |(_, detail)| detail)
                .trim()
                .to_string(),
        ),
        _ => AuthError::Provider(message.to_string()),
    }
}

#[derive(Debug, Default)]
struct Session {
    user: Option<User>,
    id_token: Option<SecretString>,
}

/// Client for the email/password endpoints of an Identity Toolkit service.
///
/// The ID token returned at sign-in is kept in memory only, for the profile
/// update that follows registration. Nothing is persisted, so every launch
/// starts signed out.
///
/// # Examples
///
/// ```
/// use secrecy::SecretString;
/// use tasknest_client::IdentityToolkitClient;
///
/// let key = SecretString::from("api-key".to_string());
/// let client = IdentityToolkitClient::new("http://localhost:9099/v1", key).unwrap();
/// ```
#[derive(Debug)]
pub struct IdentityToolkitClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: SecretString,
    session: Mutex<Session>,
}

impl IdentityToolkitClient {
    /// Creates a client for the service at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Provider`] if the endpoint is not a valid URL,
    /// or [`AuthError::Http`] if the HTTP client cannot be initialized.
    pub fn new(endpoint: &str, api_key: SecretString) -> AuthResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AuthError::Provider(format!("invalid identity endpoint: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("tasknest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
            session: Mutex::new(Session::default()),
        })
    }

    fn method_url(&self, method: &str) -> AuthResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| AuthError::Provider("identity endpoint cannot have a path".to_string()))?
            .pop_if_empty()
            .push(method);
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());
        Ok(url)
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> AuthResult<AccountResponse> {
        let url = self.method_url(method)?;
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("status {}", status.as_u16()));
        warn!(status = status.as_u16(), %message, "identity provider rejected request");
        Err(map_provider_error(&message))
    }

    fn remember(&self, account: &AccountResponse) -> User {
        let user = account.user();
        let mut session = lock(&self.session);
        session.user = Some(user.clone());
        if let Some(token) = &account.id_token {
            session.id_token = Some(SecretString::from(token.clone()));
        }
        user
    }

    async fn password_call(&self, method: &str, credentials: &Credentials) -> AuthResult<User> {
        let request = PasswordRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
            return_secure_token: true,
        };
        let account = self.call(method, &request).await?;
        Ok(self.remember(&account))
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn current_user(&self) -> AuthResult<Option<User>> {
        Ok(lock(&self.session).user.clone())
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<User> {
        let user = self
            .password_call("accounts:signInWithPassword", credentials)
            .await?;
        debug!(uid = %user.uid, "signed in");
        Ok(user)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<User> {
        let user = self.password_call("accounts:signUp", credentials).await?;
        debug!(uid = %user.uid, "account created");
        Ok(user)
    }

    #[instrument(skip(self, profile))]
    async fn update_profile(&self, profile: &Profile) -> AuthResult<User> {
        let token = lock(&self.session)
            .id_token
            .as_ref()
            .map(|token| token.expose_secret().to_string())
            .ok_or(AuthError::NotSignedIn)?;
        let request = UpdateRequest {
            id_token: &token,
            display_name: profile.display_name.as_deref(),
            photo_url: profile.photo_url.as_deref(),
            return_secure_token: true,
        };
        let account = self.call("accounts:update", &request).await?;
        Ok(self.remember(&account))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        *lock(&self.session) = Session::default();
        debug!("signed out");
        Ok(())
    }
}

// --- In-memory ---

#[derive(Debug)]
struct Account {
    password: SecretString,
    user: User,
}

#[derive(Debug, Default)]
struct Directory {
    accounts: HashMap<String, Account>,
    current: Option<String>,
    next_uid: u64,
}

/// An [`IdentityProvider`] that keeps accounts in memory.
///
/// # Examples
///
/// ```
/// use tasknest_client::{Credentials, IdentityProvider, InMemoryIdentity};
///
/// # async fn example() -> tasknest_client::AuthResult<()> {
/// let identity = InMemoryIdentity::new().with_account("ada@example.com", "Secret1", "Ada");
/// let user = identity.sign_in(&Credentials::new("ada@example.com", "Secret1")).await?;
/// assert_eq!(user.label(), "Ada");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentity {
    directory: Arc<Mutex<Directory>>,
}

impl InMemoryIdentity {
    /// Creates a provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account with a display name.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str, name: &str) -> Self {
        {
            let mut directory = lock(&self.directory);
            let user = Self::new_user(&mut directory, email);
            directory.accounts.insert(
                email.to_string(),
                Account {
                    password: SecretString::from(password.to_string()),
                    user: User {
                        display_name: Some(name.to_string()),
                        ..user
                    },
                },
            );
        }
        self
    }

    fn new_user(directory: &mut Directory, email: &str) -> User {
        directory.next_uid += 1;
        User {
            uid: format!("local-{}", directory.next_uid),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    async fn current_user(&self) -> AuthResult<Option<User>> {
        let directory = lock(&self.directory);
        Ok(directory
            .current
            .as_ref()
            .and_then(|email| directory.accounts.get(email))
            .map(|account| account.user.clone()))
    }

    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<User> {
        let mut directory = lock(&self.directory);
        let user = match directory.accounts.get(&credentials.email) {
            Some(account)
                if account.password.expose_secret() == credentials.password.expose_secret() =>
            {
                account.user.clone()
            }
            _ => return Err(AuthError::InvalidCredentials),
        };
        directory.current = Some(credentials.email.clone());
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<User> {
        let mut directory = lock(&self.directory);
        if directory.accounts.contains_key(&credentials.email) {
            return Err(AuthError::EmailExists);
        }
        let user = Self::new_user(&mut directory, &credentials.email);
        directory.accounts.insert(
            credentials.email.clone(),
            Account {
                password: SecretString::from(credentials.password.expose_secret().to_string()),
                user: user.clone(),
            },
        );
        directory.current = Some(credentials.email.clone());
        Ok(user)
    }

    async fn update_profile(&self, profile: &Profile) -> AuthResult<User> {
        let mut directory = lock(&self.directory);
        let email = directory.current.clone().ok_or(AuthError::NotSignedIn)?;
        let account = directory
            .accounts
            .get_mut(&email)
            .ok_or(AuthError::NotSignedIn)?;
        if let Some(name) = &profile.display_name {
            account.user.display_name = Some(name.clone());
        }
        if let Some(photo) = &profile.photo_url {
            account.user.photo_url = Some(photo.clone());
        }
        Ok(account.user.clone())
    }

    async fn sign_out(&self) -> AuthResult<()> {
        lock(&self.directory).current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_codes_map_to_variants() {
        assert!(matches!(
            map_provider_error("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_error("EMAIL_EXISTS"),
            AuthError::EmailExists
        ));
        match map_provider_error("WEAK_PASSWORD : Password should be at least 6 characters") {
            AuthError::WeakPassword(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            map_provider_error("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::Provider(_)
        ));
    }

    #[test]
    fn method_url_carries_key() {
        let client = IdentityToolkitClient::new(
            "https://identity.example.com/v1",
            SecretString::from("k123".to_string()),
        )
        .expect("client");
        let url = client.method_url("accounts:signUp").expect("url");
        assert_eq!(
            url.as_str(),
            "https://identity.example.com/v1/accounts:signUp?key=k123"
        );
    }

    #[test]
    fn user_label_prefers_display_name() {
        let user = User {
            uid: "u".to_string(),
            email: Some("e@x.io".to_string()),
            display_name: Some("Eve".to_string()),
            photo_url: None,
        };
        assert_eq!(user.label(), "Eve");

        let anonymous = User {
            email: None,
            display_name: None,
            ..user
        };
        assert_eq!(anonymous.label(), "u");
    }

    #[tokio::test]
    async fn in_memory_sign_in_checks_password() {
        let identity = InMemoryIdentity::new().with_account("a@b.io", "Secret1", "A");
        let err = identity
            .sign_in(&Credentials::new("a@b.io", "wrong"))
            .await
            .expect_err("wrong password");
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(identity.current_user().await.expect("current").is_none());

        identity
            .sign_in(&Credentials::new("a@b.io", "Secret1"))
            .await
            .expect("sign in");
        assert!(identity.current_user().await.expect("current").is_some());
    }

    #[tokio::test]
    async fn in_memory_sign_up_then_profile() {
        let identity = InMemoryIdentity::new();
        identity
            .sign_up(&Credentials::new("new@b.io", "Secret1"))
            .await
            .expect("sign up");
        let user = identity
            .update_profile(&Profile {
                display_name: Some("Newbie".to_string()),
                photo_url: Some("https://img.example/p.png".to_string()),
            })
            .await
            .expect("profile");
        assert_eq!(user.display_name.as_deref(), Some("Newbie"));

        let err = identity
            .sign_up(&Credentials::new("new@b.io", "Other1"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, AuthError::EmailExists));
    }

    #[tokio::test]
    async fn in_memory_sign_out_clears_session() {
        let identity = InMemoryIdentity::new().with_account("a@b.io", "Secret1", "A");
        identity
            .sign_in(&Credentials::new("a@b.io", "Secret1"))
            .await
            .expect("sign in");
        identity.sign_out().await.expect("sign out");
        assert!(identity.current_user().await.expect("current").is_none());
        let err = identity
            .update_profile(&Profile::default())
            .await
            .expect_err("not signed in");
        assert!(matches!(err, AuthError::NotSignedIn));
    }

    fn respond_identity(_method: &str, path: &str) -> axum::response::Response {
        use axum::{Json, http::StatusCode, response::IntoResponse};
        use serde_json::json;

        match path {
            "/v1/accounts:signInWithPassword" => Json(json!({
                "localId": "u42",
                "email": "ada@example.com",
                "idToken": "id-token-1"
            }))
            .into_response(),
            "/v1/accounts:update" => Json(json!({
                "localId": "u42",
                "email": "ada@example.com",
                "displayName": "Ada",
                "photoUrl": "https://img.example/ada.png"
            }))
            .into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "message": "EMAIL_EXISTS" } })),
            )
                .into_response(),
        }
    }

    #[tokio::test]
    async fn toolkit_client_signs_in_and_updates_profile() {
        let server = crate::test_server::TestServer::spawn(respond_identity).await;
        let client = IdentityToolkitClient::new(
            &format!("{}/v1", server.url),
            SecretString::from("k123".to_string()),
        )
        .expect("client");

        let user = client
            .sign_in(&Credentials::new("ada@example.com", "Secret1"))
            .await
            .expect("sign in");
        assert_eq!(user.uid, "u42");

        let user = client
            .update_profile(&Profile {
                display_name: Some("Ada".to_string()),
                photo_url: None,
            })
            .await
            .expect("profile");
        assert_eq!(user.label(), "Ada");
        assert_eq!(
            client.current_user().await.expect("current"),
            Some(user)
        );

        let requests = server.requests();
        assert_eq!(requests[0].query.as_deref(), Some("key=k123"));
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({
                "email": "ada@example.com",
                "password": "Secret1",
                "returnSecureToken": true
            }))
        );
        assert_eq!(
            requests[1].body,
            Some(serde_json::json!({
                "idToken": "id-token-1",
                "displayName": "Ada",
                "returnSecureToken": true
            }))
        );

        client.sign_out().await.expect("sign out");
        assert_eq!(client.current_user().await.expect("current"), None);
    }

    #[tokio::test]
    async fn toolkit_client_maps_provider_errors() {
        let server = crate::test_server::TestServer::spawn(respond_identity).await;
        let client = IdentityToolkitClient::new(
            &format!("{}/v1", server.url),
            SecretString::from("k123".to_string()),
        )
        .expect("client");

        let err = client
            .sign_up(&Credentials::new("ada@example.com", "Secret1"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, AuthError::EmailExists));
        assert!(client.current_user().await.expect("current").is_none());
    }
}
