//! The signed-in user and the gate in front of the board.
//!
//! [`AuthSession`] is created once at startup and owned by whoever drives the
//! board. It starts out [`AuthState::Resolving`] until [`AuthSession::resolve`]
//! asks the provider whether a session already exists.

use std::sync::Arc;

use tasknest_client::{IdentityProvider, TaskApi, User};
use tracing::{info, instrument, warn};

use crate::account::{Registration, validate_sign_in};
use crate::error::{BoardError, Result};

/// Where the user is trying to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// The sign-in form.
    Login,
    /// The sign-up form.
    Register,
    /// The task board. Requires a signed-in user.
    #[default]
    Board,
}

impl Route {
    /// Returns `true` for routes that need a signed-in user.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Board)
    }
}

/// What the session knows about the current user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// The provider has not answered yet.
    #[default]
    Resolving,
    /// Nobody is signed in.
    SignedOut,
    /// A user is signed in.
    SignedIn(User),
}

impl AuthState {
    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// A user only counts as authenticated once the provider reports an email.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some_and(|user| user.email.is_some())
    }
}

/// The gate's answer for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral loading screen.
    ShowLoading,
    /// Show the requested route.
    Render,
    /// Send the user to the login screen, remembering where they came from.
    RedirectToLogin {
        /// The route to return to after signing in.
        from: Route,
    },
}

/// Decides what to show for `route` given the current auth state.
///
/// # Examples
///
/// ```
/// use tasknest_board::{AuthState, GuardDecision, Route, guard};
///
/// assert_eq!(guard(&AuthState::Resolving, Route::Board), GuardDecision::ShowLoading);
/// assert_eq!(
///     guard(&AuthState::SignedOut, Route::Board),
///     GuardDecision::RedirectToLogin { from: Route::Board }
/// );
/// assert_eq!(guard(&AuthState::SignedOut, Route::Login), GuardDecision::Render);
/// ```
#[must_use]
pub fn guard(state: &AuthState, route: Route) -> GuardDecision {
    if !route.is_protected() {
        return GuardDecision::Render;
    }
    match state {
        AuthState::Resolving => GuardDecision::ShowLoading,
        _ if state.is_authenticated() => GuardDecision::Render,
        _ => GuardDecision::RedirectToLogin { from: route },
    }
}

/// The result of a sign-up.
///
/// The account exists and is signed in either way; `issues` lists the
/// follow-up steps that failed.
#[derive(Debug)]
pub struct Registered {
    /// The new user, with profile applied when that step succeeded.
    pub user: User,
    /// Failures from the profile update or the user record.
    pub issues: Vec<BoardError>,
}

/// The authentication session.
#[derive(Debug)]
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    api: Arc<dyn TaskApi>,
    state: AuthState,
}

impl AuthSession {
    /// Creates a session in the resolving state.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, api: Arc<dyn TaskApi>) -> Self {
        Self {
            provider,
            api,
            state: AuthState::Resolving,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Applies [`guard`] to the current state.
    #[must_use]
    pub fn guard(&self, route: Route) -> GuardDecision {
        guard(&self.state, route)
    }

    /// Asks the provider for an existing session.
    ///
    /// A provider failure resolves to signed out; it is logged, not returned.
    #[instrument(skip(self))]
    pub async fn resolve(&mut self) -> &AuthState {
        self.state = match self.provider.current_user().await {
            Ok(Some(user)) => AuthState::SignedIn(user),
            Ok(None) => AuthState::SignedOut,
            Err(e) => {
                warn!(error = %e, "could not resolve session");
                AuthState::SignedOut
            }
        };
        &self.state
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either field is blank, otherwise the
    /// provider's error. The state is left unchanged on failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        validate_sign_in(email, password)?;
        let credentials = tasknest_client::Credentials::new(email.trim(), password);
        let user = self
            .provider
            .sign_in(&credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "sign in failed"))?;
        info!(uid = %user.uid, "signed in");
        self.state = AuthState::SignedIn(user.clone());
        Ok(user)
    }

    /// Creates an account, applies the profile, and records the user with the
    /// task API.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the provider's error if
    /// the account could not be created. Later failures are reported in
    /// [`Registered::issues`] instead.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&mut self, registration: &Registration) -> Result<Registered> {
        registration.validate()?;
        let mut user = self
            .provider
            .sign_up(&registration.credentials())
            .await
            .inspect_err(|e| warn!(error = %e, "sign up failed"))?;
        info!(uid = %user.uid, "account created");
        self.state = AuthState::SignedIn(user.clone());

        let mut issues = Vec::new();
        match self.provider.update_profile(&registration.profile()).await {
            Ok(updated) => {
                user = updated;
                self.state = AuthState::SignedIn(user.clone());
            }
            Err(e) => {
                warn!(error = %e, "profile update failed");
                issues.push(e.into());
            }
        }
        if let Err(e) = self.api.register_user(&registration.user_record()).await {
            warn!(error = %e, "user record failed");
            issues.push(e.into());
        }

        Ok(Registered { user, issues })
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, in which case the user stays signed in.
    #[instrument(skip(self))]
    pub async fn sign_out(&mut self) -> Result<()> {
        self.provider.sign_out().await?;
        info!("signed out");
        self.state = AuthState::SignedOut;
        Ok(())
    }
}
