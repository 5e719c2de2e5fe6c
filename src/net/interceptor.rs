//! Request authenticator middleware.
//!
//! Wraps an inner [`HttpSend`] and exposes the same trait, so it stacks with
//! other middleware. Outgoing requests get `Authorization: Bearer <token>`
//! when a token is stored. A 401 response signs the tab out and sends the
//! browser to the login surface before the error reaches the caller.
//!
//! TRADE-OFFS
//! ==========
//! Only 401 is treated as a rejected credential. Transport failures and other
//! statuses pass through untouched so a flaky network never logs anyone out.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;

use super::http::{AUTHORIZATION_HEADER, ApiError, ApiRequest, ApiResponse, HttpSend};
use crate::state::auth::Subscription;
use crate::state::session::AuthSession;

/// Access to the browsing context's location.
pub trait Navigator {
    /// Path component of the current location, e.g. `/login`.
    fn current_path(&self) -> String;

    /// Navigate the browsing context to `path`.
    fn redirect(&self, path: &str);
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn redirect(&self, path: &str) {
        (**self).redirect(path);
    }
}

#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Outcome of inspecting a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionAction {
    /// Not a credential rejection; nothing to do.
    PassThrough,
    /// Already on the login surface; redirecting again would loop.
    AlreadyOnLogin,
    /// The request carried a token that has since been replaced.
    StaleToken,
    /// A forced sign-out is already in flight.
    RedirectPending,
    /// Clear the session and redirect to login.
    SignOut,
}

/// Decide how to react to `error` for a request sent with `sent_token`.
#[must_use]
pub fn classify_rejection(
    error: &ApiError,
    current_path: &str,
    login_path: &str,
    sent_token: Option<&str>,
    stored_token: Option<&str>,
    redirect_pending: bool,
) -> RejectionAction {
    if !error.is_unauthorized() {
        return RejectionAction::PassThrough;
    }
    if current_path == login_path {
        return RejectionAction::AlreadyOnLogin;
    }
    if stored_token.is_some() && stored_token != sent_token {
        return RejectionAction::StaleToken;
    }
    if redirect_pending {
        return RejectionAction::RedirectPending;
    }
    RejectionAction::SignOut
}

/// Middleware attaching the session token and enforcing forced sign-out.
pub struct RequestAuthenticator<S, N> {
    inner: S,
    session: AuthSession,
    navigator: N,
    login_path: String,
    redirect_pending: Rc<Cell<bool>>,
    _auth_watch: Subscription,
}

impl<S: HttpSend, N: Navigator> RequestAuthenticator<S, N> {
    #[must_use]
    pub fn new(inner: S, session: AuthSession, navigator: N, login_path: impl Into<String>) -> Self {
        let redirect_pending = Rc::new(Cell::new(false));
        // A new login ends the previous forced sign-out.
        let pending = Rc::clone(&redirect_pending);
        let auth_watch = session.broadcaster().subscribe(move |authenticated| {
            if authenticated {
                pending.set(false);
            }
        });
        Self { inner, session, navigator, login_path: login_path.into(), redirect_pending, _auth_watch: auth_watch }
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    #[must_use]
    pub fn is_redirect_pending(&self) -> bool {
        self.redirect_pending.get()
    }

    fn on_error(&self, error: &ApiError, sent_token: Option<&str>) {
        let stored_token = self.session.token();
        let action = classify_rejection(
            error,
            &self.navigator.current_path(),
            &self.login_path,
            sent_token,
            stored_token.as_deref(),
            self.redirect_pending.get(),
        );
        match action {
            RejectionAction::PassThrough => {}
            RejectionAction::AlreadyOnLogin => log::debug!("401 on login surface; not redirecting"),
            RejectionAction::StaleToken => log::debug!("401 for a replaced token; session kept"),
            RejectionAction::RedirectPending => log::debug!("401 while sign-out redirect pending"),
            RejectionAction::SignOut => {
                log::warn!("credential rejected; signing out and redirecting to {}", self.login_path);
                self.session.sign_out();
                // Armed after the sign-out's own publish; a token that survived
                // the clear must not re-arm the guard.
                self.redirect_pending.set(true);
                self.navigator.redirect(&self.login_path);
            }
        }
    }
}

#[async_trait(?Send)]
impl<S: HttpSend, N: Navigator> HttpSend for RequestAuthenticator<S, N> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = self.session.token();
        let result = match token.as_deref() {
            Some(t) => {
                let authed = request.with_header(AUTHORIZATION_HEADER, bearer_value(t));
                self.inner.send(&authed).await
            }
            None => self.inner.send(request).await,
        };
        if let Err(error) = &result {
            self.on_error(error, token.as_deref());
        }
        result
    }
}
