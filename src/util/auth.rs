//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded route components apply identical unauthenticated redirect
//! behavior, driven by a signal mirroring the session's login-state stream.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::session::AuthSession;

/// True when a guarded screen should bounce to the login surface.
#[must_use]
pub fn should_redirect_unauth(authenticated: bool, current_path: &str, login_path: &str) -> bool {
    !authenticated && current_path != login_path
}

/// Signal that follows the session's login state for the app's lifetime.
pub fn auth_signal(session: &AuthSession) -> RwSignal<bool> {
    let authed = RwSignal::new(session.broadcaster().current());
    session
        .broadcaster()
        .subscribe(move |value| {
            if authed.try_set(value).is_some() {
                log::debug!("auth signal disposed; dropping update");
            }
        })
        .detach();
    authed
}

/// Redirect to `login_path` whenever the session reports logged out.
pub fn install_unauth_redirect<F>(authed: RwSignal<bool>, login_path: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let pathname = use_location().pathname;
    Effect::new(move || {
        let path = pathname.get();
        if should_redirect_unauth(authed.get(), &path, &login_path) {
            navigate(&login_path, NavigateOptions::default());
        }
    });
}
