//! Browser bindings for the session core (feature `hydrate`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything above this module works against traits so it can run natively
//! in tests. Here those traits meet `window.sessionStorage`,
//! `window.location`, and `gloo-net`, and [`connect`] wires the production
//! stack: gloo sender, wrapped by the request authenticator, behind the
//! dashboard API, behind the session facade.

use std::rc::Rc;

use gloo_net::http::{Method, RequestBuilder};

use crate::config::ClientConfig;
use crate::net::api::DashboardApi;
use crate::net::http::{ApiError, ApiRequest, ApiResponse, HttpMethod, HttpSend};
use crate::net::interceptor::{Navigator, RequestAuthenticator};
use crate::net::types::UserProfile;
use crate::state::session::{AuthSession, SessionError, SessionFacade};
use crate::state::session_store::SessionStore;
use crate::state::storage::{KeyValueStore, StorageError};

/// Facade over the full browser stack.
pub type BrowserFacade = SessionFacade<DashboardApi<RequestAuthenticator<GlooSender, BrowserNavigator>>>;

/// Install the panic hook and route `log` to the browser console.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&format!("console logger init failed: {e}")));
    }
}

fn session_storage() -> Result<web_sys::Storage, StorageError> {
    let Some(window) = web_sys::window() else {
        return Err(StorageError::Unavailable);
    };
    match window.session_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) | Err(_) => Err(StorageError::Unavailable),
    }
}

/// `window.sessionStorage`, resolved on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStorage;

impl KeyValueStore for BrowserSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match session_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::debug!("read of {key} skipped: {e}");
                return None;
            }
        };
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("sessionStorage read of {key} failed: {e:?}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        session_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write { key: key.to_owned(), message: format!("{e:?}") })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        session_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write { key: key.to_owned(), message: format!("{e:?}") })
    }

    fn clear(&self) -> Result<(), StorageError> {
        session_storage()?
            .clear()
            .map_err(|e| StorageError::Write { key: "*".to_owned(), message: format!("{e:?}") })
    }
}

/// `window.location` as a [`Navigator`]. Redirects are full page loads.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        match window.location().pathname() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("location.pathname unavailable: {e:?}");
                String::new()
            }
        }
    }

    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; cannot redirect to {path}");
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            log::warn!("redirect to {path} failed: {e:?}");
        }
    }
}

/// Query string of the current location, including the leading `?`.
#[must_use]
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| match w.location().search() {
            Ok(search) => Some(search),
            Err(e) => {
                log::warn!("location.search unavailable: {e:?}");
                None
            }
        })
        .unwrap_or_default()
}

fn gloo_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Terminal sender backed by `fetch` through gloo-net.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooSender;

#[async_trait::async_trait(?Send)]
impl HttpSend for GlooSender {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = RequestBuilder::new(&request.url).method(gloo_method(request.method));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let outgoing = match &request.body {
            Some(body) => builder.body(body.clone()),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let resp = outgoing.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        if !(200..300).contains(&status) {
            log::debug!("{} {} -> {status}", request.method.as_str(), request.url);
            return Err(ApiError::Status { status, body });
        }
        Ok(ApiResponse { status, body })
    }
}

/// Wire the browser stack for `config`.
#[must_use]
pub fn connect(config: ClientConfig) -> BrowserFacade {
    let session = AuthSession::new(SessionStore::new(Rc::new(BrowserSessionStorage)));
    let authenticator =
        RequestAuthenticator::new(GlooSender, session.clone(), BrowserNavigator, config.login_path.clone());
    let api = DashboardApi::new(authenticator, config.api_base_url.clone());
    log::info!("session connected to {}", config.api_base_url);
    SessionFacade::new(session, api, config)
}

/// Finish an OAuth round trip from the current location's query string and
/// hand the outcome to `on_done`.
pub fn complete_login_from_location<F>(facade: Rc<BrowserFacade>, on_done: F)
where
    F: FnOnce(Result<Option<UserProfile>, SessionError>) + 'static,
{
    let query = current_search();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = facade.handle_oauth_redirect(&query).await;
        on_done(outcome);
    });
}
