//! Fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::net::http::{ApiError, ApiRequest, ApiResponse, HttpSend};
use crate::net::interceptor::Navigator;
use crate::net::types::{Guild, GuildPermission, UserProfile};
use crate::state::session::AuthSession;
use crate::state::session_store::SessionStore;
use crate::state::storage::{KeyValueStore, MemoryStore, StorageError};

pub fn memory_session() -> (AuthSession, Rc<MemoryStore>) {
    let storage = Rc::new(MemoryStore::new());
    let session = AuthSession::new(SessionStore::new(storage.clone()));
    (session, storage)
}

/// Memory-backed store whose write operations can be switched to fail.
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_set: Cell<bool>,
    pub fail_remove: Cell<bool>,
    pub fail_clear: Cell<bool>,
}

impl FailingStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fail_all(&self) {
        self.fail_set.set(true);
        self.fail_remove.set(true);
        self.fail_clear.set(true);
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_set.get() {
            return Err(StorageError::Write { key: key.to_owned(), message: "quota exceeded".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_remove.get() {
            return Err(StorageError::Unavailable);
        }
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.fail_clear.get() {
            return Err(StorageError::Unavailable);
        }
        self.inner.clear()
    }
}

/// Session over a [`FailingStore`]; switch failures on after seeding.
pub fn failing_session() -> (AuthSession, Rc<FailingStore>) {
    let storage = FailingStore::new();
    let session = AuthSession::new(SessionStore::new(storage.clone()));
    (session, storage)
}

pub fn guild(id: &str, owner: bool, permissions: &str, icon: Option<&str>) -> Guild {
    Guild {
        id: id.to_owned(),
        name: format!("guild {id}"),
        icon: icon.map(str::to_owned),
        owner,
        permissions: GuildPermission::from(Some(permissions.to_owned())),
        features: Vec::new(),
    }
}

pub fn sample_user() -> UserProfile {
    UserProfile {
        id: "7".to_owned(),
        display_name: "nhxv".to_owned(),
        email: Some("nhxv@example.test".to_owned()),
        provider_user_id: Some("80351110224678912".to_owned()),
        avatar: Some("https://cdn.test/avatars/80351110224678912/a1.png".to_owned()),
        roles: vec!["ROLE_USER".to_owned()],
        guilds: vec![
            guild("g1", true, "0", None),
            guild("g2", false, "MANAGE_GUILD", Some("abc")),
            guild("g3", false, "X", Some("def")),
        ],
    }
}

/// Sender that records requests and replays queued outcomes in order.
/// Falls back to an empty 200 once the queue runs dry.
#[derive(Default)]
pub struct StubSender {
    pub sent: RefCell<Vec<ApiRequest>>,
    outcomes: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl StubSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Ok(ApiResponse { status: 200, body: body.to_owned() }));
    }

    pub fn push_err(&self, err: ApiError) {
        self.outcomes.borrow_mut().push_back(Err(err));
    }

    pub fn push_status(&self, status: u16) {
        self.push_err(ApiError::Status { status, body: String::new() });
    }
}

#[async_trait(?Send)]
impl HttpSend for StubSender {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: String::new() }))
    }
}

/// Navigator that records redirects without changing its current path.
pub struct RecordingNavigator {
    pub path: RefCell<String>,
    pub redirects: RefCell<Vec<String>>,
    pub lookups: Cell<usize>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Rc<Self> {
        Rc::new(Self { path: RefCell::new(path.to_owned()), redirects: RefCell::new(Vec::new()), lookups: Cell::new(0) })
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.lookups.set(self.lookups.get() + 1);
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_owned());
    }
}
