//! Shared test fixture: an application backed by an in-memory document
//! store, with a manually-advanced clock and switchable store failures.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use actix_web::{
    dev::Payload,
    http::StatusCode,
    test::TestRequest,
    web,
    FromRequest,
    HttpRequest,
};

use accountlogic::{
    AccountData,
    App,
    AppConfig,
    AppStore,
    AppTypes,
    Error,
    PasswordHash,
    Secret,
};

/// The clock value every `TestApp` starts at.
pub const TEST_START_TIME: u64 = 1_700_000_000;

/// bcrypt's minimum cost factor. The bcrypt crate does not export its
/// `MIN_COST` constant, but the value is fixed by the algorithm.
const BCRYPT_MIN_COST: u32 = 4;

pub const DAY: u64 = 24 * 3600;

/// One stored record. `AccountData` holds a `PasswordHash`, which cannot be
/// cloned, so the store keeps the hash as a plain string and rebuilds
/// `AccountData` on the way out.
struct StoredAccount {
    email: String,
    password_hash: String,
    email_verified: bool,
    websites: Vec<String>,
    is_admin: bool,
}

/// An application whose store is a `HashMap` of documents keyed by
/// ObjectId-style hex ids. Clones share the same store and clock, like
/// clones of a database handle would.
#[derive(Clone)]
pub struct TestApp {
    store: Arc<Mutex<HashMap<String, StoredAccount>>>,
    next_id: Arc<AtomicU64>,
    clock: Arc<AtomicU64>,
    id_fetches: Arc<AtomicUsize>,
    store_broken: Arc<AtomicBool>,
    signing_secret: Arc<Secret>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            clock: Arc::new(AtomicU64::new(TEST_START_TIME)),
            id_fetches: Arc::new(AtomicUsize::new(0)),
            store_broken: Arc::new(AtomicBool::new(false)),
            signing_secret: Arc::new(Secret::from(
                "test signing secret, not fit for production".to_string(),
            )),
        }
    }

    /// Moves this app's clock forward by the given number of seconds.
    pub fn advance_clock(&self, seconds: u64) {
        self.clock.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Makes every store call fail until `repair_store` is called.
    pub fn break_store(&self) {
        self.store_broken.store(true, Ordering::SeqCst);
    }

    pub fn repair_store(&self) {
        self.store_broken.store(false, Ordering::SeqCst);
    }

    /// The number of times `get_account_by_id` has actually read the store.
    pub fn id_fetch_count(&self) -> usize {
        self.id_fetches.load(Ordering::SeqCst)
    }

    pub fn count_accounts_with_email(&self, email: &str) -> usize {
        self.store.lock().unwrap()
            .values()
            .filter(|stored| stored.email == email)
            .count()
    }

    fn check_store(&self) -> Result<(), TestError> {
        if self.store_broken.load(Ordering::SeqCst) {
            Err(TestError::Store("store offline"))
        } else {
            Ok(())
        }
    }
}

impl AppTypes for TestApp {
    type ID = String;
    type Error = TestError;
}

impl AppConfig for TestApp {
    fn token_signing_secret(&self) -> &Secret {
        &self.signing_secret
    }

    /// The minimum cost keeps the suite fast; the hashes are still real
    /// bcrypt hashes.
    fn password_hash_cost(&self) -> u32 {
        BCRYPT_MIN_COST
    }
}

impl AppStore for TestApp {
    async fn get_account_by_id(
        &self,
        account_id: &String,
    ) -> Result<Option<AccountData<Self>>, TestError> {
        self.check_store()?;
        self.id_fetches.fetch_add(1, Ordering::SeqCst);

        let store = self.store.lock().unwrap();
        Ok(store.get(account_id)
            .map(|stored| account_data(account_id.clone(), stored)))
    }

    async fn get_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountData<Self>>, TestError> {
        self.check_store()?;

        let store = self.store.lock().unwrap();
        Ok(store.iter()
            .find(|(_, stored)| stored.email == email)
            .map(|(id, stored)| account_data(id.clone(), stored)))
    }

    async fn insert_account(
        &self,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<String, TestError> {
        self.check_store()?;

        let mut store = self.store.lock().unwrap();
        // The unique index on email.
        if store.values().any(|stored| stored.email == email) {
            return Err(TestError::Store("duplicate key on unique email index"));
        }

        let id = format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst));
        store.insert(id.clone(), StoredAccount {
            email: email.to_string(),
            password_hash: password_hash.expose().to_string(),
            email_verified: false,
            websites: Vec::new(),
            is_admin: false,
        });

        Ok(id)
    }

    async fn delete_account_by_id(&self, account_id: &String) -> Result<bool, TestError> {
        self.check_store()?;

        let mut store = self.store.lock().unwrap();
        Ok(store.remove(account_id).is_some())
    }
}

impl App for TestApp {
    fn time_now(&self) -> u64 {
        self.clock.load(Ordering::SeqCst)
    }
}

impl FromRequest for TestApp {
    type Error = TestError;
    type Future = std::future::Ready<Result<Self, TestError>>;

    fn from_request(request: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let app = request.app_data::<web::Data<TestApp>>()
            .expect("TestApp should be registered as app data")
            .get_ref()
            .clone();
        std::future::ready(Ok(app))
    }
}

fn account_data(id: String, stored: &StoredAccount) -> AccountData<TestApp> {
    AccountData {
        id,
        email: stored.email.clone(),
        password_hash: PasswordHash::from(stored.password_hash.clone()),
        email_verified: stored.email_verified,
        websites: stored.websites.clone(),
        is_admin: stored.is_admin,
    }
}

/// The application error type used in tests: a library error, or a simulated
/// store failure.
#[derive(Debug)]
pub enum TestError {
    Auth(Error),
    Store(&'static str),
}

impl From<Error> for TestError {
    fn from(error: Error) -> Self {
        Self::Auth(error)
    }
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(error) => f.write_str(error.message()),
            Self::Store(reason) => write!(f, "simulated store failure: {reason}"),
        }
    }
}

impl actix_web::ResponseError for TestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(error) => error.status_code(),
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Registers an account and returns its store-assigned id.
pub async fn register(app: &TestApp, email: &str, password: &str) -> String {
    accountlogic::register_new_account(app, email, Secret::from(password.to_string()))
        .await
        .expect("Registration should succeed");

    app.get_account_by_email(email)
        .await
        .expect("Store should be reachable")
        .expect("Account should exist after registration")
        .id
}

/// An `HttpRequest` to carry cookie actions in tests which don't go through
/// a full Actix service.
pub fn plain_request() -> HttpRequest {
    TestRequest::default().to_http_request()
}

pub fn secret(value: &str) -> Secret {
    Secret::from(value.to_string())
}
