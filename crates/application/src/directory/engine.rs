//! Directory query engine.
//!
//! One engine belongs to one screen activation. It can only be built from an
//! [`AccessToken`], so holding one means the session gate has been passed.
//!
//! Requests for the same [`QueryKey`] that overlap in time share a single
//! outbound request and observe the same settled outcome. Each request runs
//! on its own task holding only a weak reference to the engine's cache: when
//! the screen goes away first, the request is left to finish and its result
//! is dropped on arrival.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use studex_domain::{
    AccessToken, LookupId, QueryKey, RequestSpec, ServiceSettings, StudentRecord,
};
use tracing::{debug, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpClient;

/// Settled result of one directory query, shared by callers and cache.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// A roster (`roster` or `birthdayRoster`).
    Students(Arc<Vec<StudentRecord>>),
    /// A single record (`lookup:<id>`).
    Student(Arc<StudentRecord>),
}

impl QueryOutput {
    /// Returns the roster, if this is one.
    #[must_use]
    pub fn students(&self) -> Option<&Arc<Vec<StudentRecord>>> {
        match self {
            Self::Students(students) => Some(students),
            Self::Student(_) => None,
        }
    }

    /// Returns the single record, if this is one.
    #[must_use]
    pub fn student(&self) -> Option<&Arc<StudentRecord>> {
        match self {
            Self::Student(student) => Some(student),
            Self::Students(_) => None,
        }
    }

    fn into_students(self) -> ApplicationResult<Arc<Vec<StudentRecord>>> {
        match self {
            Self::Students(students) => Ok(students),
            Self::Student(_) => Err(ApplicationError::fetch("expected a list of students")),
        }
    }

    fn into_student(self) -> ApplicationResult<Arc<StudentRecord>> {
        match self {
            Self::Student(student) => Ok(student),
            Self::Students(_) => Err(ApplicationError::fetch("expected a single student")),
        }
    }
}

type SharedFetch = Shared<BoxFuture<'static, ApplicationResult<QueryOutput>>>;

#[derive(Default)]
struct EngineState {
    in_flight: HashMap<QueryKey, SharedFetch>,
    cache: HashMap<QueryKey, QueryOutput>,
}

/// Gated, de-duplicating, caching reader of the student directory.
pub struct DirectoryQueryEngine {
    http: Arc<dyn HttpClient>,
    settings: Arc<ServiceSettings>,
    token: AccessToken,
    state: Arc<Mutex<EngineState>>,
}

impl DirectoryQueryEngine {
    /// Creates an engine with an empty cache.
    #[must_use]
    pub fn new(
        http: Arc<dyn HttpClient>,
        settings: Arc<ServiceSettings>,
        token: AccessToken,
    ) -> Self {
        Self {
            http,
            settings,
            token,
            state: Arc::new(Mutex::new(EngineState::default())),
        }
    }

    /// Fetches the full roster.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailed` on a non-success status, a transport failure or
    /// a malformed body.
    pub async fn fetch_roster(&self) -> ApplicationResult<Arc<Vec<StudentRecord>>> {
        self.query(QueryKey::Roster).await?.into_students()
    }

    /// Fetches the students whose birthday is today.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailed` on a non-success status, a transport failure or
    /// a malformed body.
    pub async fn fetch_birthday_roster(&self) -> ApplicationResult<Arc<Vec<StudentRecord>>> {
        self.query(QueryKey::BirthdayRoster).await?.into_students()
    }

    /// Looks up one student by caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for empty or blank input and for `.` or `..`,
    /// without any request,
    /// and `FetchFailed` when the read itself fails.
    pub async fn fetch_by_id(&self, input: &str) -> ApplicationResult<Arc<StudentRecord>> {
        let id = LookupId::parse(input)?;
        self.query(QueryKey::Lookup(id)).await?.into_student()
    }

    /// Last successful result cached under `key`.
    #[must_use]
    pub fn cached(&self, key: &QueryKey) -> Option<QueryOutput> {
        self.state.lock().cache.get(key).cloned()
    }

    /// Cached full roster.
    #[must_use]
    pub fn cached_roster(&self) -> Option<Arc<Vec<StudentRecord>>> {
        self.cached(&QueryKey::Roster)
            .and_then(|o| o.students().cloned())
    }

    /// Cached birthday roster.
    #[must_use]
    pub fn cached_birthday_roster(&self) -> Option<Arc<Vec<StudentRecord>>> {
        self.cached(&QueryKey::BirthdayRoster)
            .and_then(|o| o.students().cloned())
    }

    /// Cached lookup result.
    #[must_use]
    pub fn cached_record(&self, id: &LookupId) -> Option<Arc<StudentRecord>> {
        self.cached(&QueryKey::Lookup(id.clone()))
            .and_then(|o| o.student().cloned())
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight.len()
    }

    /// Drops the cached result for `key`. Returns true if one was cached.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.state.lock().cache.remove(key).is_some()
    }

    /// Drops every cached result. In-flight requests are unaffected.
    pub fn clear_cache(&self) {
        self.state.lock().cache.clear();
    }

    /// Image URL for a record, as configured for this engine.
    #[must_use]
    pub fn image_url(&self, record: &StudentRecord) -> String {
        self.settings.image_url(record.id)
    }

    async fn query(&self, key: QueryKey) -> ApplicationResult<QueryOutput> {
        let pending = self.pending(key)?;
        pending.await
    }

    /// Joins the in-flight request for `key`, or starts one.
    fn pending(&self, key: QueryKey) -> ApplicationResult<SharedFetch> {
        let mut state = self.state.lock();
        if let Some(pending) = state.in_flight.get(&key) {
            debug!(%key, "joining in-flight request");
            return Ok(pending.clone());
        }

        let request = self.build_request(&key)?;
        let http = Arc::clone(&self.http);
        let cache = Arc::downgrade(&self.state);
        let task_key = key.clone();
        // The lock is held until the entry is inserted, so the task cannot
        // settle before its own in-flight entry exists.
        let handle = tokio::spawn(async move {
            let outcome = execute(http.as_ref(), request, &task_key).await;
            settle(&cache, &task_key, &outcome);
            outcome
        });
        let shared = async move {
            handle
                .await
                .unwrap_or_else(|e| Err(ApplicationError::fetch(format!("request task failed: {e}"))))
        }
        .boxed()
        .shared();

        state.in_flight.insert(key, shared.clone());
        Ok(shared)
    }

    /// Settings that cannot produce a URL fail the read, not the caller input.
    fn build_request(&self, key: &QueryKey) -> ApplicationResult<RequestSpec> {
        let url = match key {
            QueryKey::Roster => self.settings.roster_url(),
            QueryKey::BirthdayRoster => self.settings.birthday_url(),
            QueryKey::Lookup(id) => self.settings.student_url(id),
        }
        .map_err(|e| {
            warn!(%key, error = %e, "cannot build directory request");
            ApplicationError::fetch(format!("cannot build request: {e}"))
        })?;
        Ok(RequestSpec::get(url).with_bearer(&self.token))
    }
}

impl std::fmt::Debug for DirectoryQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DirectoryQueryEngine")
            .field("token", &self.token)
            .field("in_flight", &state.in_flight.len())
            .field("cached", &state.cache.len())
            .finish_non_exhaustive()
    }
}

async fn execute(
    http: &dyn HttpClient,
    request: RequestSpec,
    key: &QueryKey,
) -> ApplicationResult<QueryOutput> {
    debug!(%key, url = %request.url, "dispatching directory request");
    let response = http.execute(request).await.map_err(|e| {
        warn!(%key, error = %e, "directory request failed in transport");
        ApplicationError::from(e)
    })?;

    if !response.is_success() {
        warn!(%key, status = %response.status, "directory request rejected");
        return Err(ApplicationError::fetch_status(response.status));
    }

    let malformed = |e: serde_json::Error| {
        warn!(%key, error = %e, "malformed directory response");
        ApplicationError::fetch(format!("malformed response body: {e}"))
    };
    if key.is_collection() {
        let students: Vec<StudentRecord> = response.json_body().map_err(malformed)?;
        debug!(%key, count = students.len(), "directory request settled");
        Ok(QueryOutput::Students(Arc::new(students)))
    } else {
        let student: StudentRecord = response.json_body().map_err(malformed)?;
        Ok(QueryOutput::Student(Arc::new(student)))
    }
}

/// Publishes a settled outcome to the cache, if the engine still exists.
///
/// A success replaces the cached value; a failure evicts it, since the key
/// has been re-queried.
fn settle(
    state: &Weak<Mutex<EngineState>>,
    key: &QueryKey,
    outcome: &ApplicationResult<QueryOutput>,
) {
    let Some(state) = state.upgrade() else {
        warn!(%key, "screen gone; discarding result");
        return;
    };
    let mut state = state.lock();
    state.in_flight.remove(key);
    match outcome {
        Ok(output) => {
            state.cache.insert(key.clone(), output.clone());
        }
        Err(_) => {
            state.cache.remove(key);
        }
    }
}
