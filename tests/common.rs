#![allow(dead_code)]

use lebanon_tourism::{
    api::router::create_router,
    client::{
        models::{City, Event, NewBooking, NewSuggestion, Place, Registration, SessionUser, Suggestion},
        ClientError, TourismApi,
    },
    config::Config,
    infra::factory::{run_sqlite_migrations, sqlite_state},
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Semaphore;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub state: Arc<AppState>,
    pub uploads: TempDir,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().unwrap();
        let uploads = tempfile::tempdir().unwrap();
        let db_url = format!("sqlite://{}?mode=rwc", db_dir.path().join("test.db").display());

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            uploads_dir: uploads.path().to_path_buf(),
            public_base_url: Some("http://tourism.test".to_string()),
        };

        let state = Arc::new(sqlite_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            state,
            uploads,
            _db_dir: db_dir,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::HOST, "tourism.test")
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    pub async fn post(&self, uri: &str, payload: Value) -> Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    /// Registers and logs in, returning the new user's id.
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> i64 {
        let res = self.post("/register", json!({"name": name, "email": email, "password": password})).await;
        if res.status() != StatusCode::OK {
            panic!("Register failed in test helper: status {}", res.status());
        }

        let res = self.post("/login", json!({"email": email, "password": password})).await;
        if res.status() != StatusCode::OK {
            panic!("Login failed in test helper: status {}", res.status());
        }
        let body = parse_body(res).await;
        body["user"]["id"].as_i64().expect("No user id in login body")
    }

    pub fn write_upload(&self, relative: &str, bytes: &[u8]) {
        let path = self.uploads.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, bytes).unwrap();
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(&self.pool).await.unwrap()
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn event(id: i64, name: &str) -> Event {
    Event {
        id,
        name: name.to_string(),
        season: Some("Summer".to_string()),
        place: Some("Beirut".to_string()),
        description: None,
        kind: Some("festival".to_string()),
        image: Some(format!("http://tourism.test/events/{id}/image")),
    }
}

pub fn user(id: i64, name: &str) -> SessionUser {
    SessionUser {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

/// In-memory stand-in for the HTTP API.
///
/// Every call is recorded by name. Calls can be made to fail with
/// [`MockApi::fail`] or parked until released with [`MockApi::hold`] and
/// [`MockApi::release`].
#[derive(Default)]
pub struct MockApi {
    pub events: Mutex<Vec<Event>>,
    pub bookings: Mutex<Vec<Value>>,
    pub favorites: Mutex<HashMap<i64, Vec<i64>>>,
    pub suggestions: Mutex<Vec<Suggestion>>,
    pub cities: Mutex<Vec<City>>,
    pub places: Mutex<Vec<Place>>,
    users: Mutex<Vec<(SessionUser, String)>>,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<&'static str, Arc<Semaphore>>>,
    parked: Mutex<HashMap<(&'static str, usize), Arc<Semaphore>>>,
    next_id: AtomicI64,
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.next_id.store(100, Ordering::SeqCst);
        api
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        *self.events.lock() = events;
        self
    }

    pub fn with_user(self, user: SessionUser, password: &str) -> Self {
        self.users.lock().push((user, password.to_string()));
        self
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().remove(op);
    }

    pub fn hold(&self, op: &'static str) {
        self.gates.lock().insert(op, Arc::new(Semaphore::new(0)));
    }

    /// Lets the next `n` held calls of `op` through, oldest first.
    pub fn release(&self, op: &'static str, n: usize) {
        if let Some(gate) = self.gates.lock().get(op) {
            gate.add_permits(n);
        }
    }

    /// Lets one specific held call through; `nth` counts calls of `op` from 0.
    pub fn release_call(&self, op: &'static str, nth: usize) {
        if let Some(gate) = self.parked.lock().get(&(op, nth)) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == op).count()
    }

    /// Waits until `op` has been called at least `n` times.
    pub async fn wait_for_calls(&self, op: &str, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls(op) < n {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("{op} was not called {n} times"));
    }

    pub fn favorite_ids(&self, user_id: i64) -> Vec<i64> {
        self.favorites.lock().get(&user_id).cloned().unwrap_or_default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn begin(&self, op: &'static str) -> Result<(), ClientError> {
        let nth = {
            let mut calls = self.calls.lock();
            let nth = calls.iter().filter(|c| **c == op).count();
            calls.push(op);
            nth
        };

        let gate = self.gates.lock().get(op).cloned();
        if let Some(gate) = gate {
            let own = Arc::new(Semaphore::new(0));
            self.parked.lock().insert((op, nth), own.clone());
            tokio::select! {
                permit = gate.acquire() => permit.unwrap().forget(),
                permit = own.acquire() => permit.unwrap().forget(),
            }
        }

        if self.failing.lock().contains(op) {
            return Err(ClientError::Server { status: 500, message: format!("{op} failed") });
        }
        Ok(())
    }
}

#[async_trait]
impl TourismApi for MockApi {
    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.begin("list_events").await?;
        Ok(self.events.lock().clone())
    }

    async fn list_cities(&self) -> Result<Vec<City>, ClientError> {
        self.begin("list_cities").await?;
        Ok(self.cities.lock().clone())
    }

    async fn list_places(&self, city_id: i64) -> Result<Vec<Place>, ClientError> {
        self.begin("list_places").await?;
        Ok(self.places.lock().iter().filter(|p| p.city_id == city_id).cloned().collect())
    }

    async fn list_bookings(&self) -> Result<Vec<Value>, ClientError> {
        // Rows are read when the request arrives, not when it is answered.
        let rows = self.bookings.lock().clone();
        self.begin("list_bookings").await?;
        Ok(rows)
    }

    async fn add_booking(&self, booking: &NewBooking) -> Result<(), ClientError> {
        self.begin("add_booking").await?;
        let id = self.next_id();
        self.bookings.lock().insert(0, json!({
            "id": id,
            "name": booking.name,
            "phone": booking.phone,
            "email": booking.email,
            "event_name": booking.event_name,
        }));
        Ok(())
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<(), ClientError> {
        self.begin("delete_booking").await?;
        self.bookings.lock().retain(|b| b["id"].as_i64() != Some(booking_id));
        Ok(())
    }

    async fn list_favorites(&self, user_id: i64) -> Result<Vec<Event>, ClientError> {
        self.begin("list_favorites").await?;
        let ids = self.favorite_ids(user_id);
        let events = self.events.lock();
        Ok(ids
            .iter()
            .filter_map(|id| events.iter().find(|e| e.id == *id).cloned())
            .collect())
    }

    async fn add_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError> {
        self.begin("add_favorite").await?;
        let mut favorites = self.favorites.lock();
        let ids = favorites.entry(user_id).or_default();
        if !ids.contains(&event_id) {
            ids.push(event_id);
        }
        Ok(())
    }

    async fn delete_favorite(&self, user_id: i64, event_id: i64) -> Result<(), ClientError> {
        self.begin("delete_favorite").await?;
        if let Some(ids) = self.favorites.lock().get_mut(&user_id) {
            ids.retain(|id| *id != event_id);
        }
        Ok(())
    }

    async fn list_suggestions(&self) -> Result<Vec<Suggestion>, ClientError> {
        self.begin("list_suggestions").await?;
        Ok(self.suggestions.lock().clone())
    }

    async fn add_suggestion(&self, suggestion: &NewSuggestion) -> Result<(), ClientError> {
        self.begin("add_suggestion").await?;
        let id = self.next_id();
        self.suggestions.lock().insert(0, Suggestion {
            id,
            name: suggestion.name.clone(),
            city: suggestion.city.clone(),
            place: suggestion.place.clone(),
            maps_link: suggestion.maps_link.clone(),
            description: suggestion.description.clone(),
        });
        Ok(())
    }

    async fn delete_suggestion(&self, suggestion_id: i64) -> Result<(), ClientError> {
        self.begin("delete_suggestion").await?;
        self.suggestions.lock().retain(|s| s.id != suggestion_id);
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        self.begin("login").await?;
        self.users
            .lock()
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ClientError::Unauthorized("Invalid credentials".into()))
    }

    async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        self.begin("register").await?;
        let mut users = self.users.lock();
        if users.iter().any(|(u, _)| u.email == registration.email) {
            return Err(ClientError::Conflict("Email already exists".into()));
        }
        let id = self.next_id();
        users.push((
            SessionUser { id, name: registration.name.clone(), email: registration.email.clone() },
            registration.password.clone(),
        ));
        Ok(())
    }
}
