//! Local copies of events, bookings, favorites and suggestions, reconciled
//! with the server.
//!
//! Rules the type maintains:
//!
//! * Nothing is changed locally before the server has accepted the change.
//!   A failed call leaves local state as it was.
//! * Reloads apply their response when they complete, so the most recently
//!   completed reload is what the collections show.
//! * At most one favorite toggle per event is in flight. Toggling an event
//!   whose previous toggle has not resolved issues no request.
//! * Favorite responses that arrive after the signed-in identity changed
//!   are dropped.
//! * After [`TourismSync::shutdown`] no in-flight call applies its result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::api::TourismApi;
use crate::client::error::ClientError;
use crate::client::images::ImageCatalog;
use crate::client::models::{Booking, City, Event, NewBooking, NewSuggestion, Place, Suggestion};
use crate::client::normalize::normalize_bookings;
use crate::client::session::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Absent,
    PendingAdd,
    Present,
    PendingRemove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Nobody is signed in; nothing was sent.
    SignedOut,
    /// A toggle for this event is still waiting on the server.
    InFlight,
    /// The server accepted the change but the identity changed meanwhile.
    Stale,
}

#[derive(Default)]
struct Collections {
    events: Vec<Event>,
    bookings: Vec<Booking>,
    favorites: Vec<Event>,
    suggestions: Vec<Suggestion>,
}

pub struct TourismSync {
    api: Arc<dyn TourismApi>,
    auth: Arc<AuthSession>,
    images: ImageCatalog,
    state: RwLock<Collections>,
    pending_favorites: Mutex<HashMap<i64, FavoriteState>>,
    shutdown: watch::Sender<bool>,
}

/// Clears an event's pending toggle however the toggle ends, including
/// when its future is dropped mid-request.
struct PendingToggle<'a> {
    pending: &'a Mutex<HashMap<i64, FavoriteState>>,
    event_id: i64,
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.event_id);
    }
}

impl TourismSync {
    pub fn new(api: Arc<dyn TourismApi>, auth: Arc<AuthSession>, images: ImageCatalog) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            api,
            auth,
            images,
            state: RwLock::new(Collections::default()),
            pending_favorites: Mutex::new(HashMap::new()),
            shutdown,
        }
    }

    pub fn auth(&self) -> &Arc<AuthSession> {
        &self.auth
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.read().events.clone()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state.read().bookings.clone()
    }

    pub fn favorites(&self) -> Vec<Event> {
        self.state.read().favorites.clone()
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state.read().suggestions.clone()
    }

    pub fn is_favorite(&self, event_id: i64) -> bool {
        self.state.read().favorites.iter().any(|f| f.id == event_id)
    }

    pub fn favorite_state(&self, event_id: i64) -> FavoriteState {
        if let Some(state) = self.pending_favorites.lock().get(&event_id) {
            return *state;
        }
        if self.is_favorite(event_id) {
            FavoriteState::Present
        } else {
            FavoriteState::Absent
        }
    }

    /// Startup load: events, bookings, and favorites for the restored user.
    /// Each part is attempted even if an earlier one failed; the first
    /// failure is returned.
    pub async fn load_all(&self) -> Result<(), ClientError> {
        let events = self.load_events().await;
        let bookings = self.load_bookings().await;
        let favorites = self.load_favorites().await;
        events.and(bookings).and(favorites)
    }

    pub async fn load_events(&self) -> Result<(), ClientError> {
        let events = self.guarded(self.api.list_events()).await.inspect_err(|e| {
            warn!("Failed to load events: {}", e);
        })?;

        let decorated: Vec<Event> = events.into_iter().map(|e| self.images.decorate(e)).collect();
        debug!("Loaded {} events", decorated.len());
        self.state.write().events = decorated;
        Ok(())
    }

    pub async fn load_bookings(&self) -> Result<(), ClientError> {
        let rows = self.guarded(self.api.list_bookings()).await.inspect_err(|e| {
            warn!("Failed to load bookings: {}", e);
        })?;

        let bookings = normalize_bookings(&rows);
        debug!("Loaded {} bookings", bookings.len());
        self.state.write().bookings = bookings;
        Ok(())
    }

    /// Without a signed-in user favorites are cleared and nothing is sent.
    pub async fn load_favorites(&self) -> Result<(), ClientError> {
        let generation = self.auth.generation();
        let Some(user) = self.auth.current_user() else {
            self.state.write().favorites.clear();
            return Ok(());
        };

        let favorites = self.guarded(self.api.list_favorites(user.id)).await.inspect_err(|e| {
            warn!("Failed to load favorites for user {}: {}", user.id, e);
        })?;

        if self.auth.generation() != generation {
            debug!("Dropping favorites loaded for previous user {}", user.id);
            return Ok(());
        }

        let decorated: Vec<Event> = favorites.into_iter().map(|e| self.images.decorate(e)).collect();
        debug!("Loaded {} favorites for user {}", decorated.len(), user.id);
        self.state.write().favorites = decorated;
        Ok(())
    }

    /// Submits the booking, then reloads the list from the server whether
    /// or not the submit succeeded. Returns the submit's outcome first.
    pub async fn add_booking(&self, booking: NewBooking) -> Result<(), ClientError> {
        booking.validate()?;

        let submitted = self.guarded(self.api.add_booking(&booking)).await;
        match &submitted {
            Ok(()) => info!("Booked {:?} for {}", booking.event_name, booking.name),
            Err(e) => warn!("Failed to add booking for {:?}: {}", booking.event_name, e),
        }

        let reloaded = self.load_bookings().await;
        submitted.and(reloaded)
    }

    /// Removes the booking shown at `index`.
    ///
    /// The index is resolved to the booking's id before the request is
    /// sent, and on success the entry with that id is removed, wherever a
    /// reload may have moved it meanwhile. Returns the removed id, or
    /// `None` when `index` is out of range.
    pub async fn remove_booking(&self, index: usize) -> Result<Option<i64>, ClientError> {
        let Some(booking) = self.state.read().bookings.get(index).cloned() else {
            return Ok(None);
        };
        let booking_id = booking
            .id
            .ok_or_else(|| ClientError::Validation("booking has no id".into()))?;

        self.guarded(self.api.delete_booking(booking_id)).await.inspect_err(|e| {
            warn!("Failed to delete booking {}: {}", booking_id, e);
        })?;

        self.state.write().bookings.retain(|b| b.id != Some(booking_id));
        info!("Removed booking {}", booking_id);
        Ok(Some(booking_id))
    }

    pub async fn toggle_favorite(&self, event: &Event) -> Result<ToggleOutcome, ClientError> {
        let generation = self.auth.generation();
        let Some(user) = self.auth.current_user() else {
            return Ok(ToggleOutcome::SignedOut);
        };

        let present = {
            let mut pending = self.pending_favorites.lock();
            if pending.contains_key(&event.id) {
                debug!("Toggle for event {} already in flight", event.id);
                return Ok(ToggleOutcome::InFlight);
            }
            let present = self.is_favorite(event.id);
            let next = if present { FavoriteState::PendingRemove } else { FavoriteState::PendingAdd };
            pending.insert(event.id, next);
            present
        };
        let _pending = PendingToggle {
            pending: &self.pending_favorites,
            event_id: event.id,
        };

        let result = if present {
            self.guarded(self.api.delete_favorite(user.id, event.id)).await
        } else {
            self.guarded(self.api.add_favorite(user.id, event.id)).await
        };

        if let Err(e) = result {
            warn!("Failed to toggle favorite {} for user {}: {}", event.id, user.id, e);
            return Err(e);
        }

        if self.auth.generation() != generation {
            debug!("Identity changed while toggling favorite {}", event.id);
            return Ok(ToggleOutcome::Stale);
        }

        let mut state = self.state.write();
        if present {
            state.favorites.retain(|f| f.id != event.id);
            Ok(ToggleOutcome::Removed)
        } else {
            if !state.favorites.iter().any(|f| f.id == event.id) {
                state.favorites.push(self.images.decorate(event.clone()));
            }
            Ok(ToggleOutcome::Added)
        }
    }

    pub async fn load_suggestions(&self) -> Result<(), ClientError> {
        let suggestions = self.guarded(self.api.list_suggestions()).await.inspect_err(|e| {
            warn!("Failed to load suggestions: {}", e);
        })?;
        self.state.write().suggestions = suggestions;
        Ok(())
    }

    /// Submits, then reloads the list on success.
    pub async fn submit_suggestion(&self, suggestion: NewSuggestion) -> Result<(), ClientError> {
        suggestion.validate()?;
        self.guarded(self.api.add_suggestion(&suggestion)).await.inspect_err(|e| {
            warn!("Failed to submit suggestion {:?}: {}", suggestion.place, e);
        })?;
        self.load_suggestions().await
    }

    pub async fn remove_suggestion(&self, suggestion_id: i64) -> Result<(), ClientError> {
        self.guarded(self.api.delete_suggestion(suggestion_id)).await.inspect_err(|e| {
            warn!("Failed to delete suggestion {}: {}", suggestion_id, e);
        })?;
        self.state.write().suggestions.retain(|s| s.id != suggestion_id);
        Ok(())
    }

    pub async fn cities(&self) -> Result<Vec<City>, ClientError> {
        self.guarded(self.api.list_cities()).await
    }

    pub async fn places(&self, city_id: i64) -> Result<Vec<Place>, ClientError> {
        self.guarded(self.api.list_places(city_id)).await
    }

    /// Reloads favorites every time the signed-in identity changes, until
    /// [`TourismSync::shutdown`].
    pub fn spawn_identity_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let sync = Arc::clone(self);
        let mut identity = self.auth.subscribe();
        let shutdown = self.shutdown.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = identity.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if let Err(e) = sync.load_favorites().await {
                            warn!("Favorites reload after identity change failed: {}", e);
                        }
                    }
                    _ = wait_for_shutdown(shutdown.clone()) => break,
                }
            }
            debug!("Identity watcher stopped");
        })
    }

    /// In-flight calls stop applying results; later calls fail with
    /// [`ClientError::Cancelled`].
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        info!("Sync layer shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    async fn guarded<T, F>(&self, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if self.is_shut_down() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = wait_for_shutdown(self.shutdown.subscribe()) => Err(ClientError::Cancelled),
            result = request => result,
        }
    }
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    loop {
        let stopped = *shutdown.borrow_and_update();
        if stopped {
            return;
        }
        if shutdown.changed().await.is_err() {
            // Sender gone: the sync layer itself was dropped.
            std::future::pending::<()>().await;
        }
    }
}
