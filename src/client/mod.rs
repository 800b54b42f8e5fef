//! Client side of the tourism API.
//!
//! [`sync::TourismSync`] keeps local copies of events, bookings, favorites
//! and suggestions in step with the server. [`session::AuthSession`] holds
//! the signed-in user in a persisted [`session::SessionStore`]. All network
//! traffic goes through the [`api::TourismApi`] trait, implemented over
//! HTTP by [`api::HttpTourismApi`].

pub mod api;
pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod normalize;
pub mod session;
pub mod sync;

pub use api::{HttpTourismApi, TourismApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::{AuthSession, FileSessionStore, MemorySessionStore, Preferences, SessionStore, Theme};
pub use sync::{FavoriteState, ToggleOutcome, TourismSync};
