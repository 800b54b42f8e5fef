use std::collections::HashMap;
use crate::client::models::Event;

/// Bundled artwork keyed by event id, preferred over the server's image.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    assets: HashMap<i64, String>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artwork shipped for the seeded events.
    pub fn lebanon_defaults() -> Self {
        Self::new()
            .with_asset(1, "assets/events/beirutmarathon.jpg")
            .with_asset(2, "assets/events/coastalride.jpg")
            .with_asset(3, "assets/events/tyresunset.jpg")
            .with_asset(4, "assets/events/baalbekfestival.jpg")
    }

    pub fn with_asset(mut self, event_id: i64, asset: impl Into<String>) -> Self {
        self.assets.insert(event_id, asset.into());
        self
    }

    pub fn asset_for(&self, event_id: i64) -> Option<&str> {
        self.assets.get(&event_id).map(String::as_str)
    }

    pub fn decorate(&self, mut event: Event) -> Event {
        if let Some(asset) = self.asset_for(event.id) {
            event.image = Some(asset.to_string());
        }
        event
    }
}
