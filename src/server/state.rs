//! Server shared state
//!
//! Holds configuration, the pin board and the lookup services.

use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{get_geocoder, GeoBackend};
use crate::lookup::{chain_from_config, DefaultLookupChain, PinResolver};
use crate::pin::{LocationPin, PinBoard, PinRole};
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Shared state for the HTTP server
pub struct AppState<G = NominatimBackend, R = DefaultLookupChain> {
    /// Configuration
    pub config: Config,

    board: RwLock<PinBoard>,
    geocoder: G,
    resolver: Option<R>,
    started: Instant,
}

impl AppState {
    /// Create state wired to the real services
    ///
    /// Without an OpenWeather key the server still runs; pins just keep
    /// their name and coordinates.
    pub fn from_config(config: Config) -> Result<Self> {
        let resolver = match chain_from_config(&config) {
            Ok(chain) => Some(chain),
            Err(e) => {
                warn!("Lookups disabled: {}", e);
                None
            }
        };
        Ok(Self::new(config, get_geocoder()?, resolver))
    }
}

impl<G: GeoBackend, R: PinResolver> AppState<G, R> {
    /// Create application state from explicit services
    pub fn new(config: Config, geocoder: G, resolver: Option<R>) -> Self {
        Self {
            config,
            board: RwLock::new(PinBoard::new()),
            geocoder,
            resolver,
            started: Instant::now(),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn resolver(&self) -> Option<&R> {
        self.resolver.as_ref()
    }

    /// Whether country/currency/weather lookups are available
    pub fn lookups_enabled(&self) -> bool {
        self.resolver.is_some()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// A copy of the current board
    pub async fn board(&self) -> PinBoard {
        self.board.read().await.clone()
    }

    /// Place a pin and resolve its attributes
    ///
    /// The board lock is not held during lookups. If the slot was replaced
    /// or cleared meanwhile, the results are dropped. Returns whatever the
    /// slot holds afterwards.
    pub async fn place(&self, role: PinRole, pin: LocationPin) -> Option<LocationPin> {
        let coords = pin.coords;
        let revision = self.board.write().await.place(role, pin);

        if let Some(resolver) = &self.resolver {
            let details = resolver.resolve(coords).await;
            if !self.board.write().await.apply_details(role, revision, details) {
                debug!("Discarding stale lookup for {} pin (revision {})", role, revision);
            }
        }

        self.board.read().await.get(role).cloned()
    }

    /// Remove a pin
    pub async fn clear(&self, role: PinRole) -> Option<LocationPin> {
        self.board.write().await.clear(role)
    }
}
