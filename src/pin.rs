//! Location pins
//!
//! A pin is a user-selected place plus the attributes the lookup chain
//! derives for it. The board holds at most one pin per role.

use crate::constants::placeholder::{UNKNOWN_CURRENCY, UNKNOWN_SYMBOL};
use crate::coord::{frame_pins, Coordinates, MapFrame};
use crate::geo::GeoLocation;
use crate::lookup::{Currency, PinDetails, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// Which side of the comparison a pin is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinRole {
    Source,
    Target,
}

impl PinRole {
    /// The opposite role
    pub fn other(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }

    /// Marker color used on the map
    pub fn marker_color(self) -> &'static str {
        match self {
            Self::Source => "#d32f2f",
            Self::Target => "#1976d2",
        }
    }
}

impl std::fmt::Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

impl std::str::FromStr for PinRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" | "from" | "a" => Ok(Self::Source),
            "target" | "to" | "b" => Ok(Self::Target),
            _ => Err(format!("Unknown pin role: {}", s)),
        }
    }
}

/// A selected place and its derived attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPin {
    pub coords: Coordinates,
    /// Name shown on the marker (the text the user searched for)
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Emoji flag derived from the country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl LocationPin {
    /// A fresh pin with no derived attributes yet
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            coords,
            name: name.into(),
            country_code: None,
            flag: None,
            currency: None,
            weather: None,
        }
    }

    /// Pin a search result under the name the user typed
    pub fn from_search(query: &str, location: &GeoLocation) -> Self {
        Self::new(query.trim(), location.coords())
    }

    /// Fill in the attributes resolved by the lookup chain
    pub fn apply(&mut self, details: PinDetails) {
        self.flag = details.country_code.as_deref().and_then(country_flag);
        self.country_code = details.country_code;
        self.currency = details.currency;
        self.weather = details.weather;
    }

    /// Builder form of [`LocationPin::apply`]
    pub fn with_details(mut self, details: PinDetails) -> Self {
        self.apply(details);
        self
    }

    /// Currency label, or the unknown placeholder
    pub fn currency_label(&self) -> String {
        match &self.currency {
            Some(currency) => currency.label(),
            None => format!("{} ({})", UNKNOWN_CURRENCY, UNKNOWN_SYMBOL),
        }
    }
}

/// Emoji flag for a two-letter ISO country code
///
/// Each letter maps to its regional indicator symbol. Anything other than
/// two ASCII letters has no flag.
pub fn country_flag(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    code.bytes()
        .map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
        .collect()
}

/// A pin together with the revision it was placed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPin {
    pub revision: u64,
    pub pin: LocationPin,
}

/// The two pin slots of a comparison
///
/// Every placement gets a new revision. Lookup results carry the revision
/// they were started for and are dropped if the slot has moved on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinBoard {
    source: Option<PlacedPin>,
    target: Option<PlacedPin>,
    next_revision: u64,
}

impl PinBoard {
    /// An empty board
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, role: PinRole) -> &Option<PlacedPin> {
        match role {
            PinRole::Source => &self.source,
            PinRole::Target => &self.target,
        }
    }

    fn slot_mut(&mut self, role: PinRole) -> &mut Option<PlacedPin> {
        match role {
            PinRole::Source => &mut self.source,
            PinRole::Target => &mut self.target,
        }
    }

    /// Place a pin, replacing whatever held the role; returns its revision
    pub fn place(&mut self, role: PinRole, pin: LocationPin) -> u64 {
        self.next_revision += 1;
        let revision = self.next_revision;
        *self.slot_mut(role) = Some(PlacedPin { revision, pin });
        revision
    }

    /// Remove the pin for a role, returning it
    pub fn clear(&mut self, role: PinRole) -> Option<LocationPin> {
        self.slot_mut(role).take().map(|placed| placed.pin)
    }

    /// The pin for a role
    pub fn get(&self, role: PinRole) -> Option<&LocationPin> {
        self.slot(role).as_ref().map(|placed| &placed.pin)
    }

    /// The current revision of a role's slot
    pub fn revision(&self, role: PinRole) -> Option<u64> {
        self.slot(role).as_ref().map(|placed| placed.revision)
    }

    /// Apply lookup results if the slot still holds the pin they were
    /// resolved for
    ///
    /// Returns false (and changes nothing) for stale results.
    pub fn apply_details(&mut self, role: PinRole, revision: u64, details: PinDetails) -> bool {
        match self.slot_mut(role) {
            Some(placed) if placed.revision == revision => {
                placed.pin.apply(details);
                true
            }
            _ => false,
        }
    }

    /// Camera framing for the current pins
    pub fn frame(&self) -> MapFrame {
        frame_pins(
            self.get(PinRole::Source).map(|pin| pin.coords),
            self.get(PinRole::Target).map(|pin| pin.coords),
        )
    }
}
