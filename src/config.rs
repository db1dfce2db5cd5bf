use crate::error::{IcsError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CALENDAR_NAME: &str = "Roster";
pub const DEFAULT_LOCAL_TZ: &str = "Europe/Berlin";

/// Choix du DTSTAMP des entrées d'un même document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StampPolicy {
    /// Chaque entrée lit l'horloge au moment de son encodage.
    #[default]
    PerEntry,
    /// Un seul instant, lu au début de l'assemblage.
    Shared,
    /// Instant imposé : sortie entièrement reproductible.
    Fixed(DateTime<Utc>),
}

/// Paramètres du calendrier produit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub calendar_name: String,
    /// Nom IANA, ex. `Europe/Berlin`.
    pub local_tz: String,
    pub stamp: StampPolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            local_tz: DEFAULT_LOCAL_TZ.to_string(),
            stamp: StampPolicy::PerEntry,
        }
    }
}

impl CalendarConfig {
    pub fn new<N: Into<String>, Z: Into<String>>(calendar_name: N, local_tz: Z) -> Self {
        Self {
            calendar_name: calendar_name.into(),
            local_tz: local_tz.into(),
            stamp: StampPolicy::PerEntry,
        }
    }

    pub fn with_stamp(mut self, stamp: StampPolicy) -> Self {
        self.stamp = stamp;
        self
    }

    /// Résout le fuseau local configuré.
    pub fn zone(&self) -> Result<Tz> {
        resolve_zone(&self.local_tz)
    }
}

pub fn resolve_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| IcsError::UnknownZone(name.to_string()))
}
