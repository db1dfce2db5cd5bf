use crate::error::{IcsError, Result};
use crate::time::parse_utc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const FLIGHT: &str = "FLIGHT";
pub const DEADHEAD: &str = "DH";
pub const STANDBY: &str = "HSBY";
pub const ANNUAL_LEAVE: &str = "A/L";

/// Étiquette retenue quand `duty_type` est absent.
pub const DEFAULT_DUTY_TYPE: &str = "DUTY";
pub const UNKNOWN_FLIGHT: &str = "UNKNOWN";
pub const UNKNOWN_PLACE: &str = "???";

/// Planning extrait (sortie du collaborateur OCR/extraction).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<DutyEvent>,
}

/// Événement de service brut, tel que reçu.
///
/// Les horodatages restent en texte : l'UID les reprend tels quels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyEvent {
    #[serde(default = "default_duty_type", deserialize_with = "null_as_duty_type")]
    pub duty_type: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub flights: Vec<FlightSegment>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<ActivitySegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSegment {
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub departure_airport: Option<String>,
    #[serde(default)]
    pub arrival_airport: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub departure_time_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub arrival_time_utc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySegment {
    #[serde(default)]
    pub start_place: Option<String>,
    #[serde(default)]
    pub end_place: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_time_utc: Option<String>,
}

fn default_duty_type() -> String {
    DEFAULT_DUTY_TYPE.to_string()
}

fn null_as_duty_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_duty_type))
}

/// Garde toute valeur JSON non nulle sous forme de texte : une valeur qui
/// n'est pas une chaîne échoue plus tard en `MalformedInput`, pas au chargement.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DutyEvent {
    pub fn new<D, S, E>(duty_type: D, start_utc: S, end_utc: E) -> Self
    where
        D: Into<String>,
        S: Into<String>,
        E: Into<String>,
    {
        Self {
            duty_type: duty_type.into(),
            start_utc: Some(start_utc.into()),
            end_utc: Some(end_utc.into()),
            is_all_day: None,
            location: None,
            flights: Vec::new(),
            activities: Vec::new(),
        }
    }

    /// Identifiant stable `<duty_type>|<start_utc>|<end_utc>` (texte d'origine).
    pub fn uid(&self) -> String {
        format!(
            "{}|{}|{}",
            self.duty_type,
            self.start_utc.as_deref().unwrap_or_default(),
            self.end_utc.as_deref().unwrap_or_default()
        )
    }

    /// `A/L` est toujours sur la journée entière, quel que soit le drapeau.
    pub fn is_all_day(&self) -> bool {
        self.is_all_day.unwrap_or(false) || self.duty_type == ANNUAL_LEAVE
    }

    /// Valide l'événement et produit sa vue typée.
    pub fn classify(&self) -> Result<Duty> {
        let start = required_instant("start_utc", self.start_utc.as_deref())?;
        let end = required_instant("end_utc", self.end_utc.as_deref())?;

        let kind = match self.duty_type.as_str() {
            FLIGHT => DutyKind::Flight {
                legs: self.flight_legs()?,
            },
            DEADHEAD => DutyKind::Deadhead {
                legs: self.flight_legs()?,
            },
            STANDBY => DutyKind::Standby {
                location: non_empty(self.location.as_deref()).map(str::to_owned),
            },
            ANNUAL_LEAVE => DutyKind::AnnualLeave,
            _ => DutyKind::Other {
                activities: self.activity_legs()?,
            },
        };

        Ok(Duty {
            duty_type: self.duty_type.clone(),
            uid: self.uid(),
            start,
            end,
            all_day: self.is_all_day(),
            kind,
        })
    }

    fn flight_legs(&self) -> Result<Vec<FlightLeg>> {
        self.flights
            .iter()
            .enumerate()
            .map(|(i, f)| {
                Ok(FlightLeg {
                    flight_number: or_placeholder(f.flight_number.as_deref(), UNKNOWN_FLIGHT),
                    departure_airport: or_placeholder(f.departure_airport.as_deref(), UNKNOWN_PLACE),
                    arrival_airport: or_placeholder(f.arrival_airport.as_deref(), UNKNOWN_PLACE),
                    departure: required_instant(
                        &format!("flights[{i}].departure_time_utc"),
                        f.departure_time_utc.as_deref(),
                    )?,
                    arrival: required_instant(
                        &format!("flights[{i}].arrival_time_utc"),
                        f.arrival_time_utc.as_deref(),
                    )?,
                })
            })
            .collect()
    }

    fn activity_legs(&self) -> Result<Vec<ActivityLeg>> {
        self.activities
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Ok(ActivityLeg {
                    start_place: or_placeholder(a.start_place.as_deref(), UNKNOWN_PLACE),
                    end_place: or_placeholder(a.end_place.as_deref(), UNKNOWN_PLACE),
                    start: required_instant(
                        &format!("activities[{i}].start_time_utc"),
                        a.start_time_utc.as_deref(),
                    )?,
                    end: required_instant(
                        &format!("activities[{i}].end_time_utc"),
                        a.end_time_utc.as_deref(),
                    )?,
                })
            })
            .collect()
    }
}

/// Vue validée d'un [`DutyEvent`] : instants parsés, placeholders appliqués.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duty {
    pub duty_type: String,
    pub uid: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub kind: DutyKind,
}

/// Variante par type de service ; chacune ne porte que ce qu'elle affiche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DutyKind {
    Flight { legs: Vec<FlightLeg> },
    Deadhead { legs: Vec<FlightLeg> },
    Standby { location: Option<String> },
    AnnualLeave,
    Other { activities: Vec<ActivityLeg> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightLeg {
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLeg {
    pub start_place: String,
    pub end_place: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn required_instant(field: &str, raw: Option<&str>) -> Result<DateTime<Utc>> {
    let raw = raw.ok_or_else(|| IcsError::missing(field))?;
    parse_utc(raw).ok_or_else(|| IcsError::unparseable(field, raw))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    non_empty(value).unwrap_or(placeholder).to_string()
}
