#![forbid(unsafe_code)]
//! ros2cal — conversion d'un planning d'équipage (JSON) en calendrier ICS.
//!
//! - Un VEVENT par service, dans l'ordre d'entrée.
//! - UID déterministe `<duty_type>|<start_utc>|<end_utc>` (ré-import sans doublon).
//! - Horaires en UTC ; heure locale affichée dans la description uniquement.
//! - Le cœur (encodeur + assembleur) ne fait ni I/O ni log.

pub mod calendar;
pub mod config;
pub mod description;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod io;
pub mod model;
pub mod storage;
pub mod time;

pub use calendar::{roster_to_ics, CalendarAssembler};
pub use config::{CalendarConfig, StampPolicy, DEFAULT_CALENDAR_NAME, DEFAULT_LOCAL_TZ};
pub use description::{CrewDescription, DescriptionRenderer};
pub use encoder::{color_for, CalendarEntry, EntryTiming, EventEncoder};
pub use error::IcsError;
pub use escape::{escape_text, unescape_text};
pub use model::{
    ActivitySegment, Duty, DutyEvent, DutyKind, FlightSegment, RosterRecord,
};
pub use storage::{JsonRosterFile, RosterSource};
