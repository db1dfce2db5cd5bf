use crate::description::{CrewDescription, DescriptionRenderer};
use crate::error::{IcsError, Result};
use crate::escape::escape_text;
use crate::model::{DutyEvent, ANNUAL_LEAVE, DEADHEAD, FLIGHT, STANDBY};
use crate::time::{ics_date, ics_datetime};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Couleur associée à chaque type de service connu.
pub const COLOR_MAP: &[(&str, &str)] = &[
    (FLIGHT, "#4285F4"),
    (DEADHEAD, "#DB4437"),
    (STANDBY, "#F4B400"),
    (ANNUAL_LEAVE, "#0F9D58"),
];

pub fn color_for(duty_type: &str) -> Option<&'static str> {
    COLOR_MAP
        .iter()
        .find(|(tag, _)| *tag == duty_type)
        .map(|(_, color)| *color)
}

/// Bornes d'une entrée : instants UTC, ou journée entière `[start, end)`, `end = start + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTiming {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    AllDay {
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Entrée de calendrier (VEVENT) avant sérialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: String,
    pub stamp: DateTime<Utc>,
    pub timing: EntryTiming,
    pub summary: String,
    pub description: Vec<String>,
    pub color: Option<&'static str>,
}

impl CalendarEntry {
    /// Lignes de contenu, de `BEGIN:VEVENT` à `END:VEVENT`.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", ics_datetime(self.stamp)),
        ];
        match self.timing {
            EntryTiming::AllDay { start, end } => {
                lines.push(format!("DTSTART;VALUE=DATE:{}", ics_date(start)));
                lines.push(format!("DTEND;VALUE=DATE:{}", ics_date(end)));
            }
            EntryTiming::Timed { start, end } => {
                lines.push(format!("DTSTART:{}", ics_datetime(start)));
                lines.push(format!("DTEND:{}", ics_datetime(end)));
            }
        }
        lines.push(format!("SUMMARY:{}", escape_text(&self.summary)));
        lines.push(format!(
            "DESCRIPTION:{}",
            escape_text(&self.description.join("\n"))
        ));
        if let Some(color) = self.color {
            lines.push(format!("COLOR:{color}"));
        }
        lines.push("END:VEVENT".to_string());
        lines
    }

    /// Bloc VEVENT, lignes séparées par CRLF (sans CRLF final).
    pub fn to_ics(&self) -> String {
        self.to_lines().join("\r\n")
    }
}

/// Encodeur d'un événement de service vers un bloc VEVENT.
#[derive(Debug, Clone)]
pub struct EventEncoder<R = CrewDescription> {
    local_tz: Tz,
    renderer: R,
}

impl EventEncoder<CrewDescription> {
    pub fn new(local_tz: Tz) -> Self {
        Self {
            local_tz,
            renderer: CrewDescription,
        }
    }
}

impl<R: DescriptionRenderer> EventEncoder<R> {
    pub fn with_renderer(local_tz: Tz, renderer: R) -> Self {
        Self { local_tz, renderer }
    }

    pub fn local_tz(&self) -> Tz {
        self.local_tz
    }

    /// Construit l'entrée structurée avec un DTSTAMP imposé.
    pub fn entry_at(&self, event: &DutyEvent, stamp: DateTime<Utc>) -> Result<CalendarEntry> {
        let duty = event.classify()?;
        let timing = if duty.all_day {
            let start = duty.start.date_naive();
            let end = start
                .succ_opt()
                .ok_or_else(|| IcsError::out_of_range("start_utc"))?;
            EntryTiming::AllDay { start, end }
        } else {
            EntryTiming::Timed {
                start: duty.start,
                end: duty.end,
            }
        };
        let description = self.renderer.render(&duty, self.local_tz);
        Ok(CalendarEntry {
            color: color_for(&duty.duty_type),
            uid: duty.uid,
            stamp,
            timing,
            summary: duty.duty_type,
            description,
        })
    }

    /// Encode avec l'instant courant comme DTSTAMP.
    pub fn encode(&self, event: &DutyEvent) -> Result<String> {
        self.encode_at(event, Utc::now())
    }

    pub fn encode_at(&self, event: &DutyEvent, stamp: DateTime<Utc>) -> Result<String> {
        Ok(self.entry_at(event, stamp)?.to_ics())
    }
}
