use crate::config::{CalendarConfig, StampPolicy};
use crate::description::{CrewDescription, DescriptionRenderer};
use crate::encoder::EventEncoder;
use crate::error::Result;
use crate::model::{DutyEvent, RosterRecord};
use chrono::Utc;

const CRLF: &str = "\r\n";

/// Assembleur : en-tête fixe, un VEVENT par événement (ordre d'entrée), pied.
#[derive(Debug, Clone)]
pub struct CalendarAssembler<R = CrewDescription> {
    calendar_name: String,
    stamp: StampPolicy,
    encoder: EventEncoder<R>,
}

impl CalendarAssembler<CrewDescription> {
    /// Échoue immédiatement (`UnknownZone`) si le fuseau est inconnu.
    pub fn new(config: &CalendarConfig) -> Result<Self> {
        let zone = config.zone()?;
        Ok(Self::with_encoder(config, EventEncoder::new(zone)))
    }
}

impl<R: DescriptionRenderer> CalendarAssembler<R> {
    pub fn with_encoder(config: &CalendarConfig, encoder: EventEncoder<R>) -> Self {
        Self {
            calendar_name: config.calendar_name.clone(),
            stamp: config.stamp,
            encoder,
        }
    }

    pub fn encoder(&self) -> &EventEncoder<R> {
        &self.encoder
    }

    pub fn header(&self) -> [String; 5] {
        [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:-//{}//RosterToICS//EN", self.calendar_name),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
        ]
    }

    /// Produit le document complet. La première erreur d'événement interrompt tout.
    pub fn assemble(&self, events: &[DutyEvent]) -> Result<String> {
        let shared = match self.stamp {
            StampPolicy::PerEntry => None,
            StampPolicy::Shared => Some(Utc::now()),
            StampPolicy::Fixed(at) => Some(at),
        };

        let mut parts: Vec<String> = self.header().into_iter().collect();
        parts.reserve(events.len() + 1);
        for event in events {
            let block = match shared {
                Some(at) => self.encoder.encode_at(event, at)?,
                None => self.encoder.encode(event)?,
            };
            parts.push(block);
        }
        parts.push("END:VCALENDAR".to_string());
        Ok(parts.join(CRLF))
    }

    pub fn assemble_record(&self, record: &RosterRecord) -> Result<String> {
        self.assemble(&record.events)
    }
}

/// Raccourci : configuration + planning → document ICS.
pub fn roster_to_ics(record: &RosterRecord, config: &CalendarConfig) -> Result<String> {
    CalendarAssembler::new(config)?.assemble_record(record)
}
