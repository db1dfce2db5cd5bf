use crate::calendar::roster_to_ics;
use crate::config::CalendarConfig;
use crate::model::RosterRecord;
use crate::storage::{write_ics_atomic, JsonRosterFile, RosterSource};
use anyhow::Context;
use csv::WriterBuilder;
use std::path::{Path, PathBuf};

/// Chemin ICS par défaut : même nom que l'entrée, extension `.ics`.
pub fn default_ics_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension("ics")
}

/// JSON → ICS sur disque. Renvoie le chemin écrit.
pub fn convert_file<P: AsRef<Path>>(
    input: P,
    output: Option<PathBuf>,
    config: &CalendarConfig,
) -> anyhow::Result<PathBuf> {
    let input = input.as_ref();
    let record = JsonRosterFile::open(input)?.load()?;
    let ics = roster_to_ics(&record, config)
        .with_context(|| format!("converting {}", input.display()))?;
    let output = output.unwrap_or_else(|| default_ics_path(input));
    write_ics_atomic(&output, &ics)?;
    Ok(output)
}

/// Export CSV des événements: header `uid,duty_type,start_utc,end_utc,all_day`
pub fn export_events_csv<P: AsRef<Path>>(path: P, record: &RosterRecord) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["uid", "duty_type", "start_utc", "end_utc", "all_day"])?;
    for ev in &record.events {
        let uid = ev.uid();
        let all_day = if ev.is_all_day() { "true" } else { "false" };
        w.write_record([
            uid.as_str(),
            ev.duty_type.as_str(),
            ev.start_utc.as_deref().unwrap_or(""),
            ev.end_utc.as_deref().unwrap_or(""),
            all_day,
        ])?;
    }
    w.flush()?;
    Ok(())
}
