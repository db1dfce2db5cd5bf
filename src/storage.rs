use crate::model::RosterRecord;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait RosterSource {
    /// Charge le planning extrait.
    fn load(&self) -> anyhow::Result<RosterRecord>;
}

/// Planning JSON sur disque (`{"events": [...]}`).
pub struct JsonRosterFile {
    path: PathBuf,
}

impl JsonRosterFile {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterSource for JsonRosterFile {
    fn load(&self) -> anyhow::Result<RosterRecord> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let record: RosterRecord = serde_json::from_slice(&data)
            .with_context(|| format!("parsing roster {}", self.path.display()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), events = record.events.len(), "roster loaded");
        Ok(record)
    }
}

/// Écrit le document de manière atomique (fichier temporaire + rename).
pub fn write_ics_atomic<P: AsRef<Path>>(path: P, content: &str) -> anyhow::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
    tmp.write_all(content.as_bytes())
        .with_context(|| "writing ics")?;
    tmp.flush().with_context(|| "flushing ics")?;
    tmp.as_file().sync_all().with_context(|| "syncing ics")?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    #[cfg(feature = "logging")]
    tracing::info!(path = %path.display(), bytes = content.len(), "ics written");
    Ok(())
}
