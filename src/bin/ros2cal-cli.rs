#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ros2cal::{
    io,
    storage::{JsonRosterFile, RosterSource},
    CalendarConfig, StampPolicy, DEFAULT_CALENDAR_NAME, DEFAULT_LOCAL_TZ,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Conversion d'un planning d'équipage JSON en fichier ICS
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du planning (`{"events": [...]}`)
    #[arg(long, global = true, default_value = "roster.json")]
    input: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convertir le planning en ICS
    Convert {
        /// Fichier ICS de sortie (défaut : <input>.ics)
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_CALENDAR_NAME)]
        calendar_name: String,
        /// Fuseau IANA pour les heures locales de la description
        #[arg(long, default_value = DEFAULT_LOCAL_TZ)]
        local_tz: String,
        /// DTSTAMP imposé (RFC3339) pour une sortie reproductible
        #[arg(long)]
        stamp: Option<String>,
    },

    /// Lister les événements et optionnellement exporter en CSV
    List {
        #[arg(long)]
        out_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    match cli.cmd {
        Commands::Convert {
            output,
            calendar_name,
            local_tz,
            stamp,
        } => {
            let mut config = CalendarConfig::new(calendar_name, local_tz);
            if let Some(raw) = stamp {
                let at: DateTime<Utc> = raw.parse().context("stamp RFC3339")?;
                config = config.with_stamp(StampPolicy::Fixed(at));
            }
            let path = io::convert_file(&cli.input, output, &config)?;
            println!("ICS saved to: {}", path.display());
        }
        Commands::List { out_csv } => {
            let record = JsonRosterFile::open(&cli.input)?.load()?;
            if let Some(path) = out_csv {
                io::export_events_csv(path, &record)?;
            }
            for ev in &record.events {
                println!(
                    "{} | {} → {} | {}",
                    ev.uid(),
                    ev.start_utc.as_deref().unwrap_or("-"),
                    ev.end_utc.as_deref().unwrap_or("-"),
                    if ev.is_all_day() { "all-day" } else { "timed" }
                );
            }
        }
    }

    Ok(())
}
