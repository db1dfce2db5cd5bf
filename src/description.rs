use crate::model::{Duty, DutyKind, FlightLeg};
use crate::time::{time_lt, time_z};
use chrono_tz::Tz;

/// Permet de customiser le texte de la DESCRIPTION (une entrée par ligne).
pub trait DescriptionRenderer {
    fn render(&self, duty: &Duty, local_tz: Tz) -> Vec<String>;
}

/// Rendu par défaut : heures UTC (`z`) et locales (`LT`) côte à côte.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrewDescription;

impl DescriptionRenderer for CrewDescription {
    fn render(&self, duty: &Duty, local_tz: Tz) -> Vec<String> {
        let check_in = format!("{} ({})", time_z(duty.start), time_lt(duty.start, local_tz));
        let check_out = format!("{} ({})", time_z(duty.end), time_lt(duty.end, local_tz));

        match &duty.kind {
            DutyKind::Flight { legs } | DutyKind::Deadhead { legs } => {
                let mut lines = Vec::with_capacity(legs.len() + 2);
                lines.push(format!("CHECK-IN {check_in}"));
                lines.extend(legs.iter().map(flight_line));
                lines.push(format!("CHECK-OUT {check_out}"));
                lines
            }
            DutyKind::Standby { location } => {
                let mut lines = vec![
                    "Standby (HSBY)".to_string(),
                    format!(
                        "{} – {} ({} – {})",
                        time_z(duty.start),
                        time_z(duty.end),
                        time_lt(duty.start, local_tz),
                        time_lt(duty.end, local_tz)
                    ),
                ];
                if let Some(loc) = location {
                    lines.push(format!("Location: {loc}"));
                }
                lines
            }
            DutyKind::AnnualLeave => vec!["Annual leave".to_string()],
            DutyKind::Other { activities } => {
                let mut lines = Vec::with_capacity(activities.len() + 3);
                lines.push(format!("Duty: {}", duty.duty_type));
                lines.push(format!("CHECK-IN {check_in}"));
                lines.extend(activities.iter().map(|a| {
                    format!(
                        "{} {} -> {} {}",
                        a.start_place,
                        time_z(a.start),
                        a.end_place,
                        time_z(a.end)
                    )
                }));
                lines.push(format!("CHECK-OUT {check_out}"));
                lines
            }
        }
    }
}

fn flight_line(leg: &FlightLeg) -> String {
    format!(
        "{} {} {} {} {}",
        leg.flight_number,
        leg.departure_airport,
        time_z(leg.departure),
        leg.arrival_airport,
        time_z(leg.arrival)
    )
}
