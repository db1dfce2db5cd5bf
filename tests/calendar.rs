#![forbid(unsafe_code)]
use chrono::{TimeZone, Utc};
use ros2cal::{
    roster_to_ics, CalendarAssembler, CalendarConfig, DutyEvent, IcsError, RosterRecord,
    StampPolicy,
};

fn fixed_config() -> CalendarConfig {
    CalendarConfig::new("Crew", "Europe/Berlin").with_stamp(StampPolicy::Fixed(
        Utc.with_ymd_and_hms(2024, 2, 20, 10, 0, 0).unwrap(),
    ))
}

fn sample_record() -> RosterRecord {
    serde_json::from_str(
        r#"{
            "events": [
                {
                    "duty_type": "DH",
                    "start_utc": "2024-03-05T06:00:00Z",
                    "end_utc": "2024-03-05T09:15:00Z",
                    "flights": [
                        {"flight_number": "LH2030", "departure_airport": "FRA",
                         "arrival_airport": null,
                         "departure_time_utc": "2024-03-05T07:00:00Z",
                         "arrival_time_utc": "2024-03-05T08:15:00Z"}
                    ]
                },
                {
                    "duty_type": "A/L",
                    "start_utc": "2024-03-06T00:00:00Z",
                    "end_utc": "2024-03-08T00:00:00Z"
                }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn empty_roster_is_header_and_footer_only() {
    let record: RosterRecord = serde_json::from_str(r#"{"events": []}"#).unwrap();
    let ics = roster_to_ics(&record, &CalendarConfig::default()).unwrap();
    assert_eq!(
        ics,
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Roster//RosterToICS//EN\r\n\
         CALSCALE:GREGORIAN\r\nMETHOD:PUBLISH\r\nEND:VCALENDAR"
    );
}

#[test]
fn missing_events_field_is_empty() {
    let record: RosterRecord = serde_json::from_str("{}").unwrap();
    let ics = roster_to_ics(&record, &CalendarConfig::default()).unwrap();
    assert!(!ics.contains("BEGIN:VEVENT"));
    assert!(ics.ends_with("\r\nEND:VCALENDAR"));
}

#[test]
fn full_document_snapshot() {
    let ics = roster_to_ics(&sample_record(), &fixed_config()).unwrap();
    assert!(!ics.replace("\r\n", "").contains('\n'));
    insta::assert_snapshot!(ics.replace("\r\n", "\n"), @r###"
BEGIN:VCALENDAR
VERSION:2.0
PRODID:-//Crew//RosterToICS//EN
CALSCALE:GREGORIAN
METHOD:PUBLISH
BEGIN:VEVENT
UID:DH|2024-03-05T06:00:00Z|2024-03-05T09:15:00Z
DTSTAMP:20240220T100000Z
DTSTART:20240305T060000Z
DTEND:20240305T091500Z
SUMMARY:DH
DESCRIPTION:CHECK-IN 06:00z (07:00 LT)\nLH2030 FRA 07:00z ??? 08:15z\nCHECK-OUT 09:15z (10:15 LT)
COLOR:#DB4437
END:VEVENT
BEGIN:VEVENT
UID:A/L|2024-03-06T00:00:00Z|2024-03-08T00:00:00Z
DTSTAMP:20240220T100000Z
DTSTART;VALUE=DATE:20240306
DTEND;VALUE=DATE:20240307
SUMMARY:A/L
DESCRIPTION:Annual leave
COLOR:#0F9D58
END:VEVENT
END:VCALENDAR
"###);
}

#[test]
fn entries_keep_input_order_without_dedup() {
    let a = DutyEvent::new("GROUND", "2024-03-09T05:00:00Z", "2024-03-09T06:00:00Z");
    let b = DutyEvent::new("GROUND", "2024-03-01T05:00:00Z", "2024-03-01T06:00:00Z");
    let assembler = CalendarAssembler::new(&fixed_config()).unwrap();
    let ics = assembler.assemble(&[a.clone(), b, a]).unwrap();

    let uids: Vec<&str> = ics
        .split("\r\n")
        .filter_map(|l| l.strip_prefix("UID:"))
        .collect();
    assert_eq!(
        uids,
        vec![
            "GROUND|2024-03-09T05:00:00Z|2024-03-09T06:00:00Z",
            "GROUND|2024-03-01T05:00:00Z|2024-03-01T06:00:00Z",
            "GROUND|2024-03-09T05:00:00Z|2024-03-09T06:00:00Z",
        ]
    );
}

#[test]
fn fixed_stamp_is_reproducible() {
    let config = fixed_config();
    let first = roster_to_ics(&sample_record(), &config).unwrap();
    let second = roster_to_ics(&sample_record(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_stamp_is_identical_across_entries() {
    let config = CalendarConfig::default().with_stamp(StampPolicy::Shared);
    let ics = roster_to_ics(&sample_record(), &config).unwrap();
    let stamps: Vec<&str> = ics
        .split("\r\n")
        .filter_map(|l| l.strip_prefix("DTSTAMP:"))
        .collect();
    assert_eq!(stamps.len(), 2);
    assert_eq!(stamps[0], stamps[1]);
}

#[test]
fn per_entry_stamp_is_compact_utc() {
    let ics = roster_to_ics(&sample_record(), &CalendarConfig::default()).unwrap();
    for stamp in ics.split("\r\n").filter_map(|l| l.strip_prefix("DTSTAMP:")) {
        assert_eq!(stamp.len(), 16);
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[8..9], "T");
    }
}

#[test]
fn unknown_zone_fails_before_encoding() {
    let config = CalendarConfig::new("Roster", "Mars/Olympus_Mons");
    let err = CalendarAssembler::new(&config).unwrap_err();
    assert_eq!(err, IcsError::UnknownZone("Mars/Olympus_Mons".into()));

    let empty = RosterRecord::default();
    assert!(matches!(
        roster_to_ics(&empty, &config),
        Err(IcsError::UnknownZone(_))
    ));
}

#[test]
fn malformed_event_aborts_document() {
    let mut record = sample_record();
    record.events.push(DutyEvent {
        end_utc: Some("not a date".into()),
        ..DutyEvent::new("FLIGHT", "2024-03-10T05:00:00Z", "")
    });
    let err = roster_to_ics(&record, &fixed_config()).unwrap_err();
    assert!(matches!(err, IcsError::MalformedInput { ref field, .. } if field == "end_utc"));
}

#[test]
fn config_defaults_from_json() {
    let config: CalendarConfig = serde_json::from_str(r#"{"calendar_name": "OPS"}"#).unwrap();
    assert_eq!(config.calendar_name, "OPS");
    assert_eq!(config.local_tz, "Europe/Berlin");
    assert_eq!(config.stamp, StampPolicy::PerEntry);
}
