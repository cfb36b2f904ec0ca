#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use permanence::io::{export_assignments_json, load_roster};
use permanence::model::Person;
use std::fs;

fn write_roster(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("roster.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn load_roster_parses_people_and_holidays() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_roster(
        &dir,
        r#"{
          "people": [
            {
              "name": "ana",
              "working_day": "Monday",
              "absence_days": ["2025-01-12"],
              "incompatible_with": ["bruno"]
            },
            { "name": "bruno", "working_day": "tue" }
          ],
          "holidays": [
            { "date": "2025-01-08", "people": ["ana", "bruno"] }
          ]
        }"#,
    );

    let (people, holidays) = load_roster(&path).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].working_day, Weekday::Mon);
    assert!(people[0]
        .absence_days
        .contains(&NaiveDate::from_ymd_opt(2025, 1, 12).unwrap()));
    assert!(people[0].incompatible_with.contains("bruno"));
    assert_eq!(people[1].working_day, Weekday::Tue);
    assert_eq!(holidays.len(), 1);
    assert_eq!(holidays[0].people, vec!["ana", "bruno"]);
}

#[test]
fn load_roster_rejects_duplicates_and_bad_fields() {
    let dir = tempfile::tempdir().unwrap();

    let dup = write_roster(
        &dir,
        r#"{ "people": [
            { "name": "ana", "working_day": "monday" },
            { "name": "ana", "working_day": "tuesday" }
        ] }"#,
    );
    let err = load_roster(&dup).unwrap_err();
    assert!(err.to_string().contains("duplicate person name"));

    let bad_day = write_roster(&dir, r#"{ "people": [ { "name": "ana", "working_day": "noday" } ] }"#);
    let err = load_roster(&bad_day).unwrap_err();
    assert!(err.to_string().contains("invalid working_day"));

    let empty = write_roster(&dir, r#"{ "people": [] }"#);
    let err = load_roster(&empty).unwrap_err();
    assert!(err.to_string().contains("no people"));
}

#[test]
fn export_round_trips_through_serde_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("assignments.json");

    let mut person = Person::new("ana", Weekday::Mon);
    person.assign_shift(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    person.assign_shift(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    assert_eq!(
        person.last_shift(),
        NaiveDate::from_ymd_opt(2025, 1, 10)
    );
    export_assignments_json(&out, &[person]).unwrap();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let record = &saved.as_array().unwrap()[0];
    assert_eq!(record["name"], "ana");
    assert_eq!(record["working_day"], "Monday");
    assert_eq!(record["assigned_shifts"][1], "2025-01-10");
    assert_eq!(record["fridays_count"], 1);
}
