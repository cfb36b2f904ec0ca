use crate::model::{weekday_name, FixedAssignment, Person};
use anyhow::{bail, Context};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Enregistrement de personne tel que lu dans le fichier d'effectif.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    /// Nom de jour de semaine, ex. `Monday` (les abréviations `Mon`, `mon`
    /// sont acceptées).
    pub working_day: String,
    #[serde(default)]
    pub absence_days: Vec<String>,
    #[serde(default)]
    pub incompatible_with: Vec<String>,
}

/// Fichier d'entrée complet : effectif + dates imposées.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterInput {
    pub people: Vec<PersonRecord>,
    #[serde(default)]
    pub holidays: Vec<FixedAssignment>,
}

/// Charge l'effectif et les dates imposées depuis un fichier JSON.
///
/// Contrairement aux dates imposées (validées plus tard, enregistrement par
/// enregistrement), un enregistrement de personne invalide est une erreur
/// fatale : sans effectif fiable, rien à résoudre.
pub fn load_roster<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<(Vec<Person>, Vec<FixedAssignment>)> {
    let data =
        fs::read(&path).with_context(|| format!("reading {}", path.as_ref().display()))?;
    let input: RosterInput =
        serde_json::from_slice(&data).with_context(|| "parsing roster input")?;

    let mut people = Vec::with_capacity(input.people.len());
    let mut seen = BTreeSet::new();
    for record in input.people {
        if !seen.insert(record.name.clone()) {
            bail!("duplicate person name: {}", record.name);
        }
        people.push(person_from_record(record)?);
    }
    if people.is_empty() {
        bail!("no people in roster input");
    }
    Ok((people, input.holidays))
}

fn person_from_record(record: PersonRecord) -> anyhow::Result<Person> {
    let working_day: Weekday = record.working_day.trim().parse().map_err(|_| {
        anyhow::anyhow!(
            "invalid working_day for {}: {}",
            record.name,
            record.working_day
        )
    })?;
    let mut person = Person::new(record.name.clone(), working_day);
    for raw in record.absence_days {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid absence date for {}: {raw}", record.name))?;
        person.absence_days.insert(date);
    }
    person.incompatible_with = record.incompatible_with.into_iter().collect();
    Ok(person)
}

/// Ligne d'export par personne : dates assignées et compteurs, consommée
/// par les couches de présentation (tableur, graphique) hors de ce crate.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRecord {
    pub name: String,
    pub working_day: &'static str,
    pub absence_days: Vec<String>,
    pub incompatible_with: Vec<String>,
    pub assigned_shifts: Vec<String>,
    pub fridays_count: u32,
    pub saturdays_count: u32,
    pub sundays_count: u32,
}

impl AssignmentRecord {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            working_day: weekday_name(person.working_day),
            absence_days: person.absence_days.iter().map(|d| d.to_string()).collect(),
            incompatible_with: person.incompatible_with.iter().cloned().collect(),
            assigned_shifts: person
                .assigned_shifts
                .iter()
                .map(|d| d.to_string())
                .collect(),
            fridays_count: person.fridays_count,
            saturdays_count: person.saturdays_count,
            sundays_count: person.sundays_count,
        }
    }
}

/// Export JSON des assignations (jolie mise en forme).
pub fn export_assignments_json<P: AsRef<Path>>(path: P, people: &[Person]) -> anyhow::Result<()> {
    let records: Vec<AssignmentRecord> = people.iter().map(AssignmentRecord::from_person).collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json)?;
    Ok(())
}
