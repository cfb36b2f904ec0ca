use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Jours de week-end au sens du planning : vendredi, samedi, dimanche.
pub fn is_weekend_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// Nom anglais complet du jour, comme dans les fichiers d'entrée/sortie.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Personne planifiable (membre de la rotation de garde).
///
/// L'identité (`name`, `working_day`, absences, incompatibilités) est figée
/// avant la résolution ; `assigned_shifts` et les compteurs de week-end ne
/// sont remplis qu'à l'extraction de la solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    /// Seul jour de semaine (hors week-end) où la personne peut travailler.
    pub working_day: Weekday,
    /// Dates où la personne est indisponible, quelles que soient les règles.
    pub absence_days: BTreeSet<NaiveDate>,
    /// Noms des personnes avec qui elle ne doit jamais partager un jour.
    pub incompatible_with: BTreeSet<String>,
    /// Dates assignées, remplies après résolution, en ordre chronologique.
    pub assigned_shifts: Vec<NaiveDate>,
    pub fridays_count: u32,
    pub saturdays_count: u32,
    pub sundays_count: u32,
}

impl Person {
    pub fn new<N: Into<String>>(name: N, working_day: Weekday) -> Self {
        Self {
            name: name.into(),
            working_day,
            absence_days: BTreeSet::new(),
            incompatible_with: BTreeSet::new(),
            assigned_shifts: Vec::new(),
            fridays_count: 0,
            saturdays_count: 0,
            sundays_count: 0,
        }
    }

    /// Enregistre une date assignée et met à jour les compteurs de week-end.
    pub fn assign_shift(&mut self, date: NaiveDate) {
        self.assigned_shifts.push(date);
        match date.weekday() {
            Weekday::Fri => self.fridays_count += 1,
            Weekday::Sat => self.saturdays_count += 1,
            Weekday::Sun => self.sundays_count += 1,
            _ => {}
        }
    }

    pub fn last_shift(&self) -> Option<NaiveDate> {
        self.assigned_shifts.last().copied()
    }
}

/// Jour calendaire de l'horizon, avec son index de colonne dans la grille.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    pub index: usize,
    pub date: NaiveDate,
    pub weekday: Weekday,
}

impl Day {
    pub fn is_weekend(&self) -> bool {
        is_weekend_day(self.weekday)
    }

    /// Semaine de 7 jours (non chevauchante) à laquelle ce jour appartient.
    pub fn week(&self) -> usize {
        self.index / 7
    }
}

/// Construit l'horizon : `weeks * 7` jours contigus à partir de `start`.
pub fn build_horizon(start: NaiveDate, weeks: u32) -> Vec<Day> {
    let num_days = weeks as usize * 7;
    (0..num_days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            Day {
                index: i,
                date,
                weekday: date.weekday(),
            }
        })
        .collect()
}

/// Enregistrement brut de jour férié / date imposée : une date et les noms
/// des deux personnes qui doivent la couvrir.
///
/// La validation (date parsable et dans l'horizon, exactement deux noms
/// connus et distincts) se fait à la résolution, pas au chargement : un
/// enregistrement invalide est journalisé puis ignoré sans faire échouer le
/// reste de la construction.
#[derive(Debug, Clone, Deserialize)]
pub struct FixedAssignment {
    /// Date au format `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, alias = "people_names")]
    pub people: Vec<String>,
}
