use chrono::NaiveDate;
use good_lp::Expression;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::warn;

use super::{Rule, SolveContext};
use crate::model::{Day, FixedAssignment, Person};
use crate::scheduler::ShiftModel;

/// Dates imposées résolues contre l'effectif courant : l'ensemble
/// d'exceptions consulté par les règles d'éligibilité et de repos, plus les
/// compteurs de gardes pré-fixées qui recentrent les bornes d'allocation.
///
/// La résolution est refaite à chaque solve : les index de personnes ne sont
/// stables qu'au sein d'une résolution.
#[derive(Debug, Default)]
pub struct FixedPins {
    pinned: BTreeSet<(usize, usize)>,
    by_day: BTreeMap<usize, [usize; 2]>,
    fixed_total: Vec<u32>,
    fixed_weekend: Vec<u32>,
}

impl FixedPins {
    /// Valide chaque enregistrement contre l'effectif et l'horizon.
    ///
    /// Un enregistrement invalide (date illisible ou hors horizon, nombre de
    /// noms différent de deux, nom inconnu ou dupliqué, jour déjà imposé)
    /// est journalisé puis ignoré ; la construction continue.
    pub fn resolve(records: &[FixedAssignment], people: &[Person], days: &[Day]) -> Self {
        let mut pins = Self {
            pinned: BTreeSet::new(),
            by_day: BTreeMap::new(),
            fixed_total: vec![0; people.len()],
            fixed_weekend: vec![0; people.len()],
        };

        let index_by_name: HashMap<&str, usize> = people
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), i))
            .collect();

        for record in records {
            let date = match NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") {
                Ok(d) => d,
                Err(err) => {
                    warn!(date = %record.date, %err, "skipping fixed assignment: unreadable date");
                    continue;
                }
            };
            let Some(day) = days.iter().find(|d| d.date == date) else {
                warn!(date = %record.date, "skipping fixed assignment: date outside horizon");
                continue;
            };
            if record.people.len() != 2 {
                warn!(
                    date = %record.date,
                    names = record.people.len(),
                    "skipping fixed assignment: exactly two people required"
                );
                continue;
            }
            if record.people[0] == record.people[1] {
                warn!(date = %record.date, "skipping fixed assignment: duplicate name");
                continue;
            }
            let resolved: Vec<usize> = record
                .people
                .iter()
                .filter_map(|name| match index_by_name.get(name.as_str()) {
                    Some(&i) => Some(i),
                    None => {
                        warn!(date = %record.date, name = %name, "skipping fixed assignment: unknown person");
                        None
                    }
                })
                .collect();
            let &[p1, p2] = resolved.as_slice() else {
                continue;
            };
            if pins.by_day.contains_key(&day.index) {
                warn!(date = %record.date, "skipping fixed assignment: day already pinned");
                continue;
            }

            pins.by_day.insert(day.index, [p1, p2]);
            for p in [p1, p2] {
                pins.pinned.insert((p, day.index));
                pins.fixed_total[p] += 1;
                if day.is_weekend() {
                    pins.fixed_weekend[p] += 1;
                }
            }
        }

        pins
    }

    /// Vrai si (personne, jour) est épinglé à 1 par une date imposée.
    pub fn is_pinned(&self, person: usize, day: usize) -> bool {
        self.pinned.contains(&(person, day))
    }

    pub fn is_day_pinned(&self, day: usize) -> bool {
        self.by_day.contains_key(&day)
    }

    /// Jours imposés, avec les deux personnes retenues.
    pub fn by_day(&self) -> &BTreeMap<usize, [usize; 2]> {
        &self.by_day
    }

    /// Nombre de gardes pré-fixées de la personne `p`.
    pub fn fixed_total(&self, p: usize) -> u32 {
        self.fixed_total.get(p).copied().unwrap_or(0)
    }

    /// Nombre de gardes de week-end pré-fixées de la personne `p`.
    pub fn fixed_weekend(&self, p: usize) -> u32 {
        self.fixed_weekend.get(p).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }
}

/// Applique les dates imposées : les deux personnes retenues sont forcées à
/// 1, toutes les autres à 0 ce jour-là (ce qui englobe la couverture pour
/// cette date).
pub struct FixedAssignmentRule;

impl Rule for FixedAssignmentRule {
    fn name(&self) -> &'static str {
        "fixed_assignment"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        for (&d, &[p1, p2]) in ctx.pins.by_day() {
            for p in 0..ctx.people.len() {
                let var = model.grid().var(p, d);
                let forced = if p == p1 || p == p2 { 1.0 } else { 0.0 };
                model.add_constraint(Expression::from(var).eq(forced));
            }
        }
    }
}
