use good_lp::Expression;
use tracing::warn;

use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Éligibilité : une personne ne travaille que son jour de semaine attitré
/// ou un jour de week-end (vendredi, samedi, dimanche).
///
/// Les couples (personne, jour) épinglés par une date imposée échappent à la
/// restriction : sans cette exception, un férié qui force une garde hors
/// jour attitré rendrait le modèle irréalisable.
pub struct WorkingDayRule;

impl Rule for WorkingDayRule {
    fn name(&self) -> &'static str {
        "working_day"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        for (p, person) in ctx.people.iter().enumerate() {
            for day in ctx.days {
                if day.is_weekend() || day.weekday == person.working_day {
                    continue;
                }
                if ctx.pins.is_pinned(p, day.index) {
                    continue;
                }
                let var = model.grid().var(p, day.index);
                model.add_constraint(Expression::from(var).eq(0.0));
            }
        }
    }
}

/// Absences : les dates déclarées indisponibles sont forcées à zéro.
///
/// Une date imposée prime sur l'absence ; le conflit est journalisé pour
/// que l'opérateur corrige l'un des deux enregistrements.
pub struct AbsenceRule;

impl Rule for AbsenceRule {
    fn name(&self) -> &'static str {
        "absence"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        for (p, person) in ctx.people.iter().enumerate() {
            for day in ctx.days {
                if !person.absence_days.contains(&day.date) {
                    continue;
                }
                if ctx.pins.is_pinned(p, day.index) {
                    warn!(
                        name = %person.name,
                        date = %day.date,
                        "fixed assignment overrides a declared absence"
                    );
                    continue;
                }
                let var = model.grid().var(p, day.index);
                model.add_constraint(Expression::from(var).eq(0.0));
            }
        }
    }
}
