use good_lp::Expression;

use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Bornes d'allocation : le nombre de gardes libres (hors dates imposées)
/// de chaque personne reste dans une fenêtre autour de la part attendue.
///
/// Part attendue = (jours × 2) / effectif, arrondie à l'entier inférieur.
/// La fenêtre de chaque personne est recentrée par son nombre de gardes
/// pré-fixées, pour que celles-ci comptent dans son quota. Si le
/// recentrage fait se croiser les bornes, les deux s'effondrent sur la
/// borne supérieure (plancher zéro), sans erreur.
///
/// Une fenêtre parallèle borne les gardes de week-end, avec sa propre
/// tolérance et les pré-fixées de week-end.
pub struct AllocationBoundsRule;

fn window(expected: u32, tolerance: u32, fixed: u32) -> (f64, f64) {
    let upper = (i64::from(expected) + i64::from(tolerance) - i64::from(fixed)).max(0);
    let lower = (i64::from(expected) - i64::from(tolerance) - i64::from(fixed))
        .max(0)
        .min(upper);
    (lower as f64, upper as f64)
}

impl Rule for AllocationBoundsRule {
    fn name(&self) -> &'static str {
        "allocation_bounds"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        let headcount = ctx.people.len() as u32;
        let num_days = ctx.days.len() as u32;
        let weekend_days = ctx.days.iter().filter(|d| d.is_weekend()).count() as u32;

        // 2 personnes par jour, donc jours × 2 créneaux à répartir.
        let expected_total = num_days * 2 / headcount;
        let expected_weekend = weekend_days * 2 / headcount;

        for p in 0..ctx.people.len() {
            let mut total = Expression::from(0.0);
            let mut weekend = Expression::from(0.0);
            for day in ctx.days {
                if ctx.pins.is_pinned(p, day.index) {
                    continue;
                }
                let var = model.grid().var(p, day.index);
                total += var;
                if day.is_weekend() {
                    weekend += var;
                }
            }

            let (lower, upper) = window(expected_total, ctx.options.tolerance, ctx.pins.fixed_total(p));
            model.add_constraint(total.clone().geq(lower));
            model.add_constraint(total.leq(upper));

            let (lower, upper) = window(
                expected_weekend,
                ctx.options.weekend_tolerance,
                ctx.pins.fixed_weekend(p),
            );
            model.add_constraint(weekend.clone().geq(lower));
            model.add_constraint(weekend.leq(upper));
        }
    }
}
