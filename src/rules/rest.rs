use good_lp::Expression;

use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Repos : une garde le jour `d` interdit les jours `d+1` et `d+2`.
///
/// Exprimé paire par paire (`x_d + x_{d+k} <= 1`) plutôt qu'en somme sur
/// fenêtre glissante, pour pouvoir omettre précisément les paires dont un
/// membre est épinglé par une date imposée : un férié adjacent à une garde
/// ne doit pas être bloqué par le repos qu'elle impose.
pub struct RestPeriodRule;

impl Rule for RestPeriodRule {
    fn name(&self) -> &'static str {
        "rest_period"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        let num_days = ctx.days.len();
        for p in 0..ctx.people.len() {
            for d in 0..num_days {
                for k in 1..=2usize {
                    let Some(later) = d.checked_add(k).filter(|&l| l < num_days) else {
                        continue;
                    };
                    if ctx.pins.is_pinned(p, d) || ctx.pins.is_pinned(p, later) {
                        continue;
                    }
                    let a = model.grid().var(p, d);
                    let b = model.grid().var(p, later);
                    model.add_constraint((Expression::from(a) + b).leq(1.0));
                }
            }
        }
    }
}
