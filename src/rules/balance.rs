use chrono::Weekday;
use good_lp::{variable, Expression};

use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Équité douce : pour chaque groupe de jours (total, puis chaque jour de
/// week-end), l'écart max−min entre personnes est un terme de pénalité, pas
/// une contrainte dure — un effectif impair rendrait l'égalité stricte
/// irréalisable.
///
/// Encodage : `max >= somme_p` et `min <= somme_p` pour chaque personne, et
/// l'objectif minimise `max − min`. Sous minimisation, les deux auxiliaires
/// collent aux vraies valeurs ; comme les variables de la grille sont
/// binaires, les auxiliaires peuvent rester continues.
pub struct BalanceRule;

fn spread_penalty(
    model: &mut ShiftModel,
    label: &str,
    day_indices: &[usize],
    num_people: usize,
    weight: f64,
) {
    if day_indices.is_empty() || num_people == 0 {
        return;
    }
    let bound = day_indices.len() as f64;
    let max_v = model.add_aux_var(variable().min(0.0).max(bound).name(format!("max_{label}")));
    let min_v = model.add_aux_var(variable().min(0.0).max(bound).name(format!("min_{label}")));

    for p in 0..num_people {
        let mut sum = Expression::from(0.0);
        for &d in day_indices {
            sum += model.grid().var(p, d);
        }
        model.add_constraint((sum.clone() - max_v).leq(0.0));
        model.add_constraint((Expression::from(min_v) - sum).leq(0.0));
    }

    model.add_penalty(weight, Expression::from(max_v) - min_v);
}

impl Rule for BalanceRule {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        let weight = ctx.options.balance_weight;
        let num_people = ctx.people.len();

        let all: Vec<usize> = ctx.days.iter().map(|d| d.index).collect();
        spread_penalty(model, "total", &all, num_people, weight);

        for (label, weekday) in [
            ("friday", Weekday::Fri),
            ("saturday", Weekday::Sat),
            ("sunday", Weekday::Sun),
        ] {
            let indices: Vec<usize> = ctx
                .days
                .iter()
                .filter(|d| d.weekday == weekday)
                .map(|d| d.index)
                .collect();
            spread_penalty(model, label, &indices, num_people, weight);
        }
    }
}

/// Pénalité de week-ends consécutifs : travailler un jour de week-end deux
/// semaines de suite coûte `consecutive_weekend_weight` par paire de
/// semaines.
///
/// Par personne et par semaine, un indicateur `w` vaut 1 ssi au moins un
/// jour de week-end de la semaine est travaillé (`w >= x_d` pour chaque
/// jour, `w <= Σ x_d` pour l'autre sens). La conjonction `b` de deux
/// semaines adjacentes est encodée dans les deux directions :
/// `b >= w1 + w2 − 1`, `b <= w1`, `b <= w2`.
pub struct ConsecutiveWeekendRule;

impl Rule for ConsecutiveWeekendRule {
    fn name(&self) -> &'static str {
        "consecutive_weekend"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        let weeks = ctx.days.len() / 7;
        if weeks < 2 {
            return;
        }

        for (p, person) in ctx.people.iter().enumerate() {
            let mut worked: Vec<good_lp::Variable> = Vec::with_capacity(weeks);
            for w in 0..weeks {
                let indicator = model.add_aux_var(
                    variable()
                        .min(0.0)
                        .max(1.0)
                        .name(format!("weekend_{}_w{w}", person.name)),
                );
                let mut sum = Expression::from(0.0);
                for day in ctx.days.iter().filter(|d| d.week() == w && d.is_weekend()) {
                    let var = model.grid().var(p, day.index);
                    sum += var;
                    model.add_constraint((Expression::from(var) - indicator).leq(0.0));
                }
                model.add_constraint((Expression::from(indicator) - sum).leq(0.0));
                worked.push(indicator);
            }

            let mut penalty = Expression::from(0.0);
            for w in 0..weeks - 1 {
                let (first, second) = (worked[w], worked[w + 1]);
                let both = model.add_aux_var(
                    variable()
                        .min(0.0)
                        .max(1.0)
                        .name(format!("consec_{}_w{w}", person.name)),
                );
                model.add_constraint((Expression::from(first) + second - both).leq(1.0));
                model.add_constraint((Expression::from(both) - first).leq(0.0));
                model.add_constraint((Expression::from(both) - second).leq(0.0));
                penalty += both;
            }
            model.add_penalty(ctx.options.consecutive_weekend_weight, penalty);
        }
    }
}
