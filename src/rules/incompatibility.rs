use good_lp::Expression;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Incompatibilités : deux personnes déclarées incompatibles ne partagent
/// jamais un jour.
///
/// La relation est symétrique même si elle n'est déclarée que dans un sens.
/// Le mapping nom → index est reconstruit à chaque solve : les index ne sont
/// stables qu'au sein d'une résolution. Un nom qui ne résout pas est
/// journalisé puis ignoré.
pub struct IncompatibilityRule;

impl Rule for IncompatibilityRule {
    fn name(&self) -> &'static str {
        "incompatibility"
    }

    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>) {
        let index_by_name: HashMap<&str, usize> = ctx
            .people
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), i))
            .collect();

        let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
        for (p, person) in ctx.people.iter().enumerate() {
            for other in &person.incompatible_with {
                match index_by_name.get(other.as_str()) {
                    Some(&q) if q != p => {
                        pairs.insert((p.min(q), p.max(q)));
                    }
                    Some(_) => {}
                    None => {
                        warn!(
                            name = %person.name,
                            incompatible_with = %other,
                            "ignoring incompatibility with unknown person"
                        );
                    }
                }
            }
        }

        for &(p, q) in &pairs {
            for day in ctx.days {
                let a = model.grid().var(p, day.index);
                let b = model.grid().var(q, day.index);
                model.add_constraint((Expression::from(a) + b).leq(1.0));
            }
        }
    }
}
