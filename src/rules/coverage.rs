use super::{Rule, SolveContext};
use crate::scheduler::ShiftModel;

/// Couverture : exactement deux personnes de garde chaque jour.
///
/// La contrainte est posée aussi sur les jours imposés ; elle y est
/// redondante avec la règle des dates imposées, mais cohérente avec elle.
pub struct CoverageRule;

impl Rule for CoverageRule {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn apply(&self, model: &mut ShiftModel, _ctx: &SolveContext<'_>) {
        for d in 0..model.grid().num_days() {
            let sum = model.grid().day_sum(d);
            model.add_constraint(sum.eq(2.0));
        }
    }
}
