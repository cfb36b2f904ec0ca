//! Règles de construction du modèle.
//!
//! Chaque règle est appliquée exactement une fois par résolution, dans l'ordre
//! choisi par l'orchestrateur. Les contraintes dures sont indépendantes de cet
//! ordre ; les contributions à l'objectif sont sommées, donc commutatives.

mod balance;
mod bounds;
mod coverage;
mod eligibility;
mod fixed;
mod incompatibility;
mod rest;

pub use balance::{BalanceRule, ConsecutiveWeekendRule};
pub use bounds::AllocationBoundsRule;
pub use coverage::CoverageRule;
pub use eligibility::{AbsenceRule, WorkingDayRule};
pub use fixed::{FixedAssignmentRule, FixedPins};
pub use incompatibility::IncompatibilityRule;
pub use rest::RestPeriodRule;

use crate::model::{Day, Person};
use crate::scheduler::{ScheduleOptions, ShiftModel};

/// Données en lecture seule partagées par toutes les règles pendant une
/// résolution. Les dates imposées y figurent déjà résolues : aucune règle
/// n'a besoin de consulter l'état interne d'une autre.
pub struct SolveContext<'a> {
    pub people: &'a [Person],
    pub days: &'a [Day],
    pub pins: &'a FixedPins,
    pub options: &'a ScheduleOptions,
}

/// Une règle lit le contexte et la grille, puis ajoute des contraintes, des
/// variables auxiliaires qui lui sont propres, et d'éventuels termes de
/// pénalité à l'accumulateur d'objectif.
pub trait Rule {
    fn name(&self) -> &'static str;
    fn apply(&self, model: &mut ShiftModel, ctx: &SolveContext<'_>);
}

/// Jeu de règles complet, dans l'ordre d'application par défaut. Les dates
/// imposées viennent en premier ; les règles d'éligibilité et de repos qui
/// consultent l'ensemble d'exceptions suivent.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FixedAssignmentRule),
        Box::new(CoverageRule),
        Box::new(WorkingDayRule),
        Box::new(AbsenceRule),
        Box::new(RestPeriodRule),
        Box::new(IncompatibilityRule),
        Box::new(AllocationBoundsRule),
        Box::new(BalanceRule),
        Box::new(ConsecutiveWeekendRule),
    ]
}
