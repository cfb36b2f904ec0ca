#![forbid(unsafe_code)]
//! Permanence — planification de gardes quotidiennes par modèle de
//! contraintes (sans BD).
//!
//! - Deux personnes de garde par jour, sur un horizon de `weeks * 7` jours.
//! - Règles composables : couverture, jour attitré, repos, incompatibilités,
//!   dates imposées, bornes d'allocation, équité douce.
//! - Formulation MILP soumise à `good_lp` (backend microlp) ; le solveur est
//!   externe, le crate s'arrête à la formulation et à l'interprétation du
//!   statut.
//! - Entrées/sorties JSON ; l'export tableur/graphique vit en dehors.

pub mod io;
pub mod model;
pub mod rules;
pub mod scheduler;
pub mod storage;

pub use model::{build_horizon, is_weekend_day, weekday_name, Day, FixedAssignment, Person};
pub use rules::{default_rules, FixedPins, Rule, SolveContext};
pub use scheduler::{
    SchedError, ScheduleOptions, ScheduleResult, Scheduler, ShiftGrid, ShiftModel,
    SolveDiagnostics, SolveStatus,
};
pub use storage::{JsonStorage, Storage};
