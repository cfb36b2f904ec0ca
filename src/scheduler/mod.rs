//! Orchestrateur : construit la grille, applique les règles, soumet le
//! modèle au solveur et extrait l'assignation.
//!
//! Cycle d'une résolution : non-construit → modèle construit → résolu
//! (optimal) → extrait, ou résolu (irréalisable/inconnu) → échec.
//! L'extraction est une lecture pure des valeurs de la solution ; un échec
//! ne produit aucun résultat partiel.

mod grid;
mod objective;
mod types;

pub use grid::{ShiftGrid, ShiftModel};
pub use objective::ObjectiveAccumulator;
pub use types::{SchedError, ScheduleOptions, SolveDiagnostics, SolveStatus};

use chrono::NaiveDate;
use good_lp::{default_solver, Expression, ResolutionError, Solution, SolverModel};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::model::{build_horizon, Day, FixedAssignment, Person};
use crate::rules::{default_rules, FixedPins, Rule, SolveContext};

/// Résultat d'une résolution : l'effectif avec les dates assignées et les
/// compteurs de week-end remplis, plus les diagnostics du solveur.
#[derive(Debug)]
pub struct ScheduleResult {
    pub people: Vec<Person>,
    pub diagnostics: SolveDiagnostics,
}

/// Planificateur d'un horizon de `weeks * 7` jours.
///
/// Possède l'effectif, les dates imposées et le jeu de règles le temps d'un
/// cycle construction + résolution ; des horizons résolus en parallèle
/// doivent utiliser des instances indépendantes.
pub struct Scheduler {
    people: Vec<Person>,
    holidays: Vec<FixedAssignment>,
    start_date: NaiveDate,
    weeks: u32,
    rules: Vec<Box<dyn Rule>>,
    options: ScheduleOptions,
}

impl Scheduler {
    pub fn new(people: Vec<Person>, start_date: NaiveDate, weeks: u32) -> Self {
        Self {
            people,
            holidays: Vec::new(),
            start_date,
            weeks,
            rules: default_rules(),
            options: ScheduleOptions::default(),
        }
    }

    /// Remplace le jeu de règles par défaut (l'ordre fourni est respecté).
    pub fn with_rules(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_holidays(mut self, holidays: Vec<FixedAssignment>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn with_options(mut self, options: ScheduleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ScheduleOptions {
        self.options
    }

    /// Construit le modèle, le résout et extrait l'assignation.
    ///
    /// Renvoie l'effectif complété, ou [`SchedError::NoFeasibleSolution`]
    /// avec les diagnostics si le solveur conclut à l'irréalisable ou ne
    /// conclut pas.
    pub fn assign_days(mut self) -> Result<ScheduleResult, SchedError> {
        if self.people.is_empty() {
            return Err(SchedError::NoPeople);
        }
        if self.weeks == 0 {
            return Err(SchedError::EmptyHorizon);
        }

        let days = build_horizon(self.start_date, self.weeks);
        let pins = FixedPins::resolve(&self.holidays, &self.people, &days);

        // Non-construit → modèle construit.
        let mut model = ShiftModel::new(self.people.len(), days.len());
        {
            let ctx = SolveContext {
                people: &self.people,
                days: &days,
                pins: &pins,
                options: &self.options,
            };
            for rule in &self.rules {
                debug!(rule = rule.name(), "applying rule");
                rule.apply(&mut model, &ctx);
            }
        }

        let num_variables = model.num_variables();
        let num_constraints = model.num_constraints();
        let penalty_terms = model.objective.terms();
        let ShiftModel {
            vars,
            grid,
            constraints,
            objective,
            ..
        } = model;

        let objective_expr = if objective.is_empty() {
            Expression::from(0.0)
        } else {
            objective.into_expression()
        };
        let eval_expr = objective_expr.clone();

        let mut problem = vars.minimise(objective_expr).using(default_solver);
        for constraint in constraints {
            problem = problem.with(constraint);
        }
        info!(
            vars = num_variables,
            constraints = num_constraints,
            penalty_terms,
            "model built"
        );

        // Modèle construit → résolu. Un seul appel bloquant ; pas de retry
        // côté planificateur, relâcher les tolérances est une décision du
        // caller.
        let started = Instant::now();
        let outcome = problem.solve();
        let wall_time = started.elapsed();

        match outcome {
            Ok(solution) => {
                // microlp prouve l'optimalité quand il conclut.
                let diagnostics = SolveDiagnostics {
                    status: SolveStatus::Optimal,
                    objective: Some(solution.eval(&eval_expr)),
                    num_variables,
                    num_constraints,
                    wall_time,
                    time_budget: self.options.time_budget,
                };
                info!(%diagnostics, "solution found");

                // Résolu → extrait.
                extract_assignments(&mut self.people, &days, &grid, &solution);
                Ok(ScheduleResult {
                    people: self.people,
                    diagnostics,
                })
            }
            Err(err) => {
                let status = match err {
                    ResolutionError::Infeasible => SolveStatus::Infeasible,
                    ResolutionError::Unbounded => SolveStatus::Unbounded,
                    _ => SolveStatus::Unknown,
                };
                let diagnostics = SolveDiagnostics {
                    status,
                    objective: None,
                    num_variables,
                    num_constraints,
                    wall_time,
                    time_budget: self.options.time_budget,
                };
                warn!(%diagnostics, "no assignment produced");
                Err(SchedError::NoFeasibleSolution(diagnostics))
            }
        }
    }
}

/// Lecture pure de la solution : chaque variable à 1 ajoute sa date à la
/// personne correspondante, en ordre chronologique. Rejouer l'extraction
/// sur la même solution produit la même liste.
fn extract_assignments(
    people: &mut [Person],
    days: &[Day],
    grid: &ShiftGrid,
    solution: &impl Solution,
) {
    for day in days {
        for (p, person) in people.iter_mut().enumerate() {
            if solution.value(grid.var(p, day.index)) > 0.5 {
                person.assign_shift(day.date);
            }
        }
    }
}
