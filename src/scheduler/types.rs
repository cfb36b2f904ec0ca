use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Paramètres de résolution.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOptions {
    /// Tolérance autour du nombre de gardes attendu par personne.
    pub tolerance: u32,
    /// Tolérance autour du nombre de gardes de week-end attendu par personne.
    pub weekend_tolerance: u32,
    /// Poids de chaque terme d'écart max−min dans l'objectif.
    pub balance_weight: f64,
    /// Poids d'une paire de week-ends consécutifs travaillés.
    pub consecutive_weekend_weight: f64,
    /// Budget mural alloué au solveur.
    pub time_budget: Duration,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            tolerance: 2,
            weekend_tolerance: 1,
            balance_weight: 1.0,
            consecutive_weekend_weight: 10.0,
            time_budget: Duration::from_secs(180),
        }
    }
}

/// Statut renvoyé par le solveur, interprété côté planning.
///
/// microlp ne rend pas de solution sans preuve d'optimalité : il n'y a donc
/// pas de statut « faisable mais non optimal ». `Unknown` couvre les échecs
/// que le backend ne classe ni irréalisable ni non borné.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Diagnostics d'une résolution, remontés au caller même en cas d'échec.
#[derive(Debug, Clone)]
pub struct SolveDiagnostics {
    pub status: SolveStatus,
    /// Valeur de l'objectif agrégé, absente si aucune solution.
    pub objective: Option<f64>,
    pub num_variables: usize,
    pub num_constraints: usize,
    pub wall_time: Duration,
    /// Budget configuré ; microlp n'expose pas de coupure dure, le budget
    /// est donc rapporté ici à titre d'information.
    pub time_budget: Duration,
}

impl fmt::Display for SolveDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={} vars={} constraints={} wall_time={:.3}s",
            self.status,
            self.num_variables,
            self.num_constraints,
            self.wall_time.as_secs_f64()
        )?;
        if let Some(obj) = self.objective {
            write!(f, " objective={obj:.1}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("horizon is empty: weeks must be > 0")]
    EmptyHorizon,
    #[error("no people to schedule")]
    NoPeople,
    #[error("no feasible assignment: {0}")]
    NoFeasibleSolution(SolveDiagnostics),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchedError {
    /// Diagnostics solveur associés à l'échec, s'il y en a.
    pub fn diagnostics(&self) -> Option<&SolveDiagnostics> {
        match self {
            SchedError::NoFeasibleSolution(d) => Some(d),
            _ => None,
        }
    }
}
