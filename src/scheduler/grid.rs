use good_lp::{variable, Constraint, Expression, ProblemVariables, Variable, VariableDefinition};

use super::objective::ObjectiveAccumulator;

/// Grille de décision : une variable booléenne par couple (personne, jour).
///
/// La grille est construite une seule fois, avant l'application des règles,
/// et n'est plus modifiée ensuite : les règles n'y lisent que des variables
/// et expriment leurs relations via [`ShiftModel`].
pub struct ShiftGrid {
    vars: Vec<Variable>,
    num_people: usize,
    num_days: usize,
}

impl ShiftGrid {
    pub fn build(vars: &mut ProblemVariables, num_people: usize, num_days: usize) -> Self {
        let mut grid = Vec::with_capacity(num_people * num_days);
        for p in 0..num_people {
            for d in 0..num_days {
                grid.push(vars.add(variable().binary().name(format!("shift_p{p}_d{d}"))));
            }
        }
        Self {
            vars: grid,
            num_people,
            num_days,
        }
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// Variable "la personne `p` travaille le jour `d`".
    pub fn var(&self, p: usize, d: usize) -> Variable {
        debug_assert!(p < self.num_people && d < self.num_days);
        self.vars[p * self.num_days + d]
    }

    /// Somme de la colonne d'un jour (toutes les personnes).
    pub fn day_sum(&self, d: usize) -> Expression {
        let mut sum = Expression::from(0.0);
        for p in 0..self.num_people {
            sum += self.var(p, d);
        }
        sum
    }
}

/// Modèle en cours de construction : variables, contraintes en attente et
/// accumulateur d'objectif. Les règles n'écrivent que par ces méthodes ; le
/// découpage permet de garder la grille en lecture seule pour elles.
pub struct ShiftModel {
    pub(super) vars: ProblemVariables,
    pub(super) grid: ShiftGrid,
    pub(super) constraints: Vec<Constraint>,
    pub(super) objective: ObjectiveAccumulator,
    pub(super) aux_count: usize,
}

impl ShiftModel {
    pub fn new(num_people: usize, num_days: usize) -> Self {
        let mut vars = ProblemVariables::new();
        let grid = ShiftGrid::build(&mut vars, num_people, num_days);
        Self {
            vars,
            grid,
            constraints: Vec::new(),
            objective: ObjectiveAccumulator::new(),
            aux_count: 0,
        }
    }

    pub fn grid(&self) -> &ShiftGrid {
        &self.grid
    }

    /// Ajoute une relation dure au modèle.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Déclare une variable auxiliaire propre à une règle.
    pub fn add_aux_var(&mut self, definition: VariableDefinition) -> Variable {
        self.aux_count += 1;
        self.vars.add(definition)
    }

    /// Ajoute un terme de pénalité pondéré à l'objectif partagé.
    pub fn add_penalty(&mut self, weight: f64, term: Expression) {
        self.objective.add_term(weight, term);
    }

    pub fn num_variables(&self) -> usize {
        self.grid.num_people * self.grid.num_days + self.aux_count
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}
