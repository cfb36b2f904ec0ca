use good_lp::Expression;

/// Accumulateur d'objectif partagé entre les règles.
///
/// Chaque règle peut y ajouter des termes de pénalité pondérés ; la somme est
/// commutative, l'ordre d'application des règles ne change donc pas la valeur
/// agrégée. L'orchestrateur en est l'unique propriétaire et ne le lit qu'une
/// fois toutes les règles appliquées.
pub struct ObjectiveAccumulator {
    expr: Expression,
    terms: usize,
}

impl ObjectiveAccumulator {
    pub fn new() -> Self {
        Self {
            expr: Expression::from(0.0),
            terms: 0,
        }
    }

    /// Ajoute un terme de pénalité. Les poids négatifs sont refusés : une
    /// règle ne peut qu'augmenter le coût d'une solution.
    pub fn add_term(&mut self, weight: f64, term: Expression) {
        debug_assert!(weight >= 0.0, "penalty weights must be non-negative");
        self.expr += term * weight;
        self.terms += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }

    pub fn terms(&self) -> usize {
        self.terms
    }

    /// Expression finale à minimiser (zéro si aucune règle n'a contribué).
    pub fn into_expression(self) -> Expression {
        self.expr
    }
}

impl Default for ObjectiveAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
