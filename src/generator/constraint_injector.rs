use crate::basic_types::Literal;
use crate::basic_types::Random;
use crate::basic_types::StorageKey;
use crate::basic_types::Variable;
use crate::cnfuzz_assert_simple;
use crate::generator::layer_plan::MAX_AND_GATE_ARITY;
use crate::generator::mark_set::MarkSet;
use crate::generator::LayerId;
use crate::generator::LayerPlan;

/// `k <=> l`, encoded by the clauses `{k, l}` and `{-k, -l}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EqualityConstraint {
    pub(crate) k: Literal,
    pub(crate) l: Literal,
}

impl EqualityConstraint {
    pub(crate) fn clauses(&self) -> [Vec<Literal>; 2] {
        [vec![self.k, self.l], vec![!self.k, !self.l]]
    }
}

/// A gate over `lhs` and `rhs`, encoded by the clause `{lhs, rhs_1, .., rhs_k}` followed by one
/// binary clause `{-lhs, -rhs_j}` per right-hand side literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AndGate {
    pub(crate) lhs: Literal,
    pub(crate) rhs: Vec<Literal>,
}

impl AndGate {
    pub(crate) fn clauses(&self) -> Vec<Vec<Literal>> {
        std::iter::once(
            std::iter::once(self.lhs)
                .chain(self.rhs.iter().copied())
                .collect(),
        )
        .chain(self.rhs.iter().map(|&rhs| vec![!self.lhs, !rhs]))
        .collect()
    }
}

/// Draws the equality constraints and AND-gates which connect the layers of a plan.
#[derive(Debug)]
pub(crate) struct ConstraintInjector<'plan> {
    plan: &'plan LayerPlan,
}

impl<'plan> ConstraintInjector<'plan> {
    pub(crate) fn new(plan: &'plan LayerPlan) -> Self {
        ConstraintInjector { plan }
    }

    /// Picks a variable uniformly in a uniformly picked layer.
    fn pick_variable(&self, rng: &mut impl Random) -> Variable {
        let layer_id = LayerId::create_from_index(rng.generate_index(self.plan.num_layers()));
        self.plan.layer(layer_id).pick_variable(rng)
    }

    /// Both variables are picked again whenever they coincide.
    pub(crate) fn equality(
        &self,
        marks: &mut MarkSet,
        rng: &mut impl Random,
    ) -> EqualityConstraint {
        cnfuzz_assert_simple!(marks.is_empty());

        let (first, second) = loop {
            let first = self.pick_variable(rng);
            let second = self.pick_variable(rng);

            let _ = marks.try_mark(first);
            let distinct = marks.try_mark(second);
            marks.clear();

            if distinct {
                break (first, second);
            }
        };

        EqualityConstraint {
            k: Literal::new(first, rng.flip_coin()),
            l: Literal::new(second, rng.flip_coin()),
        }
    }

    pub(crate) fn and_gate(
        &self,
        arity: u32,
        marks: &mut MarkSet,
        rng: &mut impl Random,
    ) -> AndGate {
        cnfuzz_assert_simple!(marks.is_empty());
        cnfuzz_assert_simple!(
            (2..=MAX_AND_GATE_ARITY).contains(&arity),
            "AND-gate arity {arity} is out of bounds"
        );

        let lhs_variable = self.pick_variable(rng);
        let _ = marks.try_mark(lhs_variable);
        let lhs = Literal::new(lhs_variable, rng.flip_coin());

        let rhs = (0..arity)
            .map(|_| {
                let variable = loop {
                    let candidate = self.pick_variable(rng);
                    if marks.try_mark(candidate) {
                        break candidate;
                    }
                };
                Literal::new(variable, rng.flip_coin())
            })
            .collect();

        marks.clear();

        AndGate { lhs, rhs }
    }
}
