use crate::basic_types::Literal;
use crate::basic_types::Random;
use crate::cnfuzz_assert_advanced;
use crate::cnfuzz_assert_simple;
use crate::generator::diversity_pool::LiteralPools;
use crate::generator::layer_plan::MAX_CLAUSE_LENGTH;
use crate::generator::mark_set::MarkSet;
use crate::generator::LayerId;
use crate::generator::LayerPlan;

/// Every clause has at least this many literals.
const MIN_CLAUSE_LENGTH: u32 = 3;

/// Builds the clauses of the layers, drawing literals through the [`LiteralPools`].
#[derive(Debug)]
pub(crate) struct ClauseSynthesiser<'plan> {
    plan: &'plan LayerPlan,
}

impl<'plan> ClauseSynthesiser<'plan> {
    pub(crate) fn new(plan: &'plan LayerPlan) -> Self {
        ClauseSynthesiser { plan }
    }

    /// Generates one clause whose home layer is `home`.
    ///
    /// Literals are drawn from `home` or, after drifting, from a layer below it. A literal over a
    /// variable which is already in the clause is discarded and the draw is repeated.
    pub(crate) fn synthesise(
        &self,
        home: LayerId,
        pools: &mut LiteralPools,
        marks: &mut MarkSet,
        rng: &mut impl Random,
    ) -> Vec<Literal> {
        cnfuzz_assert_simple!(marks.is_empty());

        let length = self.sample_length(home, rng);
        let mut clause = Vec::with_capacity(length as usize);

        while clause.len() < length as usize {
            let layer = self.plan.layer(drift(home, rng));
            let literal = pools.draw_or_fallback(layer, rng);

            if marks.try_mark(literal.variable()) {
                clause.push(literal);
            }
        }

        marks.clear();

        cnfuzz_assert_advanced!(clause.len() <= MAX_CLAUSE_LENGTH as usize);
        clause
    }

    /// Starting from [`MIN_CLAUSE_LENGTH`], the length grows by one with probability 2/3 until
    /// the first failure or until the ceiling is reached.
    ///
    /// The ceiling is [`MAX_CLAUSE_LENGTH`], lowered to the number of variables reachable from
    /// `home` so that the clause can always be completed. Layers are at least
    /// [`MIN_LAYER_WIDTH`](crate::generator::layer_plan::MIN_LAYER_WIDTH) wide, so the ceiling
    /// never drops below [`MIN_CLAUSE_LENGTH`].
    fn sample_length(&self, home: LayerId, rng: &mut impl Random) -> u32 {
        let reachable = self.plan.layer(home).high().index();
        let ceiling = MAX_CLAUSE_LENGTH.min(reachable);
        cnfuzz_assert_simple!(ceiling >= MIN_CLAUSE_LENGTH);

        let mut length = MIN_CLAUSE_LENGTH;
        while length < ceiling && !rng.one_in(3) {
            length += 1;
        }

        length
    }
}

/// Moves down from `home` one layer at a time, each step taken with probability 1/2.
pub(crate) fn drift(home: LayerId, rng: &mut impl Random) -> LayerId {
    let mut current = home;

    while let Some(previous) = current.previous() {
        if !rng.flip_coin() {
            break;
        }
        current = previous;
    }

    current
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::drift;
    use super::ClauseSynthesiser;
    use crate::basic_types::tests::TestRandom;
    use crate::basic_types::Literal;
    use crate::basic_types::StorageKey;
    use crate::basic_types::Variable;
    use crate::generator::diversity_pool::LiteralPools;
    use crate::generator::mark_set::MarkSet;
    use crate::generator::LayerId;
    use crate::generator::LayerPlan;

    #[test]
    fn drift_stops_at_the_first_failed_coin() {
        let mut rng = TestRandom::with_integers([1, 1, 0]);

        assert_eq!(drift(LayerId::create_from_index(4), &mut rng).index(), 2);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn drift_never_goes_below_the_first_layer() {
        let mut rng = TestRandom::with_integers([1, 1]);

        assert_eq!(drift(LayerId::create_from_index(2), &mut rng).index(), 0);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn drift_from_the_first_layer_draws_nothing() {
        let mut rng = TestRandom::default();

        assert_eq!(drift(LayerId::create_from_index(0), &mut rng).index(), 0);
    }

    #[test]
    fn length_stops_when_one_in_three_hits() {
        let plan = LayerPlan::from_layer_parameters(30, &[(30, 300)], 0, vec![]);
        let synthesiser = ClauseSynthesiser::new(&plan);
        let mut rng = TestRandom::with_integers([2, 1, 0]);

        assert_eq!(synthesiser.sample_length(LayerId::create_from_index(0), &mut rng), 5);
    }

    #[test]
    fn length_is_capped_by_the_reachable_variables() {
        let plan = LayerPlan::from_layer_parameters(10, &[(10, 300)], 0, vec![]);
        let synthesiser = ClauseSynthesiser::new(&plan);
        let mut rng = TestRandom::with_integers([1; 7]);

        assert_eq!(synthesiser.sample_length(LayerId::create_from_index(0), &mut rng), 10);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn duplicate_variables_are_redrawn() {
        let plan = LayerPlan::from_layer_parameters(10, &[(10, 300)], 0, vec![]);
        let synthesiser = ClauseSynthesiser::new(&plan);
        let mut pools = LiteralPools::new(&plan);
        let mut marks = MarkSet::default();

        // Length 3, then pool indices. The pool starts as [+1, -1, +2, -2, ..., +10, -10].
        let mut rng = TestRandom::with_integers([
            0, // stop at length 3
            0, // +1, then -10 moves to index 0
            1, // -1 is discarded, then +10 moves to index 1
            0, // -10, then -9 moves to index 0
            0, // -9
        ]);

        let home = LayerId::create_from_index(0);
        let clause = synthesiser.synthesise(home, &mut pools, &mut marks, &mut rng);

        assert_eq!(
            clause,
            vec![
                Literal::positive(Variable::new(1)),
                Literal::negative(Variable::new(10)),
                Literal::negative(Variable::new(9)),
            ]
        );
        assert!(marks.is_empty());
        assert!(rng.is_exhausted());
    }

    #[test]
    fn clauses_never_repeat_a_variable() {
        let plan = LayerPlan::from_layer_parameters(
            20,
            &[(10, 300), (20, 450), (12, 300)],
            0,
            vec![],
        );
        let synthesiser = ClauseSynthesiser::new(&plan);
        let mut pools = LiteralPools::new(&plan);
        let mut marks = MarkSet::default();
        let mut rng = SmallRng::seed_from_u64(3);

        for layer in plan.layers() {
            for _ in 0..layer.num_clauses() {
                let clause = synthesiser.synthesise(layer.id(), &mut pools, &mut marks, &mut rng);

                let mut variables = clause.iter().map(|l| l.variable()).collect::<Vec<_>>();
                variables.sort();
                variables.dedup();

                assert_eq!(variables.len(), clause.len());
                assert!((3..=20).contains(&clause.len()));
                assert!(clause.iter().all(|l| l.variable() <= layer.high()));
            }
        }
    }
}
