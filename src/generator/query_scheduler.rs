use log::debug;
use log::trace;

use crate::basic_types::Literal;
use crate::basic_types::Random;
use crate::basic_types::Variable;
use crate::cnfuzz_assert_moderate;

/// Tuning stops once the expected number of queries is at most this.
pub(crate) const MAX_EXPECTED_QUERIES: f64 = 1000.0;
/// Upper bound for the initial draw of the number of queries per block.
const MAX_QUERIES_PER_BLOCK: u32 = 100;

/// The queries emitted after a clause, all drawn from the same set of assumptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct QueryBlock {
    pub(crate) assumptions: Vec<Literal>,
    pub(crate) queries: Vec<Vec<Literal>>,
}

/// Decides when assumption queries are interleaved with the clauses of an incremental formula.
#[derive(Clone, Debug)]
pub(crate) struct QueryScheduler {
    num_variables: u32,
    clauses_emitted: u64,
    /// A block of queries follows every `cadence`-th clause; zero disables queries.
    cadence: u64,
    max_assumptions: u32,
    max_queries_per_block: u32,
}

/// `(1 + x) / 2`, the mean of a uniform draw in `[1, x]`.
fn avg(x: f64) -> f64 {
    (1.0 + x) / 2.0
}

impl QueryScheduler {
    pub(crate) fn with_parameters(
        num_variables: u32,
        cadence: u64,
        max_assumptions: u32,
        max_queries_per_block: u32,
    ) -> QueryScheduler {
        cnfuzz_assert_moderate!(max_assumptions >= 1 && max_assumptions <= num_variables);
        cnfuzz_assert_moderate!(max_queries_per_block >= 1);

        QueryScheduler {
            num_variables,
            clauses_emitted: 0,
            cadence,
            max_assumptions,
            max_queries_per_block,
        }
    }

    /// Draws the cadence, the assumption cap and the number of queries per block, then trades
    /// off block frequency against block size until the expected number of queries over
    /// `num_clauses` clauses is at most [`MAX_EXPECTED_QUERIES`].
    pub(crate) fn tune(
        num_variables: u32,
        num_clauses: u64,
        rng: &mut impl Random,
    ) -> QueryScheduler {
        let clause_bound = u32::try_from(num_clauses).unwrap_or(u32::MAX);
        let cadence = u64::from(rng.generate_u32_in_range(0, clause_bound));
        let max_queries_per_block = rng.generate_u32_in_range(1, MAX_QUERIES_PER_BLOCK);
        let max_assumptions = rng.generate_u32_in_range(1, num_variables);

        let mut scheduler = QueryScheduler::with_parameters(
            num_variables,
            cadence,
            max_assumptions,
            max_queries_per_block,
        );

        while scheduler.cadence != 0
            && scheduler.expected_queries(num_clauses) > MAX_EXPECTED_QUERIES
        {
            let can_slow_down = scheduler.cadence < num_clauses;
            let can_shrink = scheduler.max_queries_per_block > 1;

            let slow_down = match (can_slow_down, can_shrink) {
                (true, true) => rng.flip_coin(),
                (true, false) => true,
                (false, true) => false,
                (false, false) => break,
            };

            if slow_down {
                scheduler.cadence += 1;
            } else {
                scheduler.max_queries_per_block -= 1;
            }
        }

        debug!(
            "Incremental queries every {} clauses, at most {} queries per block with at most {} assumptions (expected {:.1} queries)",
            scheduler.cadence,
            scheduler.max_queries_per_block,
            scheduler.max_assumptions,
            scheduler.expected_queries(num_clauses)
        );

        scheduler
    }

    pub(crate) fn cadence(&self) -> u64 {
        self.cadence
    }

    pub(crate) fn max_assumptions(&self) -> u32 {
        self.max_assumptions
    }

    pub(crate) fn max_queries_per_block(&self) -> u32 {
        self.max_queries_per_block
    }

    /// `avg(blocks) * avg(max_queries_per_block)`, where there are `num_clauses / cadence`
    /// blocks.
    pub(crate) fn expected_queries(&self, num_clauses: u64) -> f64 {
        let blocks = if self.cadence == 0 {
            0
        } else {
            num_clauses / self.cadence
        };

        avg(blocks as f64) * avg(f64::from(self.max_queries_per_block))
    }

    /// Called after every emitted clause; returns the queries that have to follow it.
    pub(crate) fn on_clause_emitted(&mut self, rng: &mut impl Random) -> Option<QueryBlock> {
        self.clauses_emitted += 1;

        if self.cadence == 0 || self.clauses_emitted % self.cadence != 0 {
            return None;
        }

        let num_assumptions = rng.generate_u32_in_range(1, self.max_assumptions);
        let assumptions = (0..num_assumptions)
            .map(|_| {
                let variable = Variable::new(rng.generate_u32_in_range(1, self.num_variables));
                Literal::new(variable, rng.flip_coin())
            })
            .collect::<Vec<_>>();

        let num_queries = rng.generate_u32_in_range(1, self.max_queries_per_block);
        let queries = (0..num_queries)
            .map(|_| {
                assumptions
                    .iter()
                    .filter_map(|&assumption| {
                        if !rng.flip_coin() {
                            return None;
                        }

                        if rng.one_in(10) {
                            Some(!assumption)
                        } else {
                            Some(assumption)
                        }
                    })
                    .collect()
            })
            .collect();

        trace!(
            "Query block after clause {} with {num_assumptions} assumptions and {num_queries} queries",
            self.clauses_emitted
        );

        Some(QueryBlock {
            assumptions,
            queries,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::QueryScheduler;
    use super::MAX_EXPECTED_QUERIES;
    use crate::basic_types::tests::TestRandom;
    use crate::basic_types::Literal;
    use crate::basic_types::Variable;

    #[test]
    fn zero_cadence_never_emits_queries() {
        let mut scheduler = QueryScheduler::with_parameters(20, 0, 5, 5);
        let mut rng = TestRandom::default();

        for _ in 0..50 {
            assert!(scheduler.on_clause_emitted(&mut rng).is_none());
        }
        assert_eq!(scheduler.expected_queries(50), 0.5 * 3.0);
    }

    #[test]
    fn every_cadence_clauses_trigger_a_block() {
        let mut scheduler = QueryScheduler::with_parameters(30, 10, 4, 5);
        let mut rng = SmallRng::seed_from_u64(42);

        let blocks = (0..100)
            .filter_map(|_| scheduler.on_clause_emitted(&mut rng))
            .collect::<Vec<_>>();

        assert_eq!(blocks.len(), 10);
        for block in blocks {
            assert!((1..=5).contains(&block.queries.len()));
            assert!((1..=4).contains(&block.assumptions.len()));
            for query in &block.queries {
                assert!(query.len() <= block.assumptions.len());
                assert!(query
                    .iter()
                    .all(|l| block.assumptions.iter().any(|a| a.variable() == l.variable())));
            }
        }
    }

    #[test]
    fn queries_are_subsets_with_occasional_sign_flips() {
        let mut scheduler = QueryScheduler::with_parameters(10, 1, 3, 2);
        let mut rng = TestRandom::with_integers([
            2, // assumptions
            4, 1, // +4
            7, 0, // -7
            2, // queries
            1, 1, // keep +4
            1, 5, // keep -7 with its original sign
            0, // drop +4
            1, 0, // keep -7 but flip it
        ]);

        let block = scheduler
            .on_clause_emitted(&mut rng)
            .expect("a cadence of one triggers on every clause");

        let pos = |v| Literal::positive(Variable::new(v));
        let neg = |v| Literal::negative(Variable::new(v));

        assert_eq!(block.assumptions, vec![pos(4), neg(7)]);
        assert_eq!(block.queries, vec![vec![pos(4), neg(7)], vec![pos(7)]]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn tuning_bounds_the_expected_number_of_queries() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let num_clauses = 30 + seed * 97;

            let scheduler = QueryScheduler::tune(50, num_clauses, &mut rng);

            assert!(scheduler.cadence() <= num_clauses);
            assert!((1..=100).contains(&scheduler.max_queries_per_block()));
            assert!((1..=50).contains(&scheduler.max_assumptions()));
            if scheduler.cadence() != 0 {
                assert!(scheduler.expected_queries(num_clauses) <= MAX_EXPECTED_QUERIES);
            }
        }
    }

    #[test]
    fn tuning_only_slows_down_when_blocks_cannot_shrink() {
        // 3000 blocks of a single query: 1500.5 expected, a cadence of 2 halves that
        let mut rng = TestRandom::with_integers([1, 1, 3]);

        let scheduler = QueryScheduler::tune(10, 3000, &mut rng);

        assert_eq!(scheduler.cadence(), 2);
        assert_eq!(scheduler.max_queries_per_block(), 1);
        assert_eq!(scheduler.max_assumptions(), 3);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn tuning_leaves_cheap_schedules_alone() {
        let mut rng = TestRandom::with_integers([100, 100, 3]);

        let scheduler = QueryScheduler::tune(10, 100, &mut rng);

        assert_eq!(scheduler.cadence(), 100);
        assert_eq!(scheduler.max_queries_per_block(), 100);
        assert!(rng.is_exhausted());
    }
}
