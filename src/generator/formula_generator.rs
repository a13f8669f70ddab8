use log::debug;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::Literal;
use crate::basic_types::Random;
use crate::cnfuzz_assert_advanced;
use crate::generator::clause_synthesiser::ClauseSynthesiser;
use crate::generator::constraint_injector::ConstraintInjector;
use crate::generator::diversity_pool::LiteralPools;
use crate::generator::mark_set::MarkSet;
use crate::generator::quantifier_prefix::quantifier_blocks;
use crate::generator::query_scheduler::QueryScheduler;
use crate::generator::LayerPlan;
use crate::option_file::fuzz_options;
use crate::option_file::FuzzedOption;
use crate::option_file::OptionSpec;
use crate::options::GeneratorOptions;
use crate::output::FormulaSink;
use crate::result::GeneratorError;
use crate::result::GeneratorResult;

/// What was written by [`FormulaGenerator::generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationSummary {
    pub num_variables: u32,
    pub num_clauses: u64,
    pub num_queries: u64,
}

/// Generates one layered formula. All random decisions are drawn from a single generator, in a
/// fixed order, so a seed and a set of options always yield the same formula.
#[derive(Debug)]
pub struct FormulaGenerator<R> {
    rng: R,
    seed: Option<u32>,
    plan: LayerPlan,
    incremental: bool,
    fuzzed_options: Vec<FuzzedOption>,
}

impl FormulaGenerator<SmallRng> {
    /// Seeds the generator, fuzzes the given options and plans the formula.
    pub fn new(options: &GeneratorOptions, option_specs: &[OptionSpec]) -> Self {
        let mut rng = SmallRng::seed_from_u64(u64::from(options.seed));

        let fuzzed_options = fuzz_options(option_specs, &mut rng);
        let plan = LayerPlan::sample(&mut rng, options.profile, options.quantified);

        FormulaGenerator {
            rng,
            seed: Some(options.seed),
            plan,
            incremental: options.incremental,
            fuzzed_options,
        }
    }
}

impl<R: Random> FormulaGenerator<R> {
    /// Generates a formula from a fixed plan; all further random decisions are taken from `rng`.
    pub fn with_plan(plan: LayerPlan, rng: R, incremental: bool) -> Self {
        FormulaGenerator {
            rng,
            seed: None,
            plan,
            incremental,
            fuzzed_options: vec![],
        }
    }

    pub fn plan(&self) -> &LayerPlan {
        &self.plan
    }

    /// Streams the formula into `sink`: the annotations, the quantifier prefix, the header, and
    /// then the clauses of every layer followed by the equalities and the AND-gates.
    pub fn generate(mut self, sink: &mut impl FormulaSink) -> GeneratorResult<GenerationSummary> {
        self.annotate(sink)?;

        let planned_clauses = self.plan.num_clauses();
        let num_variables = self.plan.num_variables();

        let scheduler = if self.incremental {
            let scheduler = QueryScheduler::tune(num_variables, planned_clauses, &mut self.rng);
            sink.annotation(&format!(
                "incremental cadence {} max assumptions {} max queries {}",
                scheduler.cadence(),
                scheduler.max_assumptions(),
                scheduler.max_queries_per_block()
            ))?;
            Some(scheduler)
        } else {
            None
        };

        for block in quantifier_blocks(&self.plan) {
            sink.quantifier_block(&block)?;
        }

        sink.header(num_variables, planned_clauses)?;

        let mut emitter = ClauseEmitter {
            sink,
            scheduler,
            num_variables,
            num_clauses: 0,
            num_queries: 0,
        };

        let mut pools = LiteralPools::new(&self.plan);
        let mut marks = MarkSet::default();

        let synthesiser = ClauseSynthesiser::new(&self.plan);
        for layer in self.plan.layers() {
            for _ in 0..layer.num_clauses() {
                let clause =
                    synthesiser.synthesise(layer.id(), &mut pools, &mut marks, &mut self.rng);
                emitter.emit(&clause, &mut self.rng)?;
            }
        }

        debug!(
            "{} of {} diversity pools exhausted, {} literals never used",
            self.plan
                .layers()
                .filter(|layer| pools.pool(layer.id()).is_empty())
                .count(),
            self.plan.num_layers(),
            self.plan
                .layers()
                .map(|layer| pools.pool(layer.id()).len())
                .sum::<usize>()
        );

        let injector = ConstraintInjector::new(&self.plan);
        for _ in 0..self.plan.num_equalities() {
            let equality = injector.equality(&mut marks, &mut self.rng);
            for clause in equality.clauses() {
                emitter.emit(&clause, &mut self.rng)?;
            }
        }

        for &arity in self.plan.and_gate_arities() {
            let gate = injector.and_gate(arity, &mut marks, &mut self.rng);
            for clause in gate.clauses() {
                emitter.emit(&clause, &mut self.rng)?;
            }
        }

        if self.incremental {
            emitter.sink.query(&[])?;
            emitter.num_queries += 1;
        }

        emitter.sink.finish()?;

        check_clause_count(planned_clauses, emitter.num_clauses)?;

        info!(
            "Generated {} clauses over {} variables with {} queries",
            emitter.num_clauses, num_variables, emitter.num_queries
        );

        Ok(GenerationSummary {
            num_variables,
            num_clauses: emitter.num_clauses,
            num_queries: emitter.num_queries,
        })
    }

    fn annotate(&self, sink: &mut impl FormulaSink) -> std::io::Result<()> {
        if let Some(seed) = self.seed {
            sink.annotation(&format!("seed {seed}"))?;
        }

        for option in &self.fuzzed_options {
            sink.annotation(&option.to_string())?;
        }

        let plan = &self.plan;
        sink.annotation(&format!("max width {}", plan.width_bound()))?;
        sink.annotation(&format!("layers {}", plan.num_layers()))?;
        sink.annotation(&format!("eqs {}", plan.num_equalities()))?;
        sink.annotation(&format!("ands {}", plan.and_gate_arities().len()))?;
        if plan.is_forced_propositional() {
            sink.annotation("forced propositional")?;
        }

        for layer in plan.layers() {
            let quantifier = layer.quantifier().map_or('-', |quantifier| quantifier.tag());
            sink.annotation(&format!(
                "layer[{}] = [{}..{}] w={} v={} c={} r={:.2} q={}",
                layer.id(),
                layer.low(),
                layer.high(),
                layer.width(),
                layer.num_local_variables(),
                layer.num_clauses(),
                f64::from(layer.ratio_percent()) / 100.0,
                quantifier
            ))?;
        }

        debug!(
            "Annotated a plan with {} layers and {} clauses",
            plan.num_layers(),
            plan.num_clauses()
        );

        Ok(())
    }
}

/// Counts the clauses written to the sink and lets the scheduler follow them with queries.
struct ClauseEmitter<'sink, Sink> {
    sink: &'sink mut Sink,
    scheduler: Option<QueryScheduler>,
    num_variables: u32,
    num_clauses: u64,
    num_queries: u64,
}

impl<Sink: FormulaSink> ClauseEmitter<'_, Sink> {
    fn emit(&mut self, clause: &[Literal], rng: &mut impl Random) -> std::io::Result<()> {
        cnfuzz_assert_advanced!(
            has_distinct_variables(clause),
            "clause {clause:?} repeats a variable"
        );
        cnfuzz_assert_advanced!(clause
            .iter()
            .all(|literal| literal.variable().index() <= self.num_variables));

        self.sink.clause(clause)?;
        self.num_clauses += 1;

        let block = self
            .scheduler
            .as_mut()
            .and_then(|scheduler| scheduler.on_clause_emitted(rng));

        if let Some(block) = block {
            for query in &block.queries {
                cnfuzz_assert_advanced!(query.iter().all(|literal| block
                    .assumptions
                    .iter()
                    .any(|assumption| assumption.variable() == literal.variable())));

                self.sink.query(query)?;
                self.num_queries += 1;
            }
        }

        Ok(())
    }
}

fn has_distinct_variables(clause: &[Literal]) -> bool {
    clause.iter().enumerate().all(|(index, literal)| {
        clause[index + 1..]
            .iter()
            .all(|other| other.variable() != literal.variable())
    })
}

/// The header promises `planned` clauses, so emitting any other number is a defect.
fn check_clause_count(planned: u64, emitted: u64) -> GeneratorResult<()> {
    if emitted != planned {
        return Err(GeneratorError::ClauseCountMismatch { planned, emitted });
    }

    Ok(())
}
