use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::RangeInclusive;

use log::debug;

use crate::basic_types::KeyedVec;
use crate::basic_types::Random;
use crate::basic_types::StorageKey;
use crate::basic_types::Variable;
use crate::cnfuzz_assert_simple;
use crate::options::SizeProfile;

/// The smallest width a layer can have.
pub(crate) const MIN_LAYER_WIDTH: u32 = 10;
/// Bounds (in percent) of the clause-to-variable ratio of a layer.
pub(crate) const CLAUSE_RATIO_PERCENT: RangeInclusive<u32> = 300..=450;
/// No clause may contain more literals than this.
pub(crate) const MAX_CLAUSE_LENGTH: u32 = 20;
/// The number of right-hand side literals of an AND-gate is bounded by this.
pub(crate) const MAX_AND_GATE_ARITY: u32 = MAX_CLAUSE_LENGTH - 1;
/// Upper bound for the number of equality constraints and the number of AND-gates.
const MAX_STRUCTURAL_CONSTRAINTS: u32 = 99;

/// Identifies a [`Layer`] within a [`LayerPlan`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LayerId(usize);

impl LayerId {
    /// The layer directly below this one, if there is one.
    pub(crate) fn previous(self) -> Option<LayerId> {
        self.0.checked_sub(1).map(LayerId)
    }
}

impl StorageKey for LayerId {
    fn index(&self) -> usize {
        self.0
    }

    fn create_from_index(index: usize) -> Self {
        LayerId(index)
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The quantifier of a layer when generating a QBF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    Universal,
    Existential,
}

impl Quantifier {
    pub(crate) fn opposite(self) -> Quantifier {
        match self {
            Quantifier::Universal => Quantifier::Existential,
            Quantifier::Existential => Quantifier::Universal,
        }
    }

    /// The prefix tag used in QDIMACS files.
    pub fn tag(self) -> char {
        match self {
            Quantifier::Universal => 'a',
            Quantifier::Existential => 'e',
        }
    }
}

/// A contiguous block of variables with its own clause density.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    id: LayerId,
    low: u32,
    high: u32,
    /// The width of this layer plus the width of the layer below it.
    num_local_variables: u32,
    ratio_percent: u32,
    num_clauses: u32,
    quantifier: Option<Quantifier>,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn low(&self) -> Variable {
        Variable::new(self.low)
    }

    pub fn high(&self) -> Variable {
        Variable::new(self.high)
    }

    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    pub fn num_local_variables(&self) -> u32 {
        self.num_local_variables
    }

    pub fn ratio_percent(&self) -> u32 {
        self.ratio_percent
    }

    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        self.quantifier
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (self.low..=self.high).map(Variable::new)
    }

    pub fn contains(&self, variable: Variable) -> bool {
        (self.low..=self.high).contains(&variable.index())
    }

    /// Draws a variable of this layer uniformly at random.
    pub(crate) fn pick_variable(&self, rng: &mut impl Random) -> Variable {
        Variable::new(rng.generate_u32_in_range(self.low, self.high))
    }
}

/// The parameters of a single formula, fixed before any clause is generated.
#[derive(Clone, Debug)]
pub struct LayerPlan {
    width_bound: u32,
    layers: KeyedVec<LayerId, Layer>,
    num_equalities: u32,
    and_gate_arities: Vec<u32>,
    is_forced_propositional: bool,
}

impl LayerPlan {
    /// Draws a plan: the layer widths and clause ratios, the structural constraints and, when
    /// `quantified` is set, the quantifiers of the layers.
    pub fn sample(rng: &mut impl Random, profile: SizeProfile, quantified: bool) -> LayerPlan {
        let width_bound = rng.generate_u32_in_range(MIN_LAYER_WIDTH, profile.max_width_bound());
        let num_layers = rng.generate_u32_in_range(1, profile.max_num_layers());

        let layer_parameters = (0..num_layers)
            .map(|_| {
                let width = rng.generate_u32_in_range(MIN_LAYER_WIDTH, width_bound);
                let ratio = rng.generate_u32_in_range(
                    *CLAUSE_RATIO_PERCENT.start(),
                    *CLAUSE_RATIO_PERCENT.end(),
                );
                (width, ratio)
            })
            .collect::<Vec<_>>();

        let num_equalities = if rng.one_in(3) {
            rng.generate_u32_in_range(0, MAX_STRUCTURAL_CONSTRAINTS)
        } else {
            0
        };

        let num_and_gates = if rng.flip_coin() {
            rng.generate_u32_in_range(0, MAX_STRUCTURAL_CONSTRAINTS)
        } else {
            0
        };

        let mut plan = LayerPlan::from_layer_parameters(
            width_bound,
            &layer_parameters,
            num_equalities,
            Vec::new(),
        );

        let max_arity = plan.max_and_gate_arity();
        plan.and_gate_arities = (0..num_and_gates)
            .map(|_| rng.generate_u32_in_range(2, max_arity))
            .collect();

        if quantified {
            plan.assign_quantifiers(rng);
        }

        debug!(
            "Planned {} layers over {} variables with {} clauses",
            plan.num_layers(),
            plan.num_variables(),
            plan.num_clauses()
        );

        plan
    }

    /// Builds a plan from explicit `(width, ratio_percent)` pairs, one per layer.
    ///
    /// Panics if a width lies outside of `[MIN_LAYER_WIDTH, width_bound]`, a ratio outside of
    /// [`CLAUSE_RATIO_PERCENT`], or an arity exceeds what the last layer can hold.
    pub fn from_layer_parameters(
        width_bound: u32,
        layer_parameters: &[(u32, u32)],
        num_equalities: u32,
        and_gate_arities: Vec<u32>,
    ) -> LayerPlan {
        cnfuzz_assert_simple!(
            !layer_parameters.is_empty(),
            "a plan needs at least one layer"
        );

        let mut layers: KeyedVec<LayerId, Layer> = KeyedVec::default();
        let mut next_low = 1;
        let mut previous_width = 0;

        for &(width, ratio_percent) in layer_parameters {
            cnfuzz_assert_simple!(
                (MIN_LAYER_WIDTH..=width_bound).contains(&width),
                "layer width {width} is outside of [{MIN_LAYER_WIDTH}, {width_bound}]"
            );
            cnfuzz_assert_simple!(
                CLAUSE_RATIO_PERCENT.contains(&ratio_percent),
                "clause ratio {ratio_percent}% is outside of {CLAUSE_RATIO_PERCENT:?}"
            );

            let num_local_variables = width + previous_width;
            let num_clauses = (ratio_percent * num_local_variables + 50) / 100;

            let _ = layers.push(Layer {
                id: LayerId::create_from_index(layers.len()),
                low: next_low,
                high: next_low + width - 1,
                num_local_variables,
                ratio_percent,
                num_clauses,
                quantifier: None,
            });

            next_low += width;
            previous_width = width;
        }

        let plan = LayerPlan {
            width_bound,
            layers,
            num_equalities,
            and_gate_arities,
            is_forced_propositional: false,
        };

        cnfuzz_assert_simple!(num_equalities <= MAX_STRUCTURAL_CONSTRAINTS);
        cnfuzz_assert_simple!(plan.and_gate_arities.len() <= MAX_STRUCTURAL_CONSTRAINTS as usize);
        let max_arity = plan.max_and_gate_arity();
        cnfuzz_assert_simple!(
            plan.and_gate_arities
                .iter()
                .all(|&arity| (2..=max_arity).contains(&arity)),
            "and-gate arities {:?} exceed [2, {max_arity}]",
            plan.and_gate_arities
        );

        plan
    }

    /// Layer 0 draws universal, none or existential; every other layer alternates with the
    /// layer below it, where none counts as existential.
    fn assign_quantifiers(&mut self, rng: &mut impl Random) {
        self.is_forced_propositional = rng.one_in(4);
        if self.is_forced_propositional {
            debug!("Quantified mode forced to be propositional");
            return;
        }

        let mut previous = match rng.generate_u32_in_range(0, 2) {
            0 => Some(Quantifier::Universal),
            1 => None,
            _ => Some(Quantifier::Existential),
        };

        for layer_id in self.layers.keys().collect::<Vec<_>>() {
            if layer_id.index() > 0 {
                previous = Some(previous.unwrap_or(Quantifier::Existential).opposite());
            }
            self.layers[layer_id].quantifier = previous;
        }
    }

    /// Half the local variable count of the last layer, capped such that an AND-gate clause
    /// never exceeds [`MAX_CLAUSE_LENGTH`].
    pub(crate) fn max_and_gate_arity(&self) -> u32 {
        let last = self.layers.last().map_or(0, Layer::num_local_variables);
        (last / 2).clamp(2, MAX_AND_GATE_ARITY)
    }

    pub fn width_bound(&self) -> u32 {
        self.width_bound
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn layer(&self, layer_id: LayerId) -> &Layer {
        &self.layers[layer_id]
    }

    pub fn num_equalities(&self) -> u32 {
        self.num_equalities
    }

    pub fn and_gate_arities(&self) -> &[u32] {
        &self.and_gate_arities
    }

    pub fn is_forced_propositional(&self) -> bool {
        self.is_forced_propositional
    }

    pub fn num_variables(&self) -> u32 {
        self.layers.last().map_or(0, |layer| layer.high)
    }

    /// The number of clauses the generated formula will contain: the layer clauses, two per
    /// equality and `arity + 1` per AND-gate.
    pub fn num_clauses(&self) -> u64 {
        let layer_clauses: u64 = self.layers.iter().map(|l| u64::from(l.num_clauses)).sum();
        let equality_clauses = 2 * u64::from(self.num_equalities);
        let and_gate_clauses: u64 = self
            .and_gate_arities
            .iter()
            .map(|&arity| u64::from(arity) + 1)
            .sum();

        layer_clauses + equality_clauses + and_gate_clauses
    }
}
