use crate::basic_types::KeyedVec;
use crate::basic_types::Literal;
use crate::basic_types::Random;
use crate::cnfuzz_assert_advanced;
use crate::generator::Layer;
use crate::generator::LayerId;
use crate::generator::LayerPlan;

/// The literals of a single layer which have not been placed in any clause yet.
///
/// Literals are handed out in a random order until the pool is empty; it is never refilled.
#[derive(Clone, Debug)]
pub(crate) struct DiversityPool {
    literals: Vec<Literal>,
}

impl DiversityPool {
    pub(crate) fn new(layer: &Layer) -> DiversityPool {
        let literals = layer
            .variables()
            .flat_map(|variable| [Literal::positive(variable), Literal::negative(variable)])
            .collect();

        DiversityPool { literals }
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Removes a uniformly random literal from the pool, or returns `None` if it is exhausted.
    pub(crate) fn draw(&mut self, rng: &mut impl Random) -> Option<Literal> {
        if self.literals.is_empty() {
            return None;
        }

        let index = rng.generate_index(self.literals.len());
        Some(self.literals.swap_remove(index))
    }
}

/// One [`DiversityPool`] per layer of a [`LayerPlan`].
#[derive(Clone, Debug)]
pub(crate) struct LiteralPools {
    pools: KeyedVec<LayerId, DiversityPool>,
}

impl LiteralPools {
    pub(crate) fn new(plan: &LayerPlan) -> LiteralPools {
        LiteralPools {
            pools: plan.layers().map(DiversityPool::new).collect(),
        }
    }

    pub(crate) fn pool(&self, layer_id: LayerId) -> &DiversityPool {
        &self.pools[layer_id]
    }

    /// Takes a literal from the pool of `layer`; once that pool is exhausted a variable of the
    /// layer is drawn uniformly and given a random sign.
    pub(crate) fn draw_or_fallback(&mut self, layer: &Layer, rng: &mut impl Random) -> Literal {
        let literal = match self.pools[layer.id()].draw(rng) {
            Some(literal) => literal,
            None => Literal::new(layer.pick_variable(rng), rng.flip_coin()),
        };

        cnfuzz_assert_advanced!(layer.contains(literal.variable()));
        literal
    }
}
