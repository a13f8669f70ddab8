use crate::basic_types::Variable;
use crate::generator::LayerPlan;
use crate::generator::Quantifier;

/// One line of a QBF prefix: all variables of a single layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantifierBlock {
    pub quantifier: Quantifier,
    pub variables: Vec<Variable>,
}

/// The prefix blocks of `plan`, innermost last. Layers without a quantifier are free and do not
/// show up in the prefix.
pub(crate) fn quantifier_blocks(plan: &LayerPlan) -> Vec<QuantifierBlock> {
    if plan.is_forced_propositional() {
        return vec![];
    }

    plan.layers()
        .filter_map(|layer| {
            layer.quantifier().map(|quantifier| QuantifierBlock {
                quantifier,
                variables: layer.variables().collect(),
            })
        })
        .collect()
}
