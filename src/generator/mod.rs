//! The formula-synthesis engine.
//!
//! A [`LayerPlan`] fixes the layers, their clause counts and the structural constraints up front.
//! The [`FormulaGenerator`] then draws the clauses layer by layer through per-layer diversity
//! pools, adds the equality constraints and AND-gates, and, for incremental formulas, lets the
//! query scheduler interleave assumption queries.
mod clause_synthesiser;
mod constraint_injector;
mod diversity_pool;
mod formula_generator;
mod layer_plan;
mod mark_set;
mod quantifier_prefix;
mod query_scheduler;
#[cfg(test)]
pub(crate) mod test_helper;

pub use formula_generator::FormulaGenerator;
pub use formula_generator::GenerationSummary;
pub use layer_plan::Layer;
pub use layer_plan::LayerId;
pub use layer_plan::LayerPlan;
pub use layer_plan::Quantifier;
pub use quantifier_prefix::QuantifierBlock;
#[cfg(test)]
pub(crate) use query_scheduler::QueryScheduler;
