//! `cnfuzz` generates random layered CNF formulas for fuzzing SAT solvers.
//!
//! The variables of a formula are split into layers, and clauses mostly connect a layer with the
//! layers below it, which resembles the structure of circuit and bounded model checking
//! instances. Formulas can also be generated as QBFs, with one quantifier block per layer, or as
//! incremental problems in which assumption queries are interleaved with the clauses.
//!
//! ```rust
//! # use cnfuzz::generator::FormulaGenerator;
//! # use cnfuzz::options::GeneratorOptions;
//! # use cnfuzz::options::SizeProfile;
//! # use cnfuzz::output::DimacsWriter;
//! let options = GeneratorOptions::new(42, false, false, SizeProfile::Tiny).unwrap();
//! let mut writer = DimacsWriter::new(Vec::new());
//!
//! let summary = FormulaGenerator::new(&options, &[]).generate(&mut writer).unwrap();
//! assert!(summary.num_variables <= 20);
//! ```
pub mod asserts;
mod basic_types;
pub mod generator;
pub mod option_file;
pub mod options;
pub mod output;
pub mod result;
#[cfg(test)]
mod tests;

pub use basic_types::Literal;
pub use basic_types::Random;
pub use basic_types::Variable;
