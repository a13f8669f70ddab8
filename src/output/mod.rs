//! Where the generated formula goes. The generator only talks to a [`FormulaSink`]; the
//! [`DimacsWriter`] turns the stream into (Q)DIMACS text.
mod dimacs_writer;

pub use dimacs_writer::DimacsWriter;

use crate::basic_types::Literal;
use crate::generator::QuantifierBlock;

/// Receives the parts of a formula in the order in which they are generated.
pub trait FormulaSink {
    /// A human-readable line describing the parameters of the formula.
    fn annotation(&mut self, text: &str) -> std::io::Result<()>;

    fn quantifier_block(&mut self, block: &QuantifierBlock) -> std::io::Result<()>;

    fn header(&mut self, num_variables: u32, num_clauses: u64) -> std::io::Result<()>;

    fn clause(&mut self, literals: &[Literal]) -> std::io::Result<()>;

    /// An incremental query under the given assumptions, which may be empty.
    fn query(&mut self, assumptions: &[Literal]) -> std::io::Result<()>;

    /// Called once after the last clause or query.
    fn finish(&mut self) -> std::io::Result<()>;
}
