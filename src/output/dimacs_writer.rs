use std::io::BufWriter;
use std::io::Write;

use super::FormulaSink;
use crate::basic_types::Literal;
use crate::generator::QuantifierBlock;

/// Writes a formula as DIMACS, QDIMACS for quantified formulas, with `q ... 0` lines for the
/// queries of incremental formulas.
#[derive(Debug)]
pub struct DimacsWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> DimacsWriter<W> {
    pub fn new(writer: W) -> Self {
        DimacsWriter {
            writer: BufWriter::new(writer),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|error| error.into_error())
    }

    fn zero_terminated(
        &mut self,
        prefix: Option<&str>,
        items: impl IntoIterator<Item = impl std::fmt::Display>,
    ) -> std::io::Result<()> {
        let mut separator = "";
        if let Some(prefix) = prefix {
            write!(self.writer, "{prefix}")?;
            separator = " ";
        }

        for item in items {
            write!(self.writer, "{separator}{item}")?;
            separator = " ";
        }

        writeln!(self.writer, "{separator}0")
    }
}

impl<W: Write> FormulaSink for DimacsWriter<W> {
    fn annotation(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer, "c {text}")
    }

    fn quantifier_block(&mut self, block: &QuantifierBlock) -> std::io::Result<()> {
        let tag = block.quantifier.tag().to_string();
        self.zero_terminated(Some(tag.as_str()), &block.variables)
    }

    fn header(&mut self, num_variables: u32, num_clauses: u64) -> std::io::Result<()> {
        writeln!(self.writer, "p cnf {num_variables} {num_clauses}")
    }

    fn clause(&mut self, literals: &[Literal]) -> std::io::Result<()> {
        self.zero_terminated(None, literals)
    }

    fn query(&mut self, assumptions: &[Literal]) -> std::io::Result<()> {
        self.zero_terminated(Some("q"), assumptions)
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::DimacsWriter;
    use crate::basic_types::Literal;
    use crate::basic_types::Variable;
    use crate::generator::Quantifier;
    use crate::generator::QuantifierBlock;
    use crate::output::FormulaSink;

    fn written(write: impl FnOnce(&mut DimacsWriter<Vec<u8>>) -> std::io::Result<()>) -> String {
        let mut writer = DimacsWriter::new(Vec::new());
        write(&mut writer).expect("writing to memory does not fail");
        writer.finish().expect("writing to memory does not fail");
        String::from_utf8(writer.into_inner().expect("flushing memory does not fail"))
            .expect("only ascii is written")
    }

    #[test]
    fn clauses_are_zero_terminated() {
        let output = written(|writer| {
            writer.header(3, 1)?;
            writer.clause(&[
                Literal::positive(Variable::new(1)),
                Literal::negative(Variable::new(3)),
            ])
        });

        assert_eq!(output, "p cnf 3 1\n1 -3 0\n");
    }

    #[test]
    fn prefix_lines_carry_the_quantifier_tag() {
        let output = written(|writer| {
            writer.quantifier_block(&QuantifierBlock {
                quantifier: Quantifier::Universal,
                variables: vec![Variable::new(1), Variable::new(2)],
            })
        });

        assert_eq!(output, "a 1 2 0\n");
    }

    #[test]
    fn empty_query_is_a_bare_terminator() {
        let output = written(|writer| {
            writer.annotation("seed 42")?;
            writer.query(&[Literal::negative(Variable::new(2))])?;
            writer.query(&[])
        });

        assert_eq!(output, "c seed 42\nq -2 0\nq 0\n");
    }
}
