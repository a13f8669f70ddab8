//! A [`FormulaSink`] which records everything it is given, so tests can inspect the generated
//! formula without parsing DIMACS.
use crate::basic_types::Literal;
use crate::generator::QuantifierBlock;
use crate::output::FormulaSink;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SinkEvent {
    Annotation(String),
    Quantifier(QuantifierBlock),
    Header {
        num_variables: u32,
        num_clauses: u64,
    },
    Clause(Vec<Literal>),
    Query(Vec<Literal>),
    Finished,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Vec<SinkEvent>,
}

#[allow(unused, reason = "not every test inspects every kind of event")]
impl RecordingSink {
    pub(crate) fn clauses(&self) -> impl Iterator<Item = &[Literal]> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Clause(literals) => Some(literals.as_slice()),
            _ => None,
        })
    }

    pub(crate) fn queries(&self) -> impl Iterator<Item = &[Literal]> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Query(literals) => Some(literals.as_slice()),
            _ => None,
        })
    }

    pub(crate) fn quantifier_blocks(&self) -> impl Iterator<Item = &QuantifierBlock> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Quantifier(block) => Some(block),
            _ => None,
        })
    }

    pub(crate) fn annotations(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::Annotation(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn header(&self) -> Option<(u32, u64)> {
        self.events.iter().find_map(|event| match event {
            SinkEvent::Header {
                num_variables,
                num_clauses,
            } => Some((*num_variables, *num_clauses)),
            _ => None,
        })
    }

    /// The position of the first event matching `predicate`.
    pub(crate) fn position(&self, predicate: impl Fn(&SinkEvent) -> bool) -> Option<usize> {
        self.events.iter().position(predicate)
    }
}

impl FormulaSink for RecordingSink {
    fn annotation(&mut self, text: &str) -> std::io::Result<()> {
        self.events.push(SinkEvent::Annotation(text.to_owned()));
        Ok(())
    }

    fn quantifier_block(&mut self, block: &QuantifierBlock) -> std::io::Result<()> {
        self.events.push(SinkEvent::Quantifier(block.clone()));
        Ok(())
    }

    fn header(&mut self, num_variables: u32, num_clauses: u64) -> std::io::Result<()> {
        self.events.push(SinkEvent::Header {
            num_variables,
            num_clauses,
        });
        Ok(())
    }

    fn clause(&mut self, literals: &[Literal]) -> std::io::Result<()> {
        self.events.push(SinkEvent::Clause(literals.to_vec()));
        Ok(())
    }

    fn query(&mut self, assumptions: &[Literal]) -> std::io::Result<()> {
        self.events.push(SinkEvent::Query(assumptions.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.events.push(SinkEvent::Finished);
        Ok(())
    }
}
