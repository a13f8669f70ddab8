use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use crate::cnfuzz_assert_simple;

/// A propositional variable, identified by its 1-based DIMACS index.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Variable(u32);

impl Variable {
    pub fn new(index: u32) -> Variable {
        cnfuzz_assert_simple!(index > 0, "DIMACS variables start at 1");
        Variable(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A [`Variable`] together with a polarity.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Literal {
    variable: Variable,
    is_positive: bool,
}

impl Literal {
    pub fn new(variable: Variable, is_positive: bool) -> Literal {
        Literal {
            variable,
            is_positive,
        }
    }

    pub fn positive(variable: Variable) -> Literal {
        Literal::new(variable, true)
    }

    pub fn negative(variable: Variable) -> Literal {
        Literal::new(variable, false)
    }

    pub fn variable(self) -> Variable {
        self.variable
    }

    pub fn is_positive(self) -> bool {
        self.is_positive
    }

    /// The signed, non-zero integer used for this literal in DIMACS files.
    pub fn to_dimacs(self) -> i64 {
        let index = i64::from(self.variable.index());
        if self.is_positive {
            index
        } else {
            -index
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            variable: self.variable,
            is_positive: !self.is_positive,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod tests {
    use super::Literal;
    use super::Variable;

    #[test]
    fn negation_flips_only_the_polarity() {
        let literal = Literal::positive(Variable::new(7));

        assert_eq!((!literal).variable(), Variable::new(7));
        assert!(!(!literal).is_positive());
        assert_eq!(!!literal, literal);
    }

    #[test]
    fn dimacs_encoding_is_signed_index() {
        assert_eq!(Literal::positive(Variable::new(3)).to_dimacs(), 3);
        assert_eq!(Literal::negative(Variable::new(3)).to_dimacs(), -3);
        assert_eq!(Literal::negative(Variable::new(12)).to_string(), "-12");
    }

    #[test]
    #[should_panic]
    fn variable_zero_is_rejected() {
        let _ = Variable::new(0);
    }
}
