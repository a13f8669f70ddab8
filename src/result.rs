use thiserror::Error;

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Planned {planned} clauses but emitted {emitted}")]
    ClauseCountMismatch { planned: u64, emitted: u64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The seed {0} does not fit in 31 bits")]
    SeedOutOfRange(u32),
    #[error("Quantified and incremental formulas cannot be generated at the same time")]
    IncompatibleModes,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionFileError {
    #[error("Line {line} is malformed, expected `name default min max`: {content}")]
    Malformed { line: usize, content: String },
    #[error("Line {line}: option {name} has default {default} outside of [{min}, {max}]")]
    InvalidRange {
        line: usize,
        name: String,
        default: i32,
        min: i32,
        max: i32,
    },
}
