use clap::ValueEnum;

use crate::result::ConfigurationError;

/// Seeds are restricted to 31 bits so that they can be passed around as non-negative `i32`s.
pub const MAX_SEED: u32 = i32::MAX as u32;

/// Bounds the size of the generated formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SizeProfile {
    /// Up to 20 layers of up to 70 variables each.
    #[default]
    Normal,
    /// Up to 5 layers of up to 20 variables each.
    Small,
    /// At most 2 layers of exactly 10 variables.
    Tiny,
}

impl SizeProfile {
    pub(crate) fn max_width_bound(self) -> u32 {
        match self {
            SizeProfile::Normal => 70,
            SizeProfile::Small => 20,
            SizeProfile::Tiny => 10,
        }
    }

    pub(crate) fn max_num_layers(self) -> u32 {
        match self {
            SizeProfile::Normal => 20,
            SizeProfile::Small => 5,
            SizeProfile::Tiny => 2,
        }
    }
}

/// Everything which determines the generated formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub seed: u32,
    /// Generate a QBF with a quantifier prefix.
    pub quantified: bool,
    /// Interleave assumption queries with the clauses.
    pub incremental: bool,
    pub profile: SizeProfile,
}

impl GeneratorOptions {
    pub fn new(
        seed: u32,
        quantified: bool,
        incremental: bool,
        profile: SizeProfile,
    ) -> Result<GeneratorOptions, ConfigurationError> {
        if seed > MAX_SEED {
            return Err(ConfigurationError::SeedOutOfRange(seed));
        }

        if quantified && incremental {
            return Err(ConfigurationError::IncompatibleModes);
        }

        Ok(GeneratorOptions {
            seed,
            quantified,
            incremental,
            profile,
        })
    }
}

/// A seed taken from the entropy of the operating system, masked to 31 bits.
pub fn seed_from_entropy() -> u32 {
    rand::random::<u32>() & MAX_SEED
}
