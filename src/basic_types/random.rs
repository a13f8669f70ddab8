use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;

use crate::cnfuzz_assert_moderate;

/// Abstraction for randomness, in order to swap out different sources of randomness.
///
/// Every random decision made by the generator is derived from [`Random::generate_u32_in_range`].
/// The provided methods only combine integer draws, which means the output for a seed depends
/// solely on the order and number of integer draws.
///
/// # Testing
/// There is an implementation of this trait which takes as input a list of `u32`s and returns
/// them in that order. This allows defining deterministic test-cases for code which is generic
/// over [`Random`].
pub trait Random: Debug {
    /// Generates a random u32 in the provided range with equal probability; this can be seen as
    /// sampling from a uniform distribution in the range `[lb, ub]`.
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use cnfuzz::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let width = rng.generate_u32_in_range(10, 70);
    /// assert!((10..=70).contains(&width));
    /// ```
    fn generate_u32_in_range(&mut self, lb: u32, ub: u32) -> u32;

    /// A fair coin toss, drawn as an integer in `[0, 1]`.
    fn flip_coin(&mut self) -> bool {
        self.generate_u32_in_range(0, 1) == 1
    }

    /// Returns true with probability `1 / n`.
    fn one_in(&mut self, n: u32) -> bool {
        cnfuzz_assert_moderate!(n > 0, "cannot draw one in zero");
        self.generate_u32_in_range(0, n - 1) == 0
    }

    /// A uniformly random index into a collection of length `len`.
    fn generate_index(&mut self, len: usize) -> usize {
        cnfuzz_assert_moderate!(len > 0, "cannot pick from an empty collection");
        let upper = u32::try_from(len - 1).unwrap_or(u32::MAX);
        self.generate_u32_in_range(0, upper) as usize
    }
}

// Blanket implementation for any type which implements `SeedableRng`, `Rng` and `Debug`, so any
// "regular" random generator can be used where an implementation of Random is expected.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_u32_in_range(&mut self, lb: u32, ub: u32) -> u32 {
        cnfuzz_assert_moderate!(lb <= ub, "empty range [{lb}, {ub}]");
        self.gen_range(lb..=ub)
    }
}
