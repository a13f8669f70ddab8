mod keyed_vec;
mod literal;
mod random;

pub(crate) use keyed_vec::KeyedVec;
pub(crate) use keyed_vec::StorageKey;
pub use literal::Literal;
pub use literal::Variable;
pub use random::Random;
