pub mod checker;
pub mod comparator;

pub use checker::{Checker, HashCalculator, HashFactory};
pub use comparator::HashComparator;
