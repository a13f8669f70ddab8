use fnv::FnvHashSet;

use crate::basic_types::Variable;

/// The variables used by the clause or constraint that is currently being built.
///
/// A variable can occur at most once, in either polarity, per clause or constraint. The set is
/// cleared once the item is finished.
#[derive(Clone, Debug, Default)]
pub(crate) struct MarkSet {
    marked: FnvHashSet<Variable>,
}

impl MarkSet {
    /// Marks `variable`, returning false if it was already marked.
    pub(crate) fn try_mark(&mut self, variable: Variable) -> bool {
        self.marked.insert(variable)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.marked.clear();
    }
}
