use std::collections::BTreeSet;

/// Pending sweep rows. Rows are unique and leave from the largest y down.
#[derive(Debug, Default, Clone)]
pub struct Scanbeam {
    rows: BTreeSet<i64>,
}

impl Scanbeam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicates are ignored.
    pub fn insert(&mut self, y: i64) {
        self.rows.insert(y);
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.rows.pop_last()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
