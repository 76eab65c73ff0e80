/// Vertex where a left and a right bound start. Either bound may be missing
/// for open paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMinima {
    pub y: i64,
    pub left_bound: Option<usize>,
    pub right_bound: Option<usize>,
}

impl LocalMinima {
    pub fn new(y: i64, left_bound: Option<usize>, right_bound: Option<usize>) -> Self {
        Self {
            y,
            left_bound,
            right_bound,
        }
    }
}

/// Minima ordered from the largest y down, with a cursor over the ones
/// already handed to the sweep.
#[derive(Debug, Default, Clone)]
pub struct LocalMinimaList {
    items: Vec<LocalMinima>,
    current: usize,
}

impl LocalMinimaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new minima goes ahead of those already queued on the same row.
    pub fn insert(&mut self, minima: LocalMinima) {
        let index = self
            .items
            .iter()
            .position(|item| item.y <= minima.y)
            .unwrap_or(self.items.len());

        self.items.insert(index, minima);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalMinima> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.current < self.items.len()
    }

    /// Takes the next minima if it lies on row `y`.
    pub fn pop(&mut self, y: i64) -> Option<LocalMinima> {
        let minima = *self.items.get(self.current)?;

        if minima.y != y {
            return None;
        }

        self.current += 1;

        Some(minima)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current = 0;
    }
}
