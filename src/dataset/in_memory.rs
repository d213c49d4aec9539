use crate::{Dataset, DatasetError};

/// Dataset where all items are stored in memory.
///
/// Items are cloned out on access; the backing vector is never mutated after
/// construction.
#[derive(Debug)]
pub struct InMemDataset<I> {
    items: Vec<I>,
}

impl<I> InMemDataset<I> {
    /// Creates a new in-memory dataset from the given items.
    pub fn new(items: Vec<I>) -> Self {
        Self { items }
    }
}

impl<I> Dataset<I> for InMemDataset<I>
where
    I: Clone + Send + Sync,
{
    fn get(&self, index: usize) -> Result<I, DatasetError> {
        self.items
            .get(index)
            .cloned()
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
