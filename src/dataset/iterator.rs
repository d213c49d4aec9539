use crate::{Dataset, DatasetError};

/// Sequential iterator over a [dataset](Dataset).
pub struct DatasetIterator<'a, I> {
    current: usize,
    dataset: &'a dyn Dataset<I>,
}

impl<'a, I> DatasetIterator<'a, I> {
    /// Creates a new dataset iterator starting at index 0.
    pub fn new<D>(dataset: &'a D) -> Self
    where
        D: Dataset<I>,
    {
        DatasetIterator {
            current: 0,
            dataset,
        }
    }
}

impl<I> Iterator for DatasetIterator<'_, I> {
    type Item = Result<I, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.current);
        self.current += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemDataset;

    #[test]
    fn iterates_over_all_items() {
        let dataset = InMemDataset::new(vec![10, 20, 30]);

        let items: Result<Vec<i32>, DatasetError> = dataset.iter().collect();
        assert_eq!(items.unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn empty_dataset_yields_nothing() {
        let dataset = InMemDataset::<i32>::new(vec![]);

        assert_eq!(dataset.iter().count(), 0);
    }
}
