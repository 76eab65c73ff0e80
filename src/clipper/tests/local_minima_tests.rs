use crate::clipper::local_minima::{LocalMinima, LocalMinimaList};

fn ys(list: &LocalMinimaList) -> Vec<i64> {
    list.iter().map(|minima| minima.y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_bottom_first() {
        let mut list = LocalMinimaList::new();

        list.insert(LocalMinima::new(5, Some(0), Some(1)));
        list.insert(LocalMinima::new(20, Some(2), Some(3)));
        list.insert(LocalMinima::new(10, Some(4), None));

        assert_eq!(list.len(), 3);
        assert_eq!(ys(&list), vec![20, 10, 5]);
    }

    #[test]
    fn test_same_row_newest_first() {
        let mut list = LocalMinimaList::new();

        list.insert(LocalMinima::new(10, Some(0), Some(1)));
        list.insert(LocalMinima::new(10, Some(2), Some(3)));

        assert_eq!(list.pop(10).and_then(|minima| minima.left_bound), Some(2));
        assert_eq!(list.pop(10).and_then(|minima| minima.left_bound), Some(0));
        assert_eq!(list.pop(10), None);
    }

    #[test]
    fn test_pop_only_on_matching_row() {
        let mut list = LocalMinimaList::new();

        list.insert(LocalMinima::new(10, Some(0), Some(1)));
        list.insert(LocalMinima::new(4, None, Some(2)));

        assert!(list.has_pending());
        assert_eq!(list.pop(4), None);
        assert_eq!(list.pop(10), Some(LocalMinima::new(10, Some(0), Some(1))));
        assert_eq!(list.pop(4), Some(LocalMinima::new(4, None, Some(2))));
        assert!(!list.has_pending());
    }

    #[test]
    fn test_reset_and_clear() {
        let mut list = LocalMinimaList::new();

        list.insert(LocalMinima::new(1, Some(0), Some(1)));
        assert!(list.pop(1).is_some());

        list.reset();
        assert!(list.has_pending());

        list.clear();
        assert!(list.is_empty());
        assert!(!list.has_pending());
    }
}
