//! In-memory filtering of list responses.

/// List element carrying a numeric identifier.
pub trait Identified {
    /// The element's identifier.
    fn id(&self) -> i64;
}

/// Keep only the elements whose identifier equals `id`.
///
/// An `id` of zero means "no filter" and returns `items` unchanged. An id with
/// no matches yields an empty list.
#[must_use]
pub fn filter_by_id<T: Identified>(items: Vec<T>, id: i64) -> Vec<T> {
    if id == 0 {
        return items;
    }
    items.into_iter().filter(|item| item.id() == id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Rule(i64);

    impl Identified for Rule {
        fn id(&self) -> i64 {
            self.0
        }
    }

    fn rules() -> Vec<Rule> {
        vec![Rule(699_989), Rule(699_990), Rule(699_991)]
    }

    #[test]
    fn zero_returns_everything() {
        assert_eq!(filter_by_id(rules(), 0), rules());
    }

    #[test]
    fn matching_id_returns_single_element() {
        assert_eq!(filter_by_id(rules(), 699_990), vec![Rule(699_990)]);
    }

    #[test]
    fn missing_id_returns_empty() {
        assert!(filter_by_id(rules(), 12_345).is_empty());
    }
}
