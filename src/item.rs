// 💰 Item Entity + Collection Sorter
// One priced entity identified by (id, variant); ordering lives outside the type

use serde::Serialize;

// ============================================================================
// ITEM
// ============================================================================

/// Item - one priced entry of the worth table
///
/// Fields are private so an Item cannot change after the normalizer builds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: u32,
    variant: u32,
    comment: String,
    worth: f64,
}

impl Item {
    /// Create a new Item. Returns None for a zero worth, which is never materialized.
    pub fn new(id: u32, variant: u32, comment: impl Into<String>, worth: f64) -> Option<Self> {
        if worth == 0.0 {
            return None;
        }

        Some(Item {
            id,
            variant,
            comment: comment.into(),
            worth,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Secondary key; 0 means the item has no variant.
    pub fn variant(&self) -> u32 {
        self.variant
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn worth(&self) -> f64 {
        self.worth
    }

    /// Same primary id as another item (None = no neighbour)
    pub fn shares_id(&self, other: Option<&Item>) -> bool {
        other.map_or(false, |o| o.id == self.id)
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Composite key for the worth table order: id ascending, then variant ascending.
pub fn sort_key(item: &Item) -> (u32, u32) {
    (item.id, item.variant)
}

/// Sort items by `sort_key`. The sort is stable, so duplicate keys keep input order.
pub fn sort_items(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by_key(sort_key);
    items
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, variant: u32, comment: &str) -> Item {
        Item::new(id, variant, comment, 1.0).unwrap()
    }

    #[test]
    fn test_zero_worth_is_never_built() {
        assert!(Item::new(1, 0, "Free", 0.0).is_none());
        assert!(Item::new(1, 0, "Free", -0.0).is_none());
        assert!(Item::new(1, 0, "Cheap", 0.01).is_some());
    }

    #[test]
    fn test_item_accessors() {
        let it = Item::new(2, 1, "Shield Reinforced", 75.0).unwrap();

        assert_eq!(it.id(), 2);
        assert_eq!(it.variant(), 1);
        assert_eq!(it.comment(), "Shield Reinforced");
        assert_eq!(it.worth(), 75.0);
    }

    #[test]
    fn test_sort_by_id_then_variant() {
        let sorted = sort_items(vec![item(2, 0, "a"), item(1, 0, "b"), item(2, 1, "c")]);
        let keys: Vec<(u32, u32)> = sorted.iter().map(sort_key).collect();

        assert_eq!(keys, vec![(1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_keys() {
        let sorted = sort_items(vec![
            item(5, 1, "first"),
            item(3, 0, "x"),
            item(5, 1, "second"),
        ]);
        let comments: Vec<&str> = sorted.iter().map(|i| i.comment()).collect();

        assert_eq!(comments, vec!["x", "first", "second"]);
    }

    #[test]
    fn test_serializes_as_flat_record() {
        let json = serde_json::to_value(Item::new(2, 1, "Shield", 75.5).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 2, "variant": 1, "comment": "Shield", "worth": 75.5})
        );
    }

    #[test]
    fn test_shares_id() {
        let a = item(7, 0, "a");
        let b = item(7, 3, "b");
        let c = item(8, 0, "c");

        assert!(a.shares_id(Some(&b)));
        assert!(!a.shares_id(Some(&c)));
        assert!(!a.shares_id(None));
    }
}
