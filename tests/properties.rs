use proptest::prelude::*;
use worthgen::{classify, decompose_identifier, sort_items, sort_key, Item, Position};

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u32..6, 0u32..4, 1u32..1000), 0..30).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .filter_map(|(n, (id, variant, worth))| {
                Item::new(id, variant, format!("row {}", n), worth as f64)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn sorted_keys_are_non_decreasing(items in items_strategy()) {
        let sorted = sort_items(items);
        for pair in sorted.windows(2) {
            prop_assert!(sort_key(&pair[0]) <= sort_key(&pair[1]));
        }
    }

    #[test]
    fn sort_keeps_input_order_for_equal_keys(items in items_strategy()) {
        let sorted = sort_items(items);
        for pair in sorted.windows(2) {
            if sort_key(&pair[0]) == sort_key(&pair[1]) {
                let a: usize = pair[0].comment()[4..].parse().unwrap();
                let b: usize = pair[1].comment()[4..].parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn unique_ids_are_always_standalone(items in items_strategy()) {
        let sorted = sort_items(items);
        for (index, item) in sorted.iter().enumerate() {
            let same_id = sorted.iter().filter(|o| o.id() == item.id()).count();
            let position = classify(&sorted, index);
            if same_id == 1 {
                prop_assert_eq!(position, Position::Standalone);
            } else {
                prop_assert_ne!(position, Position::Standalone);
            }
        }
    }

    #[test]
    fn each_group_has_exactly_one_head(items in items_strategy()) {
        let sorted = sort_items(items);
        let mut ids: Vec<u32> = sorted.iter().map(|i| i.id()).collect();
        ids.dedup();
        for id in ids {
            let heads = (0..sorted.len())
                .filter(|&i| sorted[i].id() == id && classify(&sorted, i) != Position::GroupMember)
                .count();
            prop_assert_eq!(heads, 1);
        }
    }

    #[test]
    fn two_digit_groups_decompose(id in 0u32..100_000, variant in 0u32..100_000, sep in "[ :/#a-z-]{1,3}") {
        let identifier = format!("{}{}{}", id, sep, variant);
        prop_assert_eq!(decompose_identifier(&identifier), Ok((id, variant)));
    }
}
