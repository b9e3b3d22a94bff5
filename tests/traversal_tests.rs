//! Unit tests for Traversal accessors.

use lenskit::kind::{Cardinality, EffectKind};
use lenskit::optics::{FunctionOptional, FunctionTraversal, Optional, Traversal};
use rstest::rstest;

// =============================================================================
// Test data types
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Order {
    id: u32,
    lines: Vec<Line>,
}

#[derive(Clone, PartialEq, Debug)]
struct Line {
    sku: String,
    quantity: u32,
}

fn lines() -> impl Traversal<Order, Line> + Clone {
    FunctionTraversal::new(
        |order: &Order| order.lines.iter().collect(),
        |order: Order, function: &mut dyn FnMut(Line) -> Line| Order {
            lines: order.lines.into_iter().map(function).collect(),
            ..order
        },
    )
}

fn quantity() -> impl Traversal<Line, u32> + Clone {
    FunctionTraversal::new(
        |line: &Line| vec![&line.quantity],
        |line: Line, function: &mut dyn FnMut(u32) -> u32| Line {
            quantity: function(line.quantity),
            ..line
        },
    )
}

fn order_of(quantities: &[u32]) -> Order {
    Order {
        id: 1,
        lines: quantities
            .iter()
            .enumerate()
            .map(|(index, quantity)| Line {
                sku: format!("sku-{index}"),
                quantity: *quantity,
            })
            .collect(),
    }
}

// =============================================================================
// Reads
// =============================================================================

#[rstest]
#[case(&[], 0)]
#[case(&[1], 1)]
#[case(&[1, 2, 3], 3)]
fn test_length(#[case] quantities: &[u32], #[case] expected: usize) {
    let order = order_of(quantities);
    assert_eq!(lines().length(&order), expected);
    assert!(Cardinality::Many.admits(expected));
}

#[test]
fn test_get_all_is_restartable() {
    let order = order_of(&[4, 5]);
    let quantities = lines().compose(quantity());
    let first: Vec<u32> = quantities.get_all(&order).copied().collect();
    let second: Vec<u32> = quantities.get_all(&order).copied().collect();
    assert_eq!(first, vec![4, 5]);
    assert_eq!(first, second);
}

#[rstest]
#[case(&[], 0)]
#[case(&[2, 3], 5)]
#[case(&[10, 20, 30], 60)]
fn test_fold_sums_quantities(#[case] quantities: &[u32], #[case] expected: u32) {
    let total = lines()
        .compose(quantity())
        .fold(&order_of(quantities), 0, |total, quantity| total + quantity);
    assert_eq!(total, expected);
}

#[test]
fn test_predicates_and_head() {
    let order = order_of(&[2, 4, 6]);
    let quantities = lines().compose(quantity());
    assert!(quantities.for_all(&order, |quantity| quantity % 2 == 0));
    assert!(!quantities.exists(&order, |quantity| *quantity > 6));
    assert_eq!(quantities.head_option(&order), Some(&2));
}

#[test]
fn test_predicates_on_empty_source() {
    let order = order_of(&[]);
    let quantities = lines().compose(quantity());
    assert!(quantities.for_all(&order, |_| false));
    assert!(!quantities.exists(&order, |_| true));
    assert_eq!(quantities.head_option(&order), None);
}

// =============================================================================
// Writes
// =============================================================================

#[test]
fn test_set_every_part() {
    let updated = lines().compose(quantity()).set(order_of(&[1, 2, 3]), 0);
    assert_eq!(updated.id, 1);
    assert_eq!(updated, order_of(&[0, 0, 0]));
}

#[test]
fn test_update_on_empty_source_returns_source() {
    let mut calls = 0;
    let updated = lines().update(order_of(&[]), |line| {
        calls += 1;
        line
    });
    assert_eq!(updated, order_of(&[]));
    assert_eq!(calls, 0);
}

#[test]
fn test_update_visits_in_traversal_order() {
    let mut visited = Vec::new();
    let result = lines().perform(order_of(&[9, 8, 7]), |line| visited.push(line.sku.clone()));
    assert_eq!(result, order_of(&[9, 8, 7]));
    assert_eq!(visited, vec!["sku-0", "sku-1", "sku-2"]);
}

#[test]
fn test_optional_widened_into_traversal_composition() {
    let large = FunctionOptional::new(
        |quantity: &u32| (*quantity >= 10).then_some(quantity),
        |quantity: u32, function: &mut dyn FnMut(u32) -> u32| {
            if quantity >= 10 { function(quantity) } else { quantity }
        },
    );
    let large_quantities = lines().compose(quantity()).compose(large.to_traversal());
    let order = order_of(&[5, 10, 15]);

    assert_eq!(large_quantities.collect(&order), vec![&10, &15]);
    assert_eq!(
        large_quantities.modify(order, |quantity| quantity / 5),
        order_of(&[5, 2, 3])
    );
}

#[test]
fn test_traversal_kind() {
    fn kind_of<U: Traversal<Order, Line>>(_: &U) -> EffectKind {
        U::KIND
    }
    assert_eq!(kind_of(&lines()), EffectKind::Multi);
    assert_eq!(EffectKind::Multi.cardinality(), Cardinality::Many);
}
