//! Property-based tests for Traversal laws.
//!
//! - **Modify Identity Law**: `traversal.modify(source, |x| x) == source`
//! - **Modify Composition Law**:
//!   `traversal.modify(traversal.modify(source, f), g) == traversal.modify(source, |x| g(f(x)))`
//! - **Combination order**: `get_all(a + b, s) == get_all(a, s) ++ get_all(b, s)`
//! - **Self-combination**: `identity + identity` reads the source twice,
//!   writes it once and transforms it twice

use lenskit::optics::{FunctionTraversal, Lens, Traversal, identity};
use proptest::prelude::*;

fn each() -> impl Traversal<Vec<i32>, i32> + Clone {
    FunctionTraversal::new(
        |numbers: &Vec<i32>| numbers.iter().collect(),
        |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
            numbers.into_iter().map(function).collect()
        },
    )
}

fn odds() -> impl Traversal<Vec<i32>, i32> + Clone {
    FunctionTraversal::new(
        |numbers: &Vec<i32>| numbers.iter().filter(|number| *number % 2 != 0).collect(),
        |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
            numbers
                .into_iter()
                .map(|number| if number % 2 != 0 { function(number) } else { number })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_modify_identity_law(numbers in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert_eq!(each().modify(numbers.clone(), |x| x), numbers);
    }

    #[test]
    fn prop_modify_composition_law(numbers in prop::collection::vec(-1000i32..1000, 0..20)) {
        let f = |x: i32| x + 1;
        let g = |x: i32| x * 2;
        let left = each().modify(each().modify(numbers.clone(), f), g);
        let right = each().modify(numbers, |x| g(f(x)));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_round_trip_writes_back_what_was_read(numbers in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut parts = each().get_all(&numbers).copied().collect::<Vec<_>>().into_iter();
        let written = each().update(numbers.clone(), |_| parts.next().unwrap_or_default());
        prop_assert_eq!(written, numbers);
    }

    #[test]
    fn prop_combination_read_is_concatenation(numbers in prop::collection::vec(any::<i32>(), 0..20)) {
        let (left, right) = (odds(), each());
        let both = odds().combine(each());
        let mut expected = left.collect(&numbers);
        expected.extend(right.collect(&numbers));
        prop_assert_eq!(both.collect(&numbers), expected);
    }

    #[test]
    fn prop_combination_update_is_left_then_right(numbers in prop::collection::vec(-1000i32..1000, 0..20)) {
        let both = odds().combine(each());
        let expected = each().modify(odds().modify(numbers.clone(), |x| x + 3), |x| x + 3);
        prop_assert_eq!(both.modify(numbers, |x| x + 3), expected);
    }

    #[test]
    fn prop_self_combination_of_identity(source in any::<i64>(), value in any::<i64>()) {
        let twice = identity::<i64>()
            .to_traversal()
            .combine(identity::<i64>().to_traversal());
        prop_assert_eq!(twice.collect(&source), vec![&source, &source]);
        prop_assert_eq!(twice.set(source, value), value);
        prop_assert_eq!(twice.modify(source, |x| x.wrapping_mul(3)), source.wrapping_mul(9));
    }
}
