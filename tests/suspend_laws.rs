#![cfg(feature = "async")]
//! Property-based tests for suspending accessor laws.
//!
//! The deterministic laws must keep holding once reads and writes suspend:
//!
//! - **GetPut / PutGet** for suspending lenses
//! - **Modify Identity** and **Modify Composition** for suspending traversals
//! - **Composition associativity** and **combination order**
//! - **Self-combination** of the identity accessor

use std::convert::Infallible;

use futures::executor::block_on;
use lenskit::optics::{FunctionTraversal, Lens, Traversal, identity};
use lenskit::suspend::{
    AsyncFunctionLens, AsyncFunctionTraversal, AsyncLens, AsyncTraversal, Suspended,
};
use proptest::prelude::*;

#[derive(Clone, PartialEq, Debug)]
struct Point {
    x: i32,
    y: i32,
}

fn x_lens() -> impl AsyncLens<Point, i32, Error = Infallible> + Clone {
    AsyncFunctionLens::new(
        |point: &Point| -> Suspended<'static, i32, Infallible> {
            let x = point.x;
            Box::pin(async move { Ok(x) })
        },
        |point: Point, x: i32| -> Suspended<'static, Point, Infallible> {
            Box::pin(async move { Ok(Point { x, ..point }) })
        },
    )
}

fn each<A>() -> impl AsyncTraversal<Vec<A>, A, Error = Infallible> + Clone
where
    A: Clone + Send + Sync + 'static,
{
    AsyncFunctionTraversal::new(
        |values: &Vec<A>| -> Suspended<'static, Vec<A>, Infallible> {
            let values = values.clone();
            Box::pin(async move { Ok(values) })
        },
        |_: Vec<A>, values: Vec<A>| -> Suspended<'static, Vec<A>, Infallible> {
            Box::pin(async move { Ok(values) })
        },
    )
}

fn positives() -> impl AsyncTraversal<Vec<i32>, i32, Error = Infallible> + Clone {
    FunctionTraversal::new(
        |numbers: &Vec<i32>| numbers.iter().filter(|number| **number > 0).collect(),
        |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
            numbers
                .into_iter()
                .map(|number| if number > 0 { function(number) } else { number })
                .collect()
        },
    )
    .suspend::<Infallible>()
}

proptest! {
    #[test]
    fn prop_async_lens_get_put_law(x in any::<i32>(), y in any::<i32>()) {
        let point = Point { x, y };
        let result = block_on(async {
            let value = x_lens().get(&point).await?;
            x_lens().set(point.clone(), value).await
        });
        prop_assert_eq!(result, Ok(point));
    }

    #[test]
    fn prop_async_lens_put_get_law(x in any::<i32>(), y in any::<i32>(), value in any::<i32>()) {
        let result = block_on(async {
            let updated = x_lens().set(Point { x, y }, value).await?;
            x_lens().get(&updated).await
        });
        prop_assert_eq!(result, Ok(value));
    }

    #[test]
    fn prop_lifted_lens_agrees_with_lens(x in any::<i32>(), y in any::<i32>()) {
        let lens = identity::<(i32, i32)>();
        let lifted = identity::<(i32, i32)>().suspend::<Infallible>();
        let expected = lens.modify((x, y), |(a, b)| (b, a));
        prop_assert_eq!(block_on(lifted.modify((x, y), |(a, b)| (b, a))), Ok(expected));
    }

    #[test]
    fn prop_async_traversal_modify_identity_law(numbers in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert_eq!(block_on(each::<i32>().modify(numbers.clone(), |x| x)), Ok(numbers));
    }

    #[test]
    fn prop_async_traversal_modify_composition_law(numbers in prop::collection::vec(-1000i32..1000, 0..20)) {
        // Both transforms keep positive parts positive, so the second pass
        // visits the same parts as the first.
        let f = |x: i32| x + 7;
        let g = |x: i32| x * 3;
        let left = block_on(async {
            let once = positives().modify(numbers.clone(), f).await?;
            positives().modify(once, g).await
        });
        let right = block_on(positives().modify(numbers, |x| g(f(x))));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_async_traversal_modify_composition_law_over_every_part(
        numbers in prop::collection::vec(-1000i32..1000, 0..20)
    ) {
        let f = |x: i32| x - 7;
        let g = |x: i32| x * 3;
        let left = block_on(async {
            let once = each::<i32>().modify(numbers.clone(), f).await?;
            each::<i32>().modify(once, g).await
        });
        let right = block_on(each::<i32>().modify(numbers, |x| g(f(x))));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_lifted_traversal_agrees_with_traversal(numbers in prop::collection::vec(-1000i32..1000, 0..20)) {
        let sync = FunctionTraversal::new(
            |numbers: &Vec<i32>| numbers.iter().filter(|number| **number > 0).collect(),
            |numbers: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
                numbers
                    .into_iter()
                    .map(|number| if number > 0 { function(number) } else { number })
                    .collect::<Vec<_>>()
            },
        );
        let expected = sync.modify(numbers.clone(), |x| x + 1);
        prop_assert_eq!(block_on(positives().modify(numbers, |x| x + 1)), Ok(expected));
    }

    #[test]
    fn prop_async_composition_is_associative(
        grid in prop::collection::vec(
            prop::collection::vec(prop::collection::vec(-1000i32..1000, 0..4), 0..4),
            0..4,
        )
    ) {
        let left = each::<Vec<Vec<i32>>>()
            .compose(each::<Vec<i32>>())
            .compose(each::<i32>());
        let right = each::<Vec<Vec<i32>>>()
            .compose(each::<Vec<i32>>().compose(each::<i32>()));

        prop_assert_eq!(block_on(left.get_all(&grid)), block_on(right.get_all(&grid)));
        prop_assert_eq!(
            block_on(left.modify(grid.clone(), |x| x + 2)),
            block_on(right.modify(grid.clone(), |x| x + 2))
        );
        prop_assert_eq!(block_on(left.set(grid.clone(), 0)), block_on(right.set(grid, 0)));
    }

    #[test]
    fn prop_async_combination_read_is_concatenation(numbers in prop::collection::vec(any::<i32>(), 0..20)) {
        let both = positives().combine(each::<i32>());
        let expected = block_on(async {
            let mut parts = positives().get_all(&numbers).await?;
            parts.extend(each::<i32>().get_all(&numbers).await?);
            Ok::<Vec<i32>, Infallible>(parts)
        });
        prop_assert_eq!(block_on(both.get_all(&numbers)), expected);
    }

    #[test]
    fn prop_async_self_combination_of_identity(source in any::<i64>(), value in any::<i64>()) {
        let twice = identity::<i64>()
            .to_traversal()
            .suspend::<Infallible>()
            .combine(identity::<i64>().to_traversal().suspend::<Infallible>());

        prop_assert_eq!(block_on(twice.get_all(&source)), Ok(vec![source, source]));
        prop_assert_eq!(block_on(twice.set(source, value)), Ok(value));
        prop_assert_eq!(
            block_on(twice.modify(source, |x| x.wrapping_add(5))),
            Ok(source.wrapping_add(10))
        );
    }
}
