//! Negation push-down.
//!
//! After [`normalize`], a `Not` node only ever wraps a leaf, so leaf
//! translators see negation as a flag instead of a free-standing combinator.

use model::Filter;

pub fn normalize(filter: Filter) -> Filter {
    match filter {
        Filter::And(l, r) => Filter::and(normalize(*l), normalize(*r)),
        Filter::Or(l, r) => Filter::or(normalize(*l), normalize(*r)),
        Filter::Not(inner) => negate(normalize(*inner)),
        leaf @ Filter::Leaf(_) => leaf,
    }
}

/// De Morgan's laws plus double-negation elimination.
pub fn negate(filter: Filter) -> Filter {
    match filter {
        Filter::And(l, r) => Filter::or(negate(*l), negate(*r)),
        Filter::Or(l, r) => Filter::and(negate(*l), negate(*r)),
        Filter::Not(inner) => *inner,
        leaf @ Filter::Leaf(_) => Filter::not(leaf),
    }
}

/// Whether every `Not` in the tree sits directly above a leaf.
pub fn is_normalized(filter: &Filter) -> bool {
    match filter {
        Filter::Leaf(_) => true,
        Filter::Not(inner) => matches!(inner.as_ref(), Filter::Leaf(_)),
        Filter::And(l, r) | Filter::Or(l, r) => is_normalized(l) && is_normalized(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(attr: &str, value: i64) -> Filter {
        Filter::equal(attr, value).unwrap()
    }

    #[test]
    fn test_double_negation() {
        let leaf = eq("a", 1);
        assert_eq!(normalize(Filter::not(Filter::not(leaf.clone()))), leaf);
    }

    #[test]
    fn test_not_and_becomes_or_of_negations() {
        let filter = Filter::not(Filter::and(eq("a", 1), eq("b", 2)));
        assert_eq!(
            normalize(filter),
            Filter::or(Filter::not(eq("a", 1)), Filter::not(eq("b", 2)))
        );
    }

    #[test]
    fn test_nested_negations_cancel_inside_de_morgan() {
        // not (a or not (b and c)) => not a and (b and c)
        let filter = Filter::not(Filter::or(
            eq("a", 1),
            Filter::not(Filter::and(eq("b", 2), eq("c", 3))),
        ));
        let normalized = normalize(filter);
        assert_eq!(
            normalized,
            Filter::and(Filter::not(eq("a", 1)), Filter::and(eq("b", 2), eq("c", 3)))
        );
        assert!(is_normalized(&normalized));
    }

    #[test]
    fn test_leaves_and_positive_combinators_are_untouched() {
        let filter = Filter::or(eq("a", 1), Filter::and(eq("b", 2), Filter::not(eq("c", 3))));
        assert_eq!(normalize(filter.clone()), filter);
    }

    #[test]
    fn test_is_normalized_rejects_not_over_combinator() {
        assert!(!is_normalized(&Filter::not(Filter::or(eq("a", 1), eq("b", 2)))));
        assert!(!is_normalized(&Filter::not(Filter::not(eq("a", 1)))));
    }
}
