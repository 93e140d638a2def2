use model::Condition;
use std::fmt::Debug;

/// The seam between the engine and a target query language.
///
/// Implementations must be pure: the engine probes the same leaf or pair of
/// queries more than once and relies on getting the same answer every time.
/// Returning `None` means "not expressible natively"; the engine then treats
/// that part of the filter as matching everything.
pub trait LeafTranslator {
    /// The backend's query representation.
    type Query: Clone + Debug + PartialEq;

    /// Translate one comparison, optionally negated.
    fn translate_leaf(&self, condition: &Condition, negated: bool) -> Option<Self::Query>;

    /// Combine two queries with a native AND. Backends without one keep the default.
    fn combine_and(&self, _lhs: &Self::Query, _rhs: &Self::Query) -> Option<Self::Query> {
        None
    }

    /// Combine two queries with a native OR. Backends without one keep the default.
    fn combine_or(&self, _lhs: &Self::Query, _rhs: &Self::Query) -> Option<Self::Query> {
        None
    }
}

impl<T: LeafTranslator + ?Sized> LeafTranslator for &T {
    type Query = T::Query;

    fn translate_leaf(&self, condition: &Condition, negated: bool) -> Option<Self::Query> {
        (**self).translate_leaf(condition, negated)
    }

    fn combine_and(&self, lhs: &Self::Query, rhs: &Self::Query) -> Option<Self::Query> {
        (**self).combine_and(lhs, rhs)
    }

    fn combine_or(&self, lhs: &Self::Query, rhs: &Self::Query) -> Option<Self::Query> {
        (**self).combine_or(lhs, rhs)
    }
}
