use crate::{
    backend::LeafTranslator,
    error::{Inconsistency, Result, TranslateError},
    translator::FilterTranslator,
};
use model::Filter;
use tracing::{trace, warn};

impl<B: LeafTranslator> FilterTranslator<'_, B> {
    /// Prunes what the backend cannot express and distributes AND over OR
    /// where only the distributed form can be expressed.
    ///
    /// `None` means the filter reduces to "everything". The input must be
    /// normalized. Only feasibility is decided here; queries are built by
    /// [`FilterTranslator::emit`].
    pub fn simplify(&self, filter: Filter) -> Result<Option<Filter>> {
        match filter {
            Filter::And(lhs, rhs) => self.simplify_and(*lhs, *rhs),
            Filter::Or(lhs, rhs) => {
                let left = self.simplify(*lhs)?;
                let right = self.simplify(*rhs)?;
                match (left, right) {
                    (Some(left), Some(right)) => Ok(Some(Filter::or(left, right))),
                    // one unconstrained branch makes the whole OR unconstrained
                    _ => Ok(None),
                }
            }
            literal => {
                if self.leaf_query(&literal).is_some() {
                    Ok(Some(literal))
                } else {
                    trace!(filter = %literal, "leaf not expressible, widening to everything");
                    Ok(None)
                }
            }
        }
    }

    fn simplify_and(&self, lhs: Filter, rhs: Filter) -> Result<Option<Filter>> {
        let (left, right) = match (self.simplify(lhs)?, self.simplify(rhs)?) {
            (None, right) => return Ok(right),
            (left, None) => return Ok(left),
            (Some(left), Some(right)) => (left, right),
        };

        let left_queries = self.emit(&left)?;
        let right_queries = self.emit(&right)?;
        if left_queries.is_empty() {
            return Err(TranslateError::inconsistent(&left, Inconsistency::EmptyProbe));
        }
        if right_queries.is_empty() {
            return Err(TranslateError::inconsistent(&right, Inconsistency::EmptyProbe));
        }

        let any_and_possible = left_queries.iter().any(|l| {
            right_queries
                .iter()
                .any(|r| self.backend().combine_and(l, r).is_some())
        });

        if !any_and_possible {
            // keep the side with less fan-out; the other is left to the caller
            let (kept, dropped) = if left_queries.len() <= right_queries.len() {
                (left, right)
            } else {
                (right, left)
            };
            warn!(
                kept = %kept,
                dropped = %dropped,
                "AND is not expressible natively, constraint will not be pushed down"
            );
            return Ok(Some(kept));
        }

        if left_queries.len() > 1 {
            let Filter::Or(a, b) = left else {
                unreachable!("only OR emits more than one query")
            };
            trace!(left_disjuncts = left_queries.len(), "distributing AND over left OR");
            let distributed = Filter::or(Filter::and(*a, right.clone()), Filter::and(*b, right));
            return self.simplify(distributed);
        }

        if right_queries.len() > 1 {
            let Filter::Or(a, b) = right else {
                unreachable!("only OR emits more than one query")
            };
            trace!(right_disjuncts = right_queries.len(), "distributing AND over right OR");
            let distributed = Filter::or(Filter::and(left.clone(), *a), Filter::and(left, *b));
            return self.simplify(distributed);
        }

        Ok(Some(Filter::and(left, right)))
    }
}
