use crate::{
    backend::LeafTranslator,
    error::{Inconsistency, Result, TranslateError},
    translator::FilterTranslator,
};
use model::Filter;

impl<B: LeafTranslator> FilterTranslator<'_, B> {
    /// Builds backend queries for a normalized, simplified filter.
    ///
    /// More than one query means the caller has to run each of them and
    /// union the results.
    pub fn emit(&self, filter: &Filter) -> Result<Vec<B::Query>> {
        match filter {
            Filter::And(lhs, rhs) => {
                let left = self.emit_single(lhs)?;
                let right = self.emit_single(rhs)?;
                self.backend()
                    .combine_and(&left, &right)
                    .map(|query| vec![query])
                    .ok_or_else(|| TranslateError::inconsistent(filter, Inconsistency::AndRejected))
            }
            Filter::Or(lhs, rhs) => {
                let mut left = self.emit(lhs)?;
                let right = self.emit(rhs)?;
                if left.is_empty() {
                    return Err(TranslateError::inconsistent(lhs, Inconsistency::EmptyProbe));
                }
                if right.is_empty() {
                    return Err(TranslateError::inconsistent(rhs, Inconsistency::EmptyProbe));
                }

                if let ([l], [r]) = (left.as_slice(), right.as_slice())
                    && let Some(query) = self.backend().combine_or(l, r)
                {
                    return Ok(vec![query]);
                }

                left.extend(right);
                Ok(left)
            }
            literal => self
                .leaf_query(literal)
                .map(|query| vec![query])
                .ok_or_else(|| TranslateError::inconsistent(literal, Inconsistency::LeafRejected)),
        }
    }

    fn emit_single(&self, filter: &Filter) -> Result<B::Query> {
        let mut queries = self.emit(filter)?;
        if queries.len() != 1 {
            return Err(TranslateError::inconsistent(
                filter,
                Inconsistency::NotSingleQuery {
                    count: queries.len(),
                },
            ));
        }
        Ok(queries.remove(0))
    }
}
