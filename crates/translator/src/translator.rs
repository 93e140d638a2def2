use crate::{
    backend::LeafTranslator, cache::LeafCache, config::TranslatorConfig, error::Result,
    normalize::normalize,
};
use model::Filter;
use tracing::debug;

/// Runs `emit(simplify(normalize(filter)))` against one backend.
pub struct FilterTranslator<'a, B: LeafTranslator> {
    backend: &'a B,
    config: TranslatorConfig,
    cache: LeafCache<B::Query>,
}

impl<'a, B: LeafTranslator> FilterTranslator<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self::with_config(backend, TranslatorConfig::default())
    }

    pub fn with_config(backend: &'a B, config: TranslatorConfig) -> Self {
        FilterTranslator {
            backend,
            config,
            cache: LeafCache::new(config.memoize_leaves),
        }
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translates a filter into the list of backend queries to run.
    ///
    /// An empty list means "no filtering": fetch everything. A list with more
    /// than one query must be executed query by query and the results
    /// unioned by the caller's identity key.
    pub fn translate(&self, filter: Option<&Filter>) -> Result<Vec<B::Query>> {
        let Some(filter) = filter else {
            return Ok(Vec::new());
        };

        self.cache.clear();
        let result = self.translate_filter(filter.clone());
        self.cache.clear();
        result
    }

    fn translate_filter(&self, filter: Filter) -> Result<Vec<B::Query>> {
        let normalized = normalize(filter);
        debug!(filter = %normalized, depth = normalized.depth(), "normalized filter");

        let Some(simplified) = self.simplify(normalized)? else {
            debug!("filter reduced to everything, no query pushed down");
            return Ok(Vec::new());
        };

        let mut queries = self.emit(&simplified)?;
        if self.config.deduplicate {
            queries = dedup(queries);
        }
        debug!(filter = %simplified, queries = queries.len(), "translated filter");
        Ok(queries)
    }

    /// Translation of a `Leaf` or a `Not` directly above one.
    pub(crate) fn leaf_query(&self, filter: &Filter) -> Option<B::Query> {
        let (condition, negated) = filter.as_literal()?;
        self.cache.get_or_translate(condition, negated, || {
            self.backend.translate_leaf(condition, negated)
        })
    }
}

/// Keeps the first occurrence of each query, preserving order.
fn dedup<Q: PartialEq>(queries: Vec<Q>) -> Vec<Q> {
    let mut unique: Vec<Q> = Vec::with_capacity(queries.len());
    for query in queries {
        if !unique.contains(&query) {
            unique.push(query);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Inconsistency, TranslateError};
    use model::{Condition, Operator};
    use std::cell::Cell;
    use tracing_test::traced_test;

    /// Renders leaves as `attr op value`, combining with `&` and `|` when allowed.
    struct Symbolic {
        and: bool,
        or: bool,
        unsupported: &'static [&'static str],
    }

    impl LeafTranslator for Symbolic {
        type Query = String;

        fn translate_leaf(&self, cond: &Condition, negated: bool) -> Option<String> {
            if self.unsupported.contains(&cond.attribute()) {
                return None;
            }
            let bang = if negated { "!" } else { "" };
            Some(format!("{bang}{}", cond))
        }

        fn combine_and(&self, lhs: &String, rhs: &String) -> Option<String> {
            self.and.then(|| format!("({lhs} & {rhs})"))
        }

        fn combine_or(&self, lhs: &String, rhs: &String) -> Option<String> {
            self.or.then(|| format!("({lhs} | {rhs})"))
        }
    }

    fn eq(attr: &str, value: i64) -> Filter {
        Filter::equal(attr, value).unwrap()
    }

    #[test]
    fn test_no_filter_means_everything() {
        let backend = Symbolic { and: true, or: true, unsupported: &[] };
        let translator = FilterTranslator::new(&backend);
        assert_eq!(translator.translate(None), Ok(vec![]));
    }

    #[test]
    fn test_native_and_or() {
        let backend = Symbolic { and: true, or: true, unsupported: &[] };
        let translator = FilterTranslator::new(&backend);
        let filter = Filter::or(Filter::and(eq("a", 1), eq("b", 2)), eq("c", 3));
        assert_eq!(
            translator.translate(Some(&filter)).unwrap(),
            vec!["((a eq 1 & b eq 2) | c eq 3)".to_string()]
        );
    }

    #[test]
    fn test_duplicate_queries_are_collapsed() {
        let backend = Symbolic { and: true, or: false, unsupported: &[] };
        let filter = Filter::or(eq("a", 1), eq("a", 1));

        let translator = FilterTranslator::new(&backend);
        assert_eq!(translator.translate(Some(&filter)).unwrap(), vec!["a eq 1"]);

        let config = TranslatorConfig {
            deduplicate: false,
            ..TranslatorConfig::default()
        };
        let translator = FilterTranslator::with_config(&backend, config);
        assert_eq!(
            translator.translate(Some(&filter)).unwrap(),
            vec!["a eq 1", "a eq 1"]
        );
    }

    #[test]
    #[traced_test]
    fn test_and_fallback_keeps_smaller_side_and_warns() {
        let backend = Symbolic { and: false, or: false, unsupported: &[] };
        let translator = FilterTranslator::new(&backend);
        // left fans out to two queries, right to one: the right side is kept
        let filter = Filter::and(Filter::or(eq("a", 1), eq("a", 2)), eq("b", 3));
        assert_eq!(translator.translate(Some(&filter)).unwrap(), vec!["b eq 3"]);
        assert!(logs_contain("AND is not expressible natively"));
    }

    #[test]
    fn test_and_fallback_prefers_left_on_tie() {
        let backend = Symbolic { and: false, or: false, unsupported: &[] };
        let translator = FilterTranslator::new(&backend);
        let filter = Filter::and(eq("a", 1), eq("b", 2));
        assert_eq!(translator.translate(Some(&filter)).unwrap(), vec!["a eq 1"]);
    }

    #[test]
    fn test_right_side_distribution() {
        let backend = Symbolic { and: true, or: false, unsupported: &[] };
        let translator = FilterTranslator::new(&backend);
        let filter = Filter::and(eq("b", 3), Filter::or(eq("a", 1), eq("a", 2)));
        assert_eq!(
            translator.translate(Some(&filter)).unwrap(),
            vec!["(b eq 3 & a eq 1)", "(b eq 3 & a eq 2)"]
        );
    }

    /// Accepts a leaf on the first call only.
    struct Flaky {
        calls: Cell<usize>,
    }

    impl LeafTranslator for Flaky {
        type Query = String;

        fn translate_leaf(&self, cond: &Condition, _negated: bool) -> Option<String> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            (call == 0).then(|| cond.to_string())
        }
    }

    #[test]
    fn test_non_deterministic_leaf_is_reported() {
        let backend = Flaky { calls: Cell::new(0) };
        let config = TranslatorConfig {
            memoize_leaves: false,
            ..TranslatorConfig::default()
        };
        let translator = FilterTranslator::with_config(&backend, config);
        let filter = Filter::leaf(Condition::new("a", Operator::Equal, 1).unwrap());

        let err = translator.translate(Some(&filter)).unwrap_err();
        assert_eq!(
            err,
            TranslateError::inconsistent(&filter, Inconsistency::LeafRejected)
        );
    }

    #[test]
    fn test_memoized_leaves_hide_non_determinism_within_a_call() {
        let backend = Flaky { calls: Cell::new(0) };
        let translator = FilterTranslator::new(&backend);
        let filter = eq("a", 1);
        assert_eq!(translator.translate(Some(&filter)).unwrap(), vec!["a eq 1"]);
        assert_eq!(backend.calls.get(), 1);
    }

    /// Renders leaves and combines natively, but each combinator only
    /// succeeds for its first `*_budget` calls.
    struct FlakyCombine {
        and_budget: Cell<usize>,
        or_budget: Cell<usize>,
    }

    impl FlakyCombine {
        fn new(and_budget: usize, or_budget: usize) -> Self {
            FlakyCombine {
                and_budget: Cell::new(and_budget),
                or_budget: Cell::new(or_budget),
            }
        }
    }

    fn spend(budget: &Cell<usize>) -> bool {
        let left = budget.get();
        budget.set(left.saturating_sub(1));
        left > 0
    }

    impl LeafTranslator for FlakyCombine {
        type Query = String;

        fn translate_leaf(&self, cond: &Condition, _negated: bool) -> Option<String> {
            Some(cond.to_string())
        }

        fn combine_and(&self, lhs: &String, rhs: &String) -> Option<String> {
            spend(&self.and_budget).then(|| format!("({lhs} & {rhs})"))
        }

        fn combine_or(&self, lhs: &String, rhs: &String) -> Option<String> {
            spend(&self.or_budget).then(|| format!("({lhs} | {rhs})"))
        }
    }

    #[test]
    fn test_and_refused_at_emission_is_reported() {
        // the feasibility check spends the only successful combine_and
        let backend = FlakyCombine::new(1, usize::MAX);
        let translator = FilterTranslator::new(&backend);
        let filter = Filter::and(eq("a", 1), eq("b", 2));

        assert_eq!(
            translator.translate(Some(&filter)),
            Err(TranslateError::inconsistent(&filter, Inconsistency::AndRejected))
        );
    }

    #[test]
    fn test_and_operand_fanning_out_at_emission_is_reported() {
        // the probe of `a eq 1 or a eq 2` combines natively, emission does not
        let backend = FlakyCombine::new(usize::MAX, 1);
        let translator = FilterTranslator::new(&backend);
        let disjunction = Filter::or(eq("a", 1), eq("a", 2));
        let filter = Filter::and(disjunction.clone(), eq("b", 3));

        let err = translator.translate(Some(&filter)).unwrap_err();
        assert_eq!(
            err,
            TranslateError::inconsistent(
                &disjunction,
                Inconsistency::NotSingleQuery { count: 2 }
            )
        );
        assert_eq!(err.filter(), &disjunction);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
