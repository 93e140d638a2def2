mod common;

use common::StringBackend;
use model::{Filter, Operator, Record};
use proptest::prelude::*;
use translator::{FilterTranslator, normalize, normalize::is_normalized};

const ATTRIBUTES: [&str; 3] = ["a", "b", "c"];

fn arb_leaf() -> impl Strategy<Value = Filter> {
    (prop::sample::select(ATTRIBUTES.to_vec()), 0i64..3, any::<bool>()).prop_map(
        |(attribute, value, ordering)| {
            if ordering {
                Filter::greater_than(attribute, value).unwrap()
            } else {
                Filter::equal(attribute, value).unwrap()
            }
        },
    )
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    arb_leaf().prop_recursive(5, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Filter::not),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Filter::and(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Filter::or(l, r)),
        ]
    })
}

fn arb_backend() -> impl Strategy<Value = StringBackend> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(ordering, negation, and, or)| {
            let mut operators = vec![Operator::Equal];
            if ordering {
                operators.push(Operator::GreaterThan);
            }
            StringBackend {
                operators,
                negation,
                and,
                or,
            }
        },
    )
}

/// Every assignment of 0..3 to the three attributes, plus one with none set.
fn all_records() -> Vec<Record> {
    let mut records = vec![Record::new()];
    for a in 0..3i64 {
        for b in 0..3i64 {
            for c in 0..3i64 {
                records.push(Record::new().with("a", a).with("b", b).with("c", c));
            }
        }
    }
    records
}

proptest! {
    #[test]
    fn normalized_tree_has_negation_only_on_leaves(filter in arb_filter()) {
        prop_assert!(is_normalized(&normalize(Filter::not(filter))));
    }

    #[test]
    fn normalization_preserves_meaning(filter in arb_filter()) {
        let normalized = normalize(filter.clone());
        for record in all_records() {
            prop_assert_eq!(filter.accept(&record), normalized.accept(&record));
        }
    }

    #[test]
    fn simplify_is_idempotent(filter in arb_filter(), backend in arb_backend()) {
        let translator = FilterTranslator::new(&backend);
        let once = translator.simplify(normalize(filter)).unwrap();
        let twice = match once.clone() {
            Some(simplified) => translator.simplify(simplified).unwrap(),
            None => None,
        };
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn deterministic_backend_never_reports_inconsistency(
        filter in arb_filter(),
        backend in arb_backend(),
    ) {
        let translator = FilterTranslator::new(&backend);
        prop_assert!(translator.translate(Some(&filter)).is_ok());
    }

    #[test]
    fn simplified_filter_never_emits_empty_list(
        filter in arb_filter(),
        backend in arb_backend(),
    ) {
        let translator = FilterTranslator::new(&backend);
        if let Some(simplified) = translator.simplify(normalize(filter)).unwrap() {
            prop_assert!(!translator.emit(&simplified).unwrap().is_empty());
        }
    }

    #[test]
    fn full_backend_emits_single_query(filter in arb_filter()) {
        let backend = StringBackend::full();
        let queries = FilterTranslator::new(&backend).translate(Some(&filter)).unwrap();
        prop_assert_eq!(queries.len(), 1);
    }
}
