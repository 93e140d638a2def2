//! An in-memory record store with its own leaf translator.
//!
//! Queries are predicate trees evaluated record by record. The store follows
//! the fan-out contract of the translation engine: an empty query list reads
//! everything, several queries are unioned by the identifier attribute.

use crate::{capabilities::Capabilities, error::ConnectorError};
use model::{Condition, Filter, Record, Value};
use std::{collections::HashSet, fmt};
use tracing::{debug, trace};
use translator::{FilterTranslator, LeafTranslator, TranslateError, TranslatorConfig};

/// A pushed-down query for the memory store.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPredicate {
    Condition { condition: Condition, negated: bool },
    All(Vec<RecordPredicate>),
    Any(Vec<RecordPredicate>),
}

impl RecordPredicate {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RecordPredicate::Condition { condition, negated } => {
                condition.matches(record) != *negated
            }
            RecordPredicate::All(children) => children.iter().all(|c| c.matches(record)),
            RecordPredicate::Any(children) => children.iter().any(|c| c.matches(record)),
        }
    }
}

/// Renders in filter text form, e.g. `(age gt 40 and not name eq "x")`.
impl fmt::Display for RecordPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[RecordPredicate], sep: &str) -> fmt::Result {
            let parts = children.iter().map(ToString::to_string).collect::<Vec<_>>();
            write!(f, "({})", parts.join(sep))
        }

        match self {
            RecordPredicate::Condition {
                condition,
                negated: false,
            } => write!(f, "{condition}"),
            RecordPredicate::Condition {
                condition,
                negated: true,
            } => write!(f, "not {condition}"),
            RecordPredicate::All(children) => join(f, children, " and "),
            RecordPredicate::Any(children) => join(f, children, " or "),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTranslator {
    capabilities: Capabilities,
}

impl MemoryTranslator {
    pub fn new(capabilities: Capabilities) -> Self {
        MemoryTranslator { capabilities }
    }
}

impl LeafTranslator for MemoryTranslator {
    type Query = RecordPredicate;

    fn translate_leaf(&self, condition: &Condition, negated: bool) -> Option<RecordPredicate> {
        self.capabilities
            .supports_leaf(condition, negated)
            .then(|| RecordPredicate::Condition {
                condition: condition.clone(),
                negated,
            })
    }

    fn combine_and(&self, lhs: &RecordPredicate, rhs: &RecordPredicate) -> Option<RecordPredicate> {
        self.capabilities
            .and
            .then(|| RecordPredicate::All(vec![lhs.clone(), rhs.clone()]))
    }

    fn combine_or(&self, lhs: &RecordPredicate, rhs: &RecordPredicate) -> Option<RecordPredicate> {
        self.capabilities
            .or
            .then(|| RecordPredicate::Any(vec![lhs.clone(), rhs.clone()]))
    }
}

/// Records keyed by one identifier attribute.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    id_attribute: String,
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(id_attribute: impl Into<String>) -> Self {
        MemoryStore {
            id_attribute: id_attribute.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(id_attribute: impl Into<String>, records: Vec<Record>) -> Self {
        MemoryStore {
            id_attribute: id_attribute.into(),
            records,
        }
    }

    /// Loads a JSON array of objects, one record per object.
    pub fn from_json(id_attribute: impl Into<String>, json: &str) -> Result<Self, ConnectorError> {
        let objects: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;
        let records = objects
            .into_iter()
            .map(|object| {
                object
                    .into_iter()
                    .try_fold(Record::new(), |record, (name, value)| {
                        serde_json::from_value::<Value>(value).map(|value| record.with(&name, value))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_records(id_attribute, records))
    }

    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs every query and unions the results by identifier, in first-seen
    /// order. Records without an identifier are told apart by position.
    pub fn execute(&self, queries: &[RecordPredicate]) -> Vec<&Record> {
        if queries.is_empty() {
            return self.records.iter().collect();
        }

        let mut seen_ids: HashSet<&Value> = HashSet::new();
        let mut seen_rows: HashSet<usize> = HashSet::new();
        let mut results = Vec::new();

        for query in queries {
            for (row, record) in self.records.iter().enumerate() {
                if !query.matches(record) {
                    continue;
                }
                let first_seen = match record.get(&self.id_attribute) {
                    Some(id) if !id.is_null() => seen_ids.insert(id),
                    _ => seen_rows.insert(row),
                };
                if first_seen {
                    results.push(record);
                }
            }
        }

        trace!(queries = queries.len(), matched = results.len(), "executed queries");
        results
    }

    /// Translates `filter`, runs the queries and re-applies the filter to
    /// what came back, so constraints the translator dropped still hold.
    pub fn search(
        &self,
        filter: Option<&Filter>,
        translator: &MemoryTranslator,
        config: TranslatorConfig,
    ) -> Result<Vec<&Record>, TranslateError> {
        let queries = FilterTranslator::with_config(translator, config).translate(filter)?;
        let mut records = self.execute(&queries);
        let fetched = records.len();

        if let Some(filter) = filter {
            records.retain(|record| filter.accept(record));
        }
        debug!(
            queries = queries.len(),
            fetched,
            returned = records.len(),
            "searched memory store"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Operator;

    fn people() -> MemoryStore {
        MemoryStore::with_records(
            "id",
            vec![
                Record::new().with("id", 1).with("name", "Ada").with("age", 36),
                Record::new().with("id", 2).with("name", "Alan").with("age", 41),
                Record::new().with("id", 3).with("name", "Grace"),
            ],
        )
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_predicate_negation_flag() {
        let record = Record::new().with("age", 20);
        let cond = Condition::new("age", Operator::GreaterThan, 18).unwrap();
        let positive = RecordPredicate::Condition {
            condition: cond.clone(),
            negated: false,
        };
        let negative = RecordPredicate::Condition {
            condition: cond,
            negated: true,
        };
        assert!(positive.matches(&record));
        assert!(!negative.matches(&record));
        assert!(RecordPredicate::All(vec![]).matches(&record));
        assert!(!RecordPredicate::Any(vec![]).matches(&record));
    }

    #[test]
    fn test_display() {
        let cond = Condition::new("age", Operator::GreaterThan, 40).unwrap();
        let predicate = RecordPredicate::Any(vec![
            RecordPredicate::Condition {
                condition: cond.clone(),
                negated: true,
            },
            RecordPredicate::All(vec![RecordPredicate::Condition {
                condition: cond,
                negated: false,
            }]),
        ]);
        assert_eq!(predicate.to_string(), "(not age gt 40 or (age gt 40))");
    }

    #[test]
    fn test_execute_without_queries_returns_everything() {
        let store = people();
        assert_eq!(store.execute(&[]).len(), 3);
    }

    #[test]
    fn test_execute_unions_by_identifier() {
        let store = people();
        let starts_with_a = RecordPredicate::Condition {
            condition: Condition::new("name", Operator::StartsWith, "A").unwrap(),
            negated: false,
        };
        let older = RecordPredicate::Condition {
            condition: Condition::new("age", Operator::GreaterThan, 40).unwrap(),
            negated: false,
        };
        let results = store.execute(&[older, starts_with_a]);
        assert_eq!(names(&results), vec!["Alan", "Ada"]);
    }

    #[test]
    fn test_search_refilters_dropped_constraints() {
        let store = people();
        // the backend can only do equality, so `age gt 40` is widened away
        let translator = MemoryTranslator::new(Capabilities::with_operators([Operator::Equal]));
        let filter = Filter::and(
            Filter::greater_than("age", 40).unwrap(),
            Filter::or(
                Filter::equal("name", "Ada").unwrap(),
                Filter::equal("name", "Alan").unwrap(),
            ),
        );

        let queries = FilterTranslator::new(&translator)
            .translate(Some(&filter))
            .unwrap();
        assert_eq!(names(&store.execute(&queries)), vec!["Ada", "Alan"]);

        let results = store
            .search(Some(&filter), &translator, TranslatorConfig::default())
            .unwrap();
        assert_eq!(names(&results), vec!["Alan"]);
    }

    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json(
            "id",
            r#"[{"id": 1, "name": "Ada", "tags": ["math"]}, {"id": 2, "name": null}]"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.records()[0].get("tags"),
            Some(&Value::Array(vec![Value::String("math".into())]))
        );
        assert!(MemoryStore::from_json("id", "{").is_err());
    }
}
