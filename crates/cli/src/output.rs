use crate::error::CliError;
use connectors::memory::RecordPredicate;
use model::{Filter, Record};
use serde_json::{Map, Value as JsonValue};

pub fn print_statements(statements: &[String], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(statements)?);
        return Ok(());
    }
    for statement in statements {
        println!("{statement};");
    }
    Ok(())
}

pub fn print_predicates(predicates: &[RecordPredicate], json: bool) -> Result<(), CliError> {
    let rendered = predicates.iter().map(ToString::to_string).collect::<Vec<_>>();
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else if rendered.is_empty() {
        println!("no filter: every record matches");
    } else {
        for predicate in rendered {
            println!("{predicate}");
        }
    }
    Ok(())
}

pub fn print_records(records: &[&Record], json: bool) -> Result<(), CliError> {
    let objects = records
        .iter()
        .map(|record| record_json(record))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&objects)?);
    } else {
        for object in objects {
            println!("{object}");
        }
    }
    Ok(())
}

pub fn print_filter(filter: &Filter, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(filter)?);
    } else {
        println!("{filter}");
    }
    Ok(())
}

/// A record as a flat JSON object.
fn record_json(record: &Record) -> Result<JsonValue, serde_json::Error> {
    let mut object = Map::new();
    for field in &record.fields {
        object.insert(field.name.clone(), serde_json::to_value(&field.value)?);
    }
    Ok(JsonValue::Object(object))
}
