//! Record CLI commands

use anyhow::Result;

use super::output::Output;
use super::session::Session;
use crate::domain::{codec, Record, Value};

/// Builds record values from command-line arguments
///
/// Arguments are typed the same way drawer tokens are (`30` is an integer,
/// `"30"` is text) unless `force_text` is set.
pub fn parse_values(args: &[String], force_text: bool) -> Vec<Value> {
    args.iter()
        .map(|arg| {
            if force_text {
                Value::from(arg.as_str())
            } else {
                codec::parse_token(arg)
            }
        })
        .collect()
}

pub fn put(
    session: &Session,
    output: &Output,
    drawer: &str,
    name: &str,
    values: &[String],
    force_text: bool,
) -> Result<()> {
    let store = session.drawer(drawer)?;
    let record = Record::new(name, parse_values(values, force_text));

    output.verbose_ctx(
        "put",
        &format!("Writing {} value(s) to {}", record.len(), store.path().display()),
    );
    store.upsert(&record)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "drawer": drawer,
            "record": record,
        }));
    } else {
        output.success(&format!("Stored {} in {}", name, drawer));
    }

    Ok(())
}

pub fn take(session: &Session, output: &Output, drawer: &str, name: &str) -> Result<()> {
    let store = session.drawer(drawer)?;
    let record = store.take(name)?;

    output.verbose_ctx("take", &format!("{} has {} value(s)", name, record.len()));
    output.record(&record);

    Ok(())
}

pub fn read(
    session: &Session,
    output: &Output,
    drawer: &str,
    name: &str,
    index: usize,
) -> Result<()> {
    let store = session.drawer(drawer)?;
    let value = store.read(name, index)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "index": index,
            "kind": value.kind(),
            "value": value,
        }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

pub fn remove(session: &Session, output: &Output, drawer: &str, name: &str) -> Result<()> {
    let store = session.drawer(drawer)?;
    let removed = store.remove(name)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "removed": removed,
        }));
    } else if removed {
        output.success(&format!("Removed {} from {}", name, drawer));
    } else {
        output.success(&format!("{} not in {}, nothing removed", name, drawer));
    }

    Ok(())
}

pub fn list(session: &Session, output: &Output, drawer: &str) -> Result<()> {
    let store = session.drawer(drawer)?;
    let records = store.records()?;

    if output.is_json() {
        output.data(&records);
    } else if records.is_empty() {
        println!("No records in {}", drawer);
    } else {
        for record in &records {
            output.record(record);
        }
    }

    Ok(())
}

pub fn compact(session: &Session, output: &Output, drawer: &str) -> Result<()> {
    let store = session.drawer(drawer)?;
    let kept = store.compact()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "drawer": drawer,
            "records": kept,
        }));
    } else {
        output.success(&format!("Compacted {} ({} records)", drawer, kept));
    }

    Ok(())
}
