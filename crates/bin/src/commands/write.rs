//! Commands that modify the document. Callers save the node afterwards.

use datanode::{Node, Value};
use tracing::info;

use crate::cli::{ListArgs, PutArgs};
use crate::document::parse_value;
use crate::output::{OutputFormat, print_table};

/// Run the `put` command. Returns `false` when a guard refused the write.
pub fn put(
    node: &mut Node,
    args: &PutArgs,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let stored = node.put(&args.path, parse_value(&args.value))?;
    report(&args.path, stored, format)?;
    Ok(stored)
}

/// Run the `append` command
pub fn append(
    node: &mut Node,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let values = args.values.iter().map(|raw| parse_value(raw));
    let stored = node.add_to_list(&args.path, args.create, values)?;
    report(&args.path, stored, format)?;
    Ok(stored)
}

/// Run the `remove` command
pub fn remove(
    node: &mut Node,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let values = args.values.iter().map(|raw| parse_value(raw));
    let stored = node.remove_from_list(&args.path, args.create, values)?;
    report(&args.path, stored, format)?;
    Ok(stored)
}

/// Run the `clear` command
pub fn clear(node: &mut Node, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let cleared = node.clear();
    info!(count = cleared.len(), "Cleared entries");

    let mut entries: Vec<(String, Value)> = cleared.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("Nothing to clear.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|(key, previous)| vec![key.clone(), previous.to_string()])
                .collect();
            print_table(&["KEY", "PREVIOUS"], &rows);
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(key, previous)| serde_json::to_value(&previous).map(|json| (key, json)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string(&map)?);
        }
    }

    Ok(())
}

fn report(path: &str, stored: bool, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human if stored => println!("Stored '{path}'"),
        OutputFormat::Human => eprintln!("Refused by guard at '{path}'"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "path": path, "stored": stored });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
