//! Commands that only read the document.

use datanode::{Node, Value};

use crate::cli::{LsArgs, PathArgs};
use crate::output::{OutputFormat, kind_label, print_table, print_value};

/// Run the `get` command. Returns `false` when the path does not resolve.
pub fn get(
    node: &Node,
    args: &PathArgs,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    match node.get(&args.path)? {
        Some(value) => {
            print_value(value, format)?;
            Ok(true)
        }
        None => {
            if format == OutputFormat::Human {
                eprintln!("No value at '{}'", args.path);
            }
            Ok(false)
        }
    }
}

/// Run the `has` command
pub fn has(
    node: &Node,
    args: &PathArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let present = node.has(&args.path)?;
    match format {
        OutputFormat::Human => println!("{present}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "path": args.path, "present": present });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Run the `ls` command
pub fn ls(
    node: &Node,
    args: &LsArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = match &args.path {
        None => node,
        Some(path) => match node.get(path)? {
            Some(Value::Node(child)) => child,
            Some(other) => {
                return Err(format!("'{path}' holds {}, not a node", other.type_name()).into());
            }
            None => return Err(format!("No value at '{path}'").into()),
        },
    };

    let mut entries: Vec<(&str, &Value)> = target.iter().collect();
    entries.sort_by_key(|(key, _)| *key);

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|(key, value)| {
                    vec![
                        key.to_string(),
                        kind_label(value).to_string(),
                        value.to_string(),
                    ]
                })
                .collect();
            print_table(&["KEY", "TYPE", "VALUE"], &rows);
        }
        OutputFormat::Json => {
            let entries: Vec<_> = entries
                .iter()
                .map(|(key, value)| {
                    serde_json::json!({
                        "key": key,
                        "type": kind_label(value),
                        "value": value,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }

    Ok(())
}

/// Run the `simplify` command
pub fn simplify(node: &Node, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => println!("{}", serde_json::to_string_pretty(node)?),
        OutputFormat::Json => println!("{node}"),
    }
    Ok(())
}
