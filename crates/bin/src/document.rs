//! Loading and saving the JSON document a command operates on.

use std::{fs, io, path::Path};

use datanode::{Node, Value};
use tracing::{debug, info};

/// Load the document at `path`, or an empty node if the file does not exist.
pub fn load(path: &Path) -> Result<Node, Box<dyn std::error::Error>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "Document not found, starting empty");
            return Ok(Node::new());
        }
        Err(e) => return Err(e.into()),
    };

    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let node = Node::from_json_value(json)?;
    debug!(path = %path.display(), entries = node.len(), "Loaded document");
    Ok(node)
}

/// Write the simplified document to `path` as pretty-printed JSON.
pub fn save(path: &Path, node: &Node) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(node)?;
    fs::write(path, json + "\n")?;
    debug!(path = %path.display(), entries = node.len(), "Saved document");
    Ok(())
}

/// Parse a command line argument as JSON, falling back to plain text.
pub fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    }
}
