use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read a piped request document from stdin.
///
/// `None` when stdin is a terminal or the pipe carries only whitespace, so
/// the caller can fall back to command-line flags.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_from(io::stdin().lock())
}

/// Drain `reader` and parse what it held as JSON or YAML.
pub fn read_from<R: Read, T: DeserializeOwned>(
    mut reader: R,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

/// A document opening with `{` is JSON; anything else is read as YAML.
pub fn parse_document<T: DeserializeOwned>(
    text: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let body = text.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let json = body.starts_with('{');
    let parsed: T = if json {
        serde_json::from_str(body).map_err(|e| format!("Invalid JSON on stdin: {e}"))?
    } else {
        serde_yaml::from_str(body).map_err(|e| format!("Invalid YAML on stdin: {e}"))?
    };
    tracing::debug!(bytes = body.len(), json, "read request from stdin");
    Ok(Some(parsed))
}
