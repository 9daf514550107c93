//! Changeset file parser.
//!
//! Layout:
//!
//! ```text
//! ---
//! "@acme/tree": minor
//! "__section": tree
//! ---
//! ---            (optional second block, metadata only)
//! highlight: true
//! ---
//!
//! Title line
//!
//! Markdown description...
//! ```

use super::{BumpType, Changeset, ChangesetMetadata};
use crate::error::ChangesetError;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;

const DELIMITER: &str = "---";
const METADATA_PREFIX: &str = "__";

/// Parse changeset text read from `path`.
pub fn parse_changeset(id: &str, path: &Path, text: &str) -> Result<Changeset, ChangesetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).replace("\r\n", "\n");

    let (first, rest) = split_block(&text, path)?.ok_or_else(|| {
        ChangesetError::MissingFrontmatter {
            path: path.to_path_buf(),
        }
    })?;

    let mut releases = BTreeMap::new();
    let mut metadata = ChangesetMetadata::default();

    for (key, value) in parse_mapping(first, path)? {
        match key.strip_prefix(METADATA_PREFIX) {
            Some(meta_key) => apply_metadata(&mut metadata, meta_key, &value, path)?,
            None => {
                let bump = parse_bump(&key, &value, path)?;
                releases.insert(key, bump);
            }
        }
    }

    let body_text = match split_block(rest, path)? {
        Some((second, after)) => {
            for (key, value) in parse_mapping(second, path)? {
                let meta_key = key.strip_prefix(METADATA_PREFIX).unwrap_or(&key);
                apply_metadata(&mut metadata, meta_key, &value, path)?;
            }
            after
        }
        None => rest,
    };

    let (title, body) = split_title(body_text);

    Ok(Changeset {
        id: id.to_string(),
        path: path.to_path_buf(),
        releases,
        metadata,
        title,
        body,
    })
}

/// Split a leading `---` delimited block off `text`, skipping blank lines before it.
///
/// Returns `None` when `text` does not start with a delimiter line.
fn split_block<'a>(text: &'a str, path: &Path) -> Result<Option<(&'a str, &'a str)>, ChangesetError> {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    let opened = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => offset += line.len(),
            Some(line) if line.trim_end() == DELIMITER => {
                offset += line.len();
                break true;
            }
            _ => break false,
        }
    };
    if !opened {
        return Ok(None);
    }

    let block_start = offset;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let block = &text[block_start..offset];
            let rest = &text[offset + line.len()..];
            return Ok(Some((block, rest)));
        }
        offset += line.len();
    }

    Err(ChangesetError::UnterminatedFrontmatter {
        path: path.to_path_buf(),
    })
}

fn parse_mapping(block: &str, path: &Path) -> Result<Vec<(String, Value)>, ChangesetError> {
    if block.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping: Mapping = serde_yaml::from_str(block).map_err(|e| ChangesetError::InvalidYaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    mapping
        .into_iter()
        .map(|(key, value)| match key {
            Value::String(key) => Ok((key, value)),
            other => Err(ChangesetError::InvalidYaml {
                path: path.to_path_buf(),
                message: format!("frontmatter keys must be strings, found {}", scalar_text(&other)),
            }),
        })
        .collect()
}

fn parse_bump(package: &str, value: &Value, path: &Path) -> Result<BumpType, ChangesetError> {
    let invalid = || ChangesetError::InvalidBump {
        path: path.to_path_buf(),
        package: package.to_string(),
        value: scalar_text(value),
    };
    match value {
        Value::String(s) => s.parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn apply_metadata(
    metadata: &mut ChangesetMetadata,
    key: &str,
    value: &Value,
    path: &Path,
) -> Result<(), ChangesetError> {
    let invalid = |message: &str| ChangesetError::InvalidMetadata {
        path: path.to_path_buf(),
        key: key.to_string(),
        message: message.to_string(),
    };

    match key {
        "section" => match value {
            Value::String(s) if !s.trim().is_empty() => {
                metadata.section = Some(s.trim().to_string());
            }
            _ => return Err(invalid("expected a non-empty section name")),
        },
        "highlight" => {
            metadata.highlight = value.as_bool().ok_or_else(|| invalid("expected true or false"))?;
        }
        "includeInReleaseNotes" => {
            metadata.include_in_release_notes =
                value.as_bool().ok_or_else(|| invalid("expected true or false"))?;
        }
        other => {
            metadata.extra.insert(other.to_string(), scalar_text(value));
        }
    }
    Ok(())
}

/// First non-empty line (heading marker stripped) and the trimmed remainder.
fn split_title(text: &str) -> (String, String) {
    let text = text.trim_start_matches(|c: char| c == '\n' || c == ' ' || c == '\t');
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let title = strip_heading_marker(first.trim()).to_string();
    (title, rest.trim().to_string())
}

/// Remove an ATX heading marker (`#` to `######` then whitespace). `#123 fix`
/// is not a heading and is returned unchanged.
pub(crate) fn strip_heading_marker(line: &str) -> &str {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if !(1..=6).contains(&hashes) {
        return line;
    }
    let rest = &line[hashes..];
    if rest.is_empty() {
        ""
    } else if rest.starts_with(|c: char| c == ' ' || c == '\t') {
        rest.trim()
    } else {
        line
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
