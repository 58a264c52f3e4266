//! Query-string and form body parsing.
//!
//! Keys use the bracket notation Rails and Rack understand:
//!
//! - `pet[owner][name]=Suess` nests mappings
//! - `tags[]=a&tags[]=b` builds a sequence
//! - `pets[][name]=a&pets[][name]=b` builds a sequence of mappings, starting
//!   a new element whenever the last one already holds the key

use url::form_urlencoded;

use super::{ParameterTree, TreeError};
use crate::requirements::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Push,
}

/// Parse a query string using the default nesting limit.
///
/// # Errors
///
/// Returns `TypeConflict` when a key is used both as a scalar and as a
/// container, and `DepthLimitExceeded` for keys nested too deeply.
pub fn parse_query(input: &str) -> Result<ParameterTree, TreeError> {
    parse_query_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// Parse a query string, rejecting keys nested deeper than `max_depth`.
pub fn parse_query_with_limit(input: &str, max_depth: usize) -> Result<ParameterTree, TreeError> {
    let input = input.trim().trim_start_matches('?');
    let mut root = ParameterTree::empty();

    for (name, value) in form_urlencoded::parse(input.as_bytes()) {
        let segments = split_key(&name);
        if segments.is_empty() {
            continue;
        }
        if segments.len() > max_depth {
            return Err(TreeError::DepthLimitExceeded { limit: max_depth });
        }
        insert(&mut root, &segments, value.into_owned(), &name)?;
    }

    Ok(root)
}

fn split_key(name: &str) -> Vec<Segment> {
    let (head, mut rest) = match name.find('[') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ if name.is_empty() => return Vec::new(),
        _ => return vec![Segment::Key(name.to_string())],
    };

    let mut segments = vec![Segment::Key(head.to_string())];
    while let Some(open) = rest.strip_prefix('[') {
        let Some(close) = open.find(']') else {
            break;
        };
        let inner = &open[..close];
        segments.push(if inner.is_empty() {
            Segment::Push
        } else {
            Segment::Key(inner.to_string())
        });
        rest = &open[close + 1..];
    }
    segments
}

fn container_for(segment: &Segment) -> ParameterTree {
    match segment {
        Segment::Key(_) => ParameterTree::empty(),
        Segment::Push => ParameterTree::Sequence(Vec::new()),
    }
}

/// Keys up to the next `[]`, used to decide whether a sequence element is full.
fn leading_keys(segments: &[Segment]) -> Vec<&str> {
    segments
        .iter()
        .map_while(|s| match s {
            Segment::Key(k) => Some(k.as_str()),
            Segment::Push => None,
        })
        .collect()
}

fn insert(
    node: &mut ParameterTree,
    segments: &[Segment],
    value: String,
    name: &str,
) -> Result<(), TreeError> {
    let Some((first, rest)) = segments.split_first() else {
        return Ok(());
    };

    match first {
        Segment::Key(key) => {
            let ParameterTree::Mapping(map) = node else {
                return Err(conflict(name));
            };
            match rest.first() {
                None => {
                    map.insert(key.clone(), ParameterTree::text(value));
                    Ok(())
                }
                Some(next) => {
                    let child = map
                        .entry(key.clone())
                        .or_insert_with(|| container_for(next));
                    insert(child, rest, value, name)
                }
            }
        }
        Segment::Push => {
            let ParameterTree::Sequence(items) = node else {
                return Err(conflict(name));
            };
            match rest.first() {
                None => {
                    items.push(ParameterTree::text(value));
                    return Ok(());
                }
                Some(Segment::Push) => items.push(ParameterTree::Sequence(Vec::new())),
                Some(Segment::Key(_)) => {
                    let keys = leading_keys(rest);
                    let reuse = items
                        .last()
                        .is_some_and(|last| last.is_mapping() && !last.has_path(&keys));
                    if !reuse {
                        items.push(ParameterTree::empty());
                    }
                }
            }
            match items.last_mut() {
                Some(last) => insert(last, rest, value, name),
                None => Ok(()),
            }
        }
    }
}

fn conflict(name: &str) -> TreeError {
    TreeError::TypeConflict {
        key: name.to_string(),
    }
}
