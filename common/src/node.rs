//! Checked accessors over decoded AST JSON.
//!
//! Artifact ASTs are kept as [`serde_json::Value`] trees. Lookups walk a key
//! path and fail with [`Error::MalformedNode`] on the first shape mismatch.

use serde_json::Value;

use crate::error::{Error, Result};

/// Key under which a node lists its children.
pub const CHILDREN_KEY: &str = "nodes";

pub fn get<'a>(node: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = node;
    for (depth, key) in path.iter().enumerate() {
        let object = current
            .as_object()
            .ok_or_else(|| Error::malformed(&path[..depth], "object"))?;
        current = object
            .get(*key)
            .ok_or_else(|| Error::malformed(&path[..=depth], "present key"))?;
    }
    Ok(current)
}

pub fn get_str<'a>(node: &'a Value, path: &[&str]) -> Result<&'a str> {
    get(node, path)?
        .as_str()
        .ok_or_else(|| Error::malformed(path, "string"))
}

pub fn get_list<'a>(node: &'a Value, path: &[&str]) -> Result<&'a [Value]> {
    get(node, path)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::malformed(path, "array"))
}

/// Like [`get`], but a missing or `null` final key yields `None`.
pub fn get_opt<'a>(node: &'a Value, path: &[&str]) -> Result<Option<&'a Value>> {
    let Some((last, parent)) = path.split_last() else {
        return Ok(Some(node));
    };
    let parent = get(node, parent)?
        .as_object()
        .ok_or_else(|| Error::malformed(parent, "object"))?;
    Ok(parent.get(*last).filter(|value| !value.is_null()))
}

/// Children of `node`, or an empty slice if it has none.
pub fn children(node: &Value) -> Result<&[Value]> {
    match get_opt(node, &[CHILDREN_KEY])? {
        None => Ok(&[]),
        Some(Value::Array(nodes)) => Ok(nodes),
        Some(_) => Err(Error::malformed(&[CHILDREN_KEY], "array of nodes")),
    }
}
