pub mod ast;
pub mod coerce;
pub mod error;
pub mod locator;
pub mod node;
pub mod path_match;
pub mod schema;
pub mod tree;
pub mod typed_data;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::{hex, B256};
use serde_json::Value;
use tracing::{debug, info};

pub use coerce::{coerce, FieldValue};
pub use error::{Error, Result};
pub use locator::ArtifactLocator;
pub use schema::{FieldSchema, StructSchema, TypeRegistry};
pub use typed_data::{Eip712Hasher, StructHasher};

/// Top-level key of a compiler artifact holding the source unit's AST.
pub const AST_KEY: &str = "ast";

/// A `path/to/File.sol:StructName` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructReference {
    pub path: String,
    pub name: String,
}

impl FromStr for StructReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((path, name)) if !path.is_empty() && !name.is_empty() => Ok(Self {
                path: path.to_owned(),
                name: name.to_owned(),
            }),
            _ => Err(Error::InvalidReference(s.to_owned())),
        }
    }
}

impl fmt::Display for StructReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.name)
    }
}

/// Read a compiler artifact and return its AST.
pub fn load_ast(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let parse_error = |reason: String| Error::ArtifactParse {
        path: path.to_path_buf(),
        reason,
    };
    let mut artifact: Value =
        serde_json::from_slice(&bytes).map_err(|e| parse_error(e.to_string()))?;
    artifact
        .get_mut(AST_KEY)
        .map(Value::take)
        .ok_or_else(|| parse_error(format!("missing `{AST_KEY}` key")))
}

/// Pair raw arguments with the struct's fields, in field order.
pub fn bind_values(
    schema: &StructSchema,
    raw: &[String],
) -> Result<BTreeMap<String, FieldValue>> {
    if raw.len() != schema.fields.len() {
        let fields = schema
            .fields
            .iter()
            .map(|field| format!("{} {}", field.type_name, field.name))
            .collect::<Vec<_>>()
            .join(",");
        return Err(Error::ArityMismatch {
            got: raw.len(),
            expected: schema.fields.len(),
            fields: format!("{}({fields})", schema.name),
        });
    }
    schema
        .fields
        .iter()
        .zip(raw)
        .map(|(field, value)| Ok((field.name.clone(), coerce(value, &field.type_name)?)))
        .collect()
}

/// Hash `raw` as an instance of the referenced struct, resolving its type
/// from the matching artifact under `out_dir`.
pub fn struct_hash<H: StructHasher>(
    out_dir: &Path,
    reference: &StructReference,
    raw: &[String],
    hasher: &H,
) -> Result<B256> {
    let locator = ArtifactLocator::new(out_dir)?;
    let artifact = locator.locate(&reference.path)?;
    info!(artifact = %artifact.display(), "loading artifact");

    let ast = load_ast(&artifact)?;
    let registry = TypeRegistry::from_ast(&ast)?;
    debug!(structs = registry.len(), "extracted struct schemas");

    let schema = registry.get(&reference.name)?;
    let values = bind_values(schema, raw)?;
    hasher.hash_struct(&schema.name, &registry, &values)
}

/// `0x`-prefixed lowercase hex.
pub fn format_digest(digest: &B256) -> String {
    format!("0x{}", hex::encode(digest))
}
