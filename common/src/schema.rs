use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::ast;
use crate::error::{Error, Result};
use crate::node;

/// Doc-comment tag that carries struct hashing directives, e.g.
/// `/// @custom:erc712:exclude nonce, deadline`.
pub const ERC712_MARKER: &str = "@custom:erc712";

const USER_DEFINED_TYPE: &str = "UserDefinedTypeName";
const ELEMENTARY_TYPE: &str = "ElementaryTypeName";

/// One EIP-712 struct member, serialized as `{"name": .., "type": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A struct's name and its fields in encoding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

/// A parsed `@custom:erc712` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Drop the named fields from the hashed struct.
    Exclude(BTreeSet<String>),
}

impl Directive {
    /// Parses a struct's documentation text. Text without the marker carries
    /// no directive.
    pub fn parse(doc: &str) -> Result<Option<Self>> {
        let Some(rest) = doc.strip_prefix(ERC712_MARKER) else {
            return Ok(None);
        };
        let command = rest
            .strip_prefix(':')
            .ok_or_else(|| Error::MalformedDirective(doc.to_owned()))?;
        let (sub_command, data) = command
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::MalformedDirective(doc.to_owned()))?;

        match sub_command {
            "exclude" => Ok(Some(Self::Exclude(
                data.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ))),
            other => Err(Error::UnknownDirective {
                sub_command: other.to_owned(),
                data: data.trim().to_owned(),
            }),
        }
    }

    pub fn apply(&self, fields: Vec<FieldSchema>) -> Vec<FieldSchema> {
        match self {
            Self::Exclude(names) => fields
                .into_iter()
                .filter(|field| !names.contains(&field.name))
                .collect(),
        }
    }
}

/// Resolves a struct member's EIP-712 type from its `typeName` descriptor.
pub fn member_field(member: &Value) -> Result<FieldSchema> {
    let name = node::get_str(member, &["name"])?;
    let kind = node::get_str(member, &["typeName", "nodeType"])?;
    let type_name = match kind {
        // Qualified references (`Lib.Asset`) hash under the bare struct name.
        USER_DEFINED_TYPE => {
            let path = node::get_str(member, &["typeName", "pathNode", "name"])?;
            path.rsplit('.').next().unwrap_or(path)
        }
        ELEMENTARY_TYPE => node::get_str(member, &["typeName", "name"])?,
        other => {
            return Err(Error::UnrecognizedMemberType {
                member: name.to_owned(),
                kind: other.to_owned(),
            })
        }
    };
    Ok(FieldSchema::new(name, type_name))
}

fn documentation(node: &Value) -> Result<Option<&str>> {
    match node::get_opt(node, &["documentation"])? {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(doc) => node::get_str(doc, &["text"]).map(Some),
    }
}

/// Builds the schema of a `StructDefinition` node, applying any
/// `@custom:erc712` directive from its documentation.
pub fn extract_struct(node: &Value) -> Result<StructSchema> {
    let name = node::get_str(node, &["name"])?.to_owned();
    let mut fields = node::get_list(node, &["members"])?
        .iter()
        .map(member_field)
        .collect::<Result<Vec<_>>>()?;

    let mut seen = BTreeSet::new();
    if let Some(dup) = fields.iter().find(|field| !seen.insert(field.name.as_str())) {
        return Err(Error::DuplicateField {
            strukt: name,
            field: dup.name.clone(),
        });
    }

    if let Some(directive) = documentation(node)?.map(Directive::parse).transpose()?.flatten() {
        debug!(name = %name, ?directive, "applying erc712 directive");
        fields = directive.apply(fields);
    }
    Ok(StructSchema { name, fields })
}

/// All struct schemas of one artifact, keyed by struct name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeMap<String, StructSchema>,
}

impl TypeRegistry {
    /// Extracts every struct definition found in `ast`. A later definition
    /// with an already seen name replaces the earlier one.
    pub fn from_ast(ast: &Value) -> Result<Self> {
        let mut registry = Self::default();
        for node in ast::struct_definitions(ast) {
            registry.insert(extract_struct(node?)?);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, schema: StructSchema) {
        if let Some(previous) = self.types.insert(schema.name.clone(), schema) {
            debug!(name = %previous.name, "struct definition shadowed");
        }
    }

    pub fn get(&self, name: &str) -> Result<&StructSchema> {
        self.types.get(name).ok_or_else(|| Error::UnknownStruct {
            name: name.to_owned(),
            available: self.types.keys().cloned().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructSchema> {
        self.types.values()
    }

    /// The registry as an EIP-712 `types` object.
    pub fn to_eip712_types(&self) -> Value {
        let types = self
            .iter()
            .map(|schema| (schema.name.clone(), serde_json::json!(schema.fields)))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(types)
    }
}
