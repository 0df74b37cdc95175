use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid struct reference {0:?}, expected `path:StructName`")]
    InvalidReference(String),

    #[error("No artifact matching {target:?} found under {}", .root.display())]
    NotFound { target: String, root: PathBuf },

    /// Reserved: candidates with equal scores resolve to the first one seen.
    #[error("Artifact reference {target:?} is ambiguous between {candidates:?}")]
    AmbiguousArtifact {
        target: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Artifact directory {} is empty", .0.display())]
    EmptyArtifactDirectory(PathBuf),

    #[error("Matched artifact path {} is not a directory", .0.display())]
    NotAnArtifactDirectory(PathBuf),

    #[error("Failed to parse artifact {}: {reason}", .path.display())]
    ArtifactParse { path: PathBuf, reason: String },

    #[error("Malformed AST node at `{path}`: expected {expected}")]
    MalformedNode {
        path: String,
        expected: &'static str,
    },

    #[error("Unrecognized member .typeName.nodeType {kind:?} (member {member:?})")]
    UnrecognizedMemberType { member: String, kind: String },

    #[error("Unknown @custom:erc712 sub command {sub_command:?} (data: {data:?})")]
    UnknownDirective { sub_command: String, data: String },

    #[error("Malformed @custom:erc712 directive {0:?}")]
    MalformedDirective(String),

    #[error("Duplicate field {field:?} in struct {strukt:?}")]
    DuplicateField { strukt: String, field: String },

    #[error("Struct {name:?} not found, available: {available:?}")]
    UnknownStruct {
        name: String,
        available: Vec<String>,
    },

    #[error("Got {got} values, expected {expected} in:\n{fields}")]
    ArityMismatch {
        got: usize,
        expected: usize,
        fields: String,
    },

    #[error("Unrecognized boolean value {0:?}")]
    InvalidBooleanLiteral(String),

    #[error("Invalid EIP-712 typed data: {0}")]
    TypedData(#[source] serde_json::Error),

    #[error("Failed computing EIP-712 struct hash: {0}")]
    Hash(#[from] alloy_dyn_abi::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: &[&str], expected: &'static str) -> Self {
        Self::MalformedNode {
            path: path.join("."),
            expected,
        }
    }
}
