//! Structured error types shared across DGM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EdgeId, ElementId, NodeId};

/// Structured payload attached to every [`DiagramError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, kinds, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the diagram model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DiagramError {
    /// A referenced node or hyperedge is not registered.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// An identifier supplied for creation or rename already denotes a live entity.
    #[error("duplicate id: {0}")]
    DuplicateId(ErrorInfo),
    /// Serialization, schema and snapshot consistency errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// A structural invariant of the registry does not hold.
    #[error("invariant violated: {0}")]
    Invariant(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DiagramError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DiagramError::NotFound(info)
            | DiagramError::DuplicateId(info)
            | DiagramError::Serde(info)
            | DiagramError::Invariant(info) => info,
        }
    }

    /// Returns whether this error reports a missing node or edge.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiagramError::NotFound(_))
    }

    /// Returns whether this error reports an identifier collision.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, DiagramError::DuplicateId(_))
    }

    /// Adds a context entry to the wrapped payload.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            DiagramError::NotFound(info) => {
                DiagramError::NotFound(info.with_context(key, value.to_string()))
            }
            DiagramError::DuplicateId(info) => {
                DiagramError::DuplicateId(info.with_context(key, value.to_string()))
            }
            DiagramError::Serde(info) => {
                DiagramError::Serde(info.with_context(key, value.to_string()))
            }
            DiagramError::Invariant(info) => {
                DiagramError::Invariant(info.with_context(key, value.to_string()))
            }
        }
    }

    /// Error raised when a node id is not registered.
    pub fn unknown_node(id: NodeId) -> Self {
        DiagramError::NotFound(ErrorInfo::new("unknown-node", "node does not exist"))
            .with_context("node", id.as_raw())
    }

    /// Error raised when an edge id is not registered.
    pub fn unknown_edge(id: EdgeId) -> Self {
        DiagramError::NotFound(ErrorInfo::new("unknown-edge", "hyperedge does not exist"))
            .with_context("edge", id.as_raw())
    }

    /// Error raised when `requested` collides with the live entity `holder`.
    pub fn duplicate(requested: u64, holder: ElementId) -> Self {
        DiagramError::DuplicateId(
            ErrorInfo::new("duplicate-id", "identifier already denotes a live entity")
                .with_hint("allocate a fresh id or remove the existing entity first"),
        )
        .with_context("id", requested)
        .with_context("kind", holder.kind())
    }

    /// Serialization failure with the provided code.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        DiagramError::Serde(ErrorInfo::new(code, message))
    }

    /// Registry invariant violation with the provided message.
    pub fn inconsistent(message: impl Into<String>) -> Self {
        DiagramError::Invariant(ErrorInfo::new("inconsistent-registry", message))
    }

    /// Error raised when the allocation cursor cannot advance any further.
    pub fn id_space_exhausted(cursor: u64) -> Self {
        DiagramError::Invariant(ErrorInfo::new(
            "id-space-exhausted",
            "no identifier is left to allocate",
        ))
        .with_context("cursor", cursor)
    }
}
