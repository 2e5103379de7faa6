//! Document kinds and the ledger key scheme.
//!
//! Every record is stored as a JSON document under `<kind>:<id>`, and
//! carries a `docType` discriminator so structured queries can filter by
//! kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator for persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocType {
    Project,
    Milestone,
    Activity,
}

impl DocType {
    /// All kinds, in bare-id resolution order.
    pub const ALL: [DocType; 3] = [DocType::Project, DocType::Milestone, DocType::Activity];

    /// Key prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            DocType::Project => "project",
            DocType::Milestone => "milestone",
            DocType::Activity => "activity",
        }
    }

    /// Ledger key of the record with this kind and id.
    pub fn key_for(&self, id: &str) -> String {
        format!("{}:{}", self.prefix(), id)
    }

    /// The `docType` value written into documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Project => "Project",
            DocType::Milestone => "Milestone",
            DocType::Activity => "Activity",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller-supplied key, either fully qualified or a bare record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    /// `<kind>:<id>` with a known kind prefix.
    Qualified { kind: DocType, id: String },
    /// Anything else; resolved against every kind.
    Bare(String),
}

impl EntityKey {
    /// Classifies a raw key.
    pub fn parse(raw: &str) -> Self {
        if let Some((prefix, id)) = raw.split_once(':') {
            if let Some(kind) = DocType::from_prefix(prefix) {
                if !id.is_empty() {
                    return EntityKey::Qualified {
                        kind,
                        id: id.to_string(),
                    };
                }
            }
        }
        EntityKey::Bare(raw.to_string())
    }

    /// The key as the caller wrote it.
    pub fn raw(&self) -> String {
        match self {
            EntityKey::Qualified { kind, id } => kind.key_for(id),
            EntityKey::Bare(raw) => raw.clone(),
        }
    }

    /// Candidate ledger keys, in resolution order.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            EntityKey::Qualified { kind, id } => vec![kind.key_for(id)],
            EntityKey::Bare(id) => every_kind(id),
        }
    }

    /// Keys to try when a qualified key matches nothing: the whole raw
    /// string taken as a bare id. Empty for bare keys.
    pub fn fallback_candidates(&self) -> Vec<String> {
        match self {
            EntityKey::Qualified { .. } => every_kind(&self.raw()),
            EntityKey::Bare(_) => Vec::new(),
        }
    }
}

fn every_kind(id: &str) -> Vec<String> {
    DocType::ALL.iter().map(|kind| kind.key_for(id)).collect()
}

/// A document persisted under its own ledger key.
pub trait LedgerRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Kind of this record.
    const DOC_TYPE: DocType;

    /// The record's own id (without prefix).
    fn record_id(&self) -> &str;

    /// The `docType` stored in this instance.
    fn doc_type(&self) -> DocType;

    /// Ledger key of this record.
    fn ledger_key(&self) -> String {
        Self::DOC_TYPE.key_for(self.record_id())
    }
}
