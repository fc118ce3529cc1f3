//! Existence checks for protocol entities against external documentation.
//!
//! Amendment specs that modify an existing ledger entry or transaction don't
//! need to repeat everything about it. The validator asks an `EntityLookup`
//! whether a name is already documented; the answer is tri-state so each
//! call site can decide how to treat a failed lookup.

mod http;

use std::collections::HashSet;
use std::fmt;

pub use http::HttpLookup;

/// Kind of protocol entity being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    LedgerEntry,
    Transaction,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::LedgerEntry => "ledger entry",
            EntityKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of an existence lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// Confirmed documented
    Present,
    /// Confirmed not documented
    Absent,
    /// The lookup failed or gave an unexpected answer
    Unknown,
}

/// Capability to check whether a named entity already exists.
pub trait EntityLookup {
    fn exists(&self, kind: EntityKind, name: &str) -> Existence;
}

/// Lookup that never reaches the network; every answer is `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl EntityLookup for OfflineLookup {
    fn exists(&self, _kind: EntityKind, _name: &str) -> Existence {
        Existence::Unknown
    }
}

/// Lookup with fixed answers. Names not listed get the fallback.
#[derive(Debug, Clone)]
pub struct StaticLookup {
    known: HashSet<(EntityKind, String)>,
    fallback: Existence,
}

impl StaticLookup {
    /// Everything not explicitly added is `Absent`.
    pub fn new() -> Self {
        Self::with_fallback(Existence::Absent)
    }

    pub fn with_fallback(fallback: Existence) -> Self {
        Self {
            known: HashSet::new(),
            fallback,
        }
    }

    /// Mark an entity as existing. Names are compared case-insensitively.
    pub fn with(mut self, kind: EntityKind, name: &str) -> Self {
        self.known.insert((kind, name.to_lowercase()));
        self
    }
}

impl Default for StaticLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityLookup for StaticLookup {
    fn exists(&self, kind: EntityKind, name: &str) -> Existence {
        if self.known.contains(&(kind, name.to_lowercase())) {
            Existence::Present
        } else {
            self.fallback
        }
    }
}

impl<T: EntityLookup + ?Sized> EntityLookup for &T {
    fn exists(&self, kind: EntityKind, name: &str) -> Existence {
        (**self).exists(kind, name)
    }
}

impl<T: EntityLookup + ?Sized> EntityLookup for Box<T> {
    fn exists(&self, kind: EntityKind, name: &str) -> Existence {
        (**self).exists(kind, name)
    }
}
