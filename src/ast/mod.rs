//! Abstract Syntax Tree (AST) definitions for the Mim language.
//!
//! Every node owns its children and carries the byte span it was parsed from.
//! The tree is built once by the parser and never mutated afterwards.

use serde::{Deserialize, Serialize};

mod declarations;
mod expressions;
mod patterns;
mod pretty;
mod program;

pub use declarations::*;
pub use expressions::*;
pub use patterns::*;
pub use program::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A plain identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Namespaced reference to an axiom or builtin: `%module.name[.subtag | (subtags)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnexName {
    pub module: String,
    pub name: String,
    /// Dotted subtag, `%core.nat.add`
    pub subtag: Option<String>,
    /// Parenthesized subtag list, `%core.nat(add, sub = minus)`
    pub subtags: Vec<AnnexSubtag>,
    pub span: Span,
}

impl AnnexName {
    /// Dotted path without the sigil: `module.name[.subtag]`.
    pub fn path(&self) -> String {
        match &self.subtag {
            Some(subtag) => format!("{}.{}.{}", self.module, self.name, subtag),
            None => format!("{}.{}", self.module, self.name),
        }
    }
}

/// One entry of an annex subtag list together with its aliases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnexSubtag {
    pub tag: Ident,
    pub aliases: Vec<Ident>,
    pub span: Span,
}

/// Name position: either an identifier or an annex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Name {
    Ident(Ident),
    Annex(AnnexName),
}

impl Name {
    pub fn span(&self) -> Span {
        match self {
            Name::Ident(id) => id.span,
            Name::Annex(annex) => annex.span,
        }
    }
}
