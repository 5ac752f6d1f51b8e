//! Source unit structure

use serde::{Deserialize, Serialize};

use super::{Declaration, Expression, Ident, Span};

/// Root of a parsed Mim source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub dependencies: Vec<Dependency>,
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    Import,
    Plugin,
}

/// `import name;` or `plugin name;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    pub name: Ident,
    pub span: Span,
}

impl SourceFile {
    /// True if recovery left any placeholder in the top-level declaration list.
    pub fn has_error_nodes(&self) -> bool {
        self.declarations.iter().any(Declaration::is_error)
    }

    /// Top-level declarations that carry a doc comment.
    pub fn documented(&self) -> impl Iterator<Item = (&Declaration, &str)> + '_ {
        self.declarations
            .iter()
            .filter_map(|decl| decl.doc.as_deref().map(|doc| (decl, doc)))
    }
}

impl Expression {
    /// True if this expression is an error placeholder.
    pub fn is_error(&self) -> bool {
        matches!(self, Expression::Error(_))
    }
}
