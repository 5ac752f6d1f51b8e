//! Declaration nodes

use serde::{Deserialize, Serialize};

use super::{AnnexName, Battern, Binder, Expression, Ident, LamDomain, Name, Span};

/// A declaration together with the doc comment written directly above it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub doc: Option<String>,
    pub kind: DeclarationKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Axiom(AxiomDecl),
    Cfun(CfunDecl),
    Ccon(CconDecl),
    Let(LetDecl),
    Rec(RecDecl),
    Lam(LamDecl),
    Rule(RuleDecl),
    /// Placeholder left behind by error recovery
    Error,
}

/// `axm %m.n : T [, normalizer] [, curry [, trip]]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomDecl {
    pub name: AnnexName,
    pub ty: Expression,
    pub normalizer: Option<Ident>,
    pub curry: Option<u64>,
    pub trip: Option<Ident>,
    pub span: Span,
}

/// `cfun battern : T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfunDecl {
    pub domain: Battern,
    pub ty: Expression,
    pub span: Span,
}

/// `ccon battern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CconDecl {
    pub domain: Battern,
    pub span: Span,
}

/// What a `let` binds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LetTarget {
    Annex(AnnexName),
    Binder(Binder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetDecl {
    pub target: LetTarget,
    pub value: Expression,
    pub span: Span,
}

/// One `name [: T] = e` member of a `rec` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecBinding {
    pub name: Name,
    pub ty: Option<Expression>,
    pub value: Expression,
    pub span: Span,
}

/// Mutually recursive group; every name is visible in every right-hand side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecDecl {
    pub bindings: Vec<RecBinding>,
    pub lam: Option<LamDecl>,
    pub span: Span,
}

impl RecDecl {
    /// All names bound by the group, trailing `and lam` included.
    pub fn names(&self) -> impl Iterator<Item = &Name> + '_ {
        self.bindings
            .iter()
            .map(|binding| &binding.name)
            .chain(self.lam.iter().map(|lam| &lam.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LamKind {
    Lam,
    Con,
    Fun,
}

/// Domain of a `lam` declaration with its optional `@` filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LamParam {
    pub domain: LamDomain,
    pub filter: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LamDecl {
    pub kind: LamKind,
    pub is_extern: bool,
    pub name: Name,
    pub params: Vec<LamParam>,
    pub codomain: Option<Expression>,
    pub body: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    Rule,
    Norm,
}

/// `rule binder : lhs [when guard] => rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDecl {
    pub kind: RuleKind,
    pub binder: Binder,
    pub lhs: Expression,
    pub guard: Option<Expression>,
    pub rhs: Expression,
    pub span: Span,
}

impl Declaration {
    pub fn is_error(&self) -> bool {
        matches!(self.kind, DeclarationKind::Error)
    }

    /// Name introduced by simple declarations. Groups and pattern lets return `None`.
    pub fn name(&self) -> Option<String> {
        match &self.kind {
            DeclarationKind::Axiom(axiom) => Some(axiom.name.path()),
            DeclarationKind::Lam(lam) => Some(name_text(&lam.name)),
            DeclarationKind::Let(LetDecl {
                target: LetTarget::Annex(annex),
                ..
            }) => Some(annex.path()),
            _ => None,
        }
    }
}

fn name_text(name: &Name) -> String {
    match name {
        Name::Ident(id) => id.name.clone(),
        Name::Annex(annex) => annex.path(),
    }
}
