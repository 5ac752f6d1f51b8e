//! Binder forms: patterns, batterns, implicits and groups

use serde::{Deserialize, Serialize};

use super::{Expression, Ident, Span};

/// `name : type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedBinder {
    pub name: Ident,
    pub ty: Box<Expression>,
    pub span: Span,
}

/// `a b c : T`, several names sharing one type node.
///
/// The type is kept once; [`Group::binders`] expands the sugar on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub names: Vec<Ident>,
    pub ty: Box<Expression>,
    pub span: Span,
}

impl Group {
    /// Number of binders this group stands for.
    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn binders(&self) -> impl Iterator<Item = (&Ident, &Expression)> + '_ {
        self.names.iter().map(move |name| (name, self.ty.as_ref()))
    }
}

/// Element of a binder tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TupleItem<P> {
    Group(Group),
    Binder(P),
}

impl<P> TupleItem<P> {
    pub fn arity(&self) -> usize {
        match self {
            TupleItem::Group(group) => group.arity(),
            TupleItem::Binder(_) => 1,
        }
    }
}

/// `( … )`, `[ … ]` or `{ … }` holding patterns, batterns and groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinderTuple<P> {
    pub elements: Vec<TupleItem<P>>,
    pub span: Span,
}

impl<P> BinderTuple<P> {
    /// Binder count after group expansion.
    pub fn arity(&self) -> usize {
        self.elements.iter().map(TupleItem::arity).sum()
    }
}

/// Parenthesized binder form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Identifier(Ident),
    Typed(TypedBinder),
    Tuple(BinderTuple<Pattern>),
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(id) => id.span,
            Pattern::Typed(typed) => typed.span,
            Pattern::Tuple(tuple) => tuple.span,
        }
    }
}

/// Bracketed binder form; may be anonymous (type only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Battern {
    Typed(TypedBinder),
    Tuple(BinderTuple<Battern>),
    Type(Box<Expression>),
}

impl Battern {
    pub fn span(&self) -> Span {
        match self {
            Battern::Typed(typed) => typed.span,
            Battern::Tuple(tuple) => tuple.span,
            Battern::Type(ty) => ty.span(),
        }
    }
}

/// Braced implicit binder `{ … }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implicit {
    pub elements: Vec<TupleItem<Battern>>,
    pub span: Span,
}

/// Binder slot of `let`, `ret`, `rule` and match arms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Binder {
    Pattern(Pattern),
    Battern(Battern),
}

impl Binder {
    pub fn span(&self) -> Span {
        match self {
            Binder::Pattern(p) => p.span(),
            Binder::Battern(b) => b.span(),
        }
    }
}

/// Domain of a lambda or `lam` declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LamDomain {
    Pattern(Pattern),
    Battern(Battern),
    Implicit(Implicit),
}

impl LamDomain {
    pub fn span(&self) -> Span {
        match self {
            LamDomain::Pattern(p) => p.span(),
            LamDomain::Battern(b) => b.span(),
            LamDomain::Implicit(i) => i.span,
        }
    }
}

/// Domain of a dependent function type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PiDomain {
    Battern(Battern),
    Implicit(Implicit),
}

impl PiDomain {
    pub fn span(&self) -> Span {
        match self {
            PiDomain::Battern(b) => b.span(),
            PiDomain::Implicit(i) => i.span,
        }
    }
}
