//! Expression nodes

use serde::{Deserialize, Serialize};

use super::{
    AnnexName, Battern, Binder, BinderTuple, Declaration, Ident, LamDomain, Name, PiDomain, Span,
};

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Primitive(PrimitiveExpr),
    Identifier(Ident),
    Annex(AnnexName),
    Literal(LiteralExpr),
    Annotated(AnnotatedExpr),
    Declarations(DeclExpr),
    Pi(PiExpr),
    Lambda(LambdaExpr),
    Insert(InsertExpr),
    Ret(RetExpr),
    Uniq(UniqExpr),
    Array(ArrayExpr),
    Pack(PackExpr),
    Sigma(SigmaExpr),
    Tuple(TupleExpr),
    Match(MatchExpr),
    Extraction(ExtractionExpr),
    Arrow(ArrowExpr),
    Union(UnionExpr),
    Injection(InjectionExpr),
    Application(ApplicationExpr),
    Where(WhereExpr),
    /// Placeholder for an error sentinel
    Error(Span),
}

/// Builtin type primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Univ,
    Type,
    Nat,
    Idx,
    Bool,
    I1,
    I8,
    I16,
    I32,
    I64,
    /// `*` / `★`
    Star,
    /// `□`
    Box,
    /// `.bot` / `⊥`
    Bot,
    /// `.top` / `⊤`
    Top,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveExpr {
    pub kind: Primitive,
    pub span: Span,
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

/// `literal : type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedExpr {
    pub value: LiteralExpr,
    pub ty: Box<Expression>,
    pub span: Span,
}

/// `decl+ expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclExpr {
    pub declarations: Vec<Declaration>,
    pub body: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiKind {
    /// `[x: T] -> U` / `{x: T} -> U`
    Arrow,
    /// `Cn T`
    Cn,
    /// `Fn T [-> U]`
    Fn,
}

/// Dependent function type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiExpr {
    pub kind: PiKind,
    pub domain: PiDomain,
    pub codomain: Option<Box<Expression>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LambdaKind {
    /// `lm` / `λ` / `fn`
    Lm,
    /// `cn`
    Cn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpr {
    pub kind: LambdaKind,
    pub domains: Vec<LamDomain>,
    pub codomain: Option<Box<Expression>>,
    pub body: Box<Expression>,
    pub span: Span,
}

/// `ins(tuple, index, value)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertExpr {
    pub tuple: Box<Expression>,
    pub index: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

/// `ret binder = callee $ argument; body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetExpr {
    pub binder: Binder,
    pub callee: Box<Expression>,
    pub argument: Box<Expression>,
    pub body: Box<Expression>,
    pub span: Span,
}

/// Singleton type `{| e |}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqExpr {
    pub inner: Box<Expression>,
    pub span: Span,
}

/// `«n, m; T»`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpr {
    pub sizes: Vec<Expression>,
    pub element: Box<Expression>,
    pub span: Span,
}

/// `‹shape; body›`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackExpr {
    pub shape: Box<Expression>,
    pub body: Box<Expression>,
    pub span: Span,
}

/// `[x: T, U] [as name]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmaExpr {
    pub tuple: BinderTuple<Battern>,
    pub alias: Option<Name>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpr {
    pub elements: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExpr {
    pub scrutinee: Box<Expression>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchArm {
    pub binder: Binder,
    pub body: Expression,
    pub span: Span,
}

/// `tuple # index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionExpr {
    pub tuple: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// Non-dependent `A -> B`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowExpr {
    pub domain: Box<Expression>,
    pub codomain: Box<Expression>,
    pub span: Span,
}

/// `A ∪ B ∪ C`, flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionExpr {
    pub variants: Vec<Expression>,
    pub span: Span,
}

/// `value inj T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionExpr {
    pub value: Box<Expression>,
    pub ty: Box<Expression>,
    pub span: Span,
}

/// `f x` or `f @ x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationExpr {
    pub callee: Box<Expression>,
    pub argument: Box<Expression>,
    pub explicit: bool,
    pub span: Span,
}

/// `body where decl* end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereExpr {
    pub body: Box<Expression>,
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Primitive(e) => e.span,
            Expression::Identifier(e) => e.span,
            Expression::Annex(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::Annotated(e) => e.span,
            Expression::Declarations(e) => e.span,
            Expression::Pi(e) => e.span,
            Expression::Lambda(e) => e.span,
            Expression::Insert(e) => e.span,
            Expression::Ret(e) => e.span,
            Expression::Uniq(e) => e.span,
            Expression::Array(e) => e.span,
            Expression::Pack(e) => e.span,
            Expression::Sigma(e) => e.span,
            Expression::Tuple(e) => e.span,
            Expression::Match(e) => e.span,
            Expression::Extraction(e) => e.span,
            Expression::Arrow(e) => e.span,
            Expression::Union(e) => e.span,
            Expression::Injection(e) => e.span,
            Expression::Application(e) => e.span,
            Expression::Where(e) => e.span,
            Expression::Error(span) => *span,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal(_) | Expression::Annotated(_))
    }
}
