//! Canonical source rendering.
//!
//! Every node prints structurally. Parentheses in the source always produce a
//! [`Expression::Tuple`], so printing a parsed tree never has to invent any.

use std::fmt::{self, Display, Formatter};

use super::*;

fn join<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_doc(f: &mut Formatter<'_>, doc: &Option<String>) -> fmt::Result {
    if let Some(doc) = doc {
        for line in doc.lines() {
            if line.is_empty() {
                writeln!(f, "///")?;
            } else {
                writeln!(f, "/// {}", line)?;
            }
        }
    }
    Ok(())
}

/// Declarations inside expressions, each closed with `;`.
fn write_declarations(f: &mut Formatter<'_>, decls: &[Declaration]) -> fmt::Result {
    for decl in decls {
        write!(f, "{}; ", decl)?;
    }
    Ok(())
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for AnnexSubtag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        for alias in &self.aliases {
            write!(f, " = {}", alias)?;
        }
        Ok(())
    }
}

impl Display for AnnexName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "%{}.{}", self.module, self.name)?;
        if let Some(subtag) = &self.subtag {
            write!(f, ".{}", subtag)?;
        }
        if !self.subtags.is_empty() {
            f.write_str("(")?;
            join(f, &self.subtags, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Name::Ident(id) => write!(f, "{}", id),
            Name::Annex(annex) => write!(f, "{}", annex),
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Primitive::Univ => "Univ",
            Primitive::Type => "Type",
            Primitive::Nat => "Nat",
            Primitive::Idx => "Idx",
            Primitive::Bool => "Bool",
            Primitive::I1 => "I1",
            Primitive::I8 => "I8",
            Primitive::I16 => "I16",
            Primitive::I32 => "I32",
            Primitive::I64 => "I64",
            Primitive::Star => "*",
            Primitive::Box => "□",
            Primitive::Bot => "⊥",
            Primitive::Top => "⊤",
        };
        f.write_str(text)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(true) => f.write_str("tt"),
            Literal::Bool(false) => f.write_str("ff"),
            Literal::Int(n) => write!(f, "{}", n),
            // Debug always keeps a fraction or an exponent, so the value re-lexes as a float
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Literal::Char(c) => match c {
                '\n' => f.write_str("'\\n'"),
                '\t' => f.write_str("'\\t'"),
                '\r' => f.write_str("'\\r'"),
                '\0' => f.write_str("'\\0'"),
                '\\' => f.write_str("'\\\\'"),
                '\'' => f.write_str("'\\''"),
                c => write!(f, "'{}'", c),
            },
        }
    }
}

impl Display for LiteralExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for TypedBinder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        join(f, &self.names, " ")?;
        write!(f, ": {}", self.ty)
    }
}

impl<P: Display> Display for TupleItem<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TupleItem::Group(group) => write!(f, "{}", group),
            TupleItem::Binder(binder) => write!(f, "{}", binder),
        }
    }
}

fn write_tuple<P: Display>(
    f: &mut Formatter<'_>,
    open: &str,
    elements: &[TupleItem<P>],
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    join(f, elements, ", ")?;
    f.write_str(close)
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Identifier(id) => write!(f, "{}", id),
            Pattern::Typed(typed) => write!(f, "{}", typed),
            Pattern::Tuple(tuple) => write_tuple(f, "(", &tuple.elements, ")"),
        }
    }
}

impl Display for Battern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Battern::Typed(typed) => write!(f, "{}", typed),
            Battern::Tuple(tuple) => write_tuple(f, "[", &tuple.elements, "]"),
            Battern::Type(ty) => write!(f, "{}", ty),
        }
    }
}

impl Display for Implicit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tuple(f, "{", &self.elements, "}")
    }
}

impl Display for Binder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binder::Pattern(p) => write!(f, "{}", p),
            Binder::Battern(b) => write!(f, "{}", b),
        }
    }
}

impl Display for LamDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LamDomain::Pattern(p) => write!(f, "{}", p),
            LamDomain::Battern(b) => write!(f, "{}", b),
            LamDomain::Implicit(i) => write!(f, "{}", i),
        }
    }
}

impl Display for PiDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PiDomain::Battern(b) => write!(f, "{}", b),
            PiDomain::Implicit(i) => write!(f, "{}", i),
        }
    }
}

impl Display for MatchArm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.binder, self.body)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Primitive(p) => write!(f, "{}", p.kind),
            Expression::Identifier(id) => write!(f, "{}", id),
            Expression::Annex(annex) => write!(f, "{}", annex),
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::Annotated(ann) => write!(f, "{} : {}", ann.value, ann.ty),
            Expression::Declarations(block) => {
                write_declarations(f, &block.declarations)?;
                write!(f, "{}", block.body)
            }
            Expression::Pi(pi) => {
                match pi.kind {
                    PiKind::Arrow => write!(f, "{}", pi.domain)?,
                    PiKind::Cn => write!(f, "Cn {}", pi.domain)?,
                    PiKind::Fn => write!(f, "Fn {}", pi.domain)?,
                }
                if let Some(codomain) = &pi.codomain {
                    write!(f, " -> {}", codomain)?;
                }
                Ok(())
            }
            Expression::Lambda(lambda) => {
                f.write_str(match lambda.kind {
                    LambdaKind::Lm => "lm",
                    LambdaKind::Cn => "cn",
                })?;
                for domain in &lambda.domains {
                    write!(f, " {}", domain)?;
                }
                if let Some(codomain) = &lambda.codomain {
                    write!(f, " : {}", codomain)?;
                }
                write!(f, " = {}", lambda.body)
            }
            Expression::Insert(ins) => {
                write!(f, "ins({}, {}, {})", ins.tuple, ins.index, ins.value)
            }
            Expression::Ret(ret) => write!(
                f,
                "ret {} = {} $ {}; {}",
                ret.binder, ret.callee, ret.argument, ret.body
            ),
            Expression::Uniq(uniq) => write!(f, "⦃{}⦄", uniq.inner),
            Expression::Array(array) => {
                f.write_str("«")?;
                join(f, &array.sizes, ", ")?;
                write!(f, "; {}»", array.element)
            }
            Expression::Pack(pack) => write!(f, "‹{}; {}›", pack.shape, pack.body),
            Expression::Sigma(sigma) => {
                write_tuple(f, "[", &sigma.tuple.elements, "]")?;
                if let Some(alias) = &sigma.alias {
                    write!(f, " as {}", alias)?;
                }
                Ok(())
            }
            Expression::Tuple(tuple) => {
                f.write_str("(")?;
                join(f, &tuple.elements, ", ")?;
                f.write_str(")")
            }
            Expression::Match(m) => {
                write!(f, "match {} with", m.scrutinee)?;
                for (i, arm) in m.arms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" |")?;
                    }
                    write!(f, " {}", arm)?;
                }
                Ok(())
            }
            Expression::Extraction(ext) => write!(f, "{}#{}", ext.tuple, ext.index),
            Expression::Arrow(arrow) => write!(f, "{} -> {}", arrow.domain, arrow.codomain),
            Expression::Union(union) => join(f, &union.variants, " ∪ "),
            Expression::Injection(inj) => write!(f, "{} inj {}", inj.value, inj.ty),
            Expression::Application(app) => {
                if app.explicit {
                    write!(f, "{} @ {}", app.callee, app.argument)
                } else {
                    write!(f, "{} {}", app.callee, app.argument)
                }
            }
            Expression::Where(w) => {
                write!(f, "{} where ", w.body)?;
                write_declarations(f, &w.declarations)?;
                f.write_str("end")
            }
            Expression::Error(_) => f.write_str("/* error */"),
        }
    }
}

impl Display for LetTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LetTarget::Annex(annex) => write!(f, "{}", annex),
            LetTarget::Binder(binder) => write!(f, "{}", binder),
        }
    }
}

impl Display for RecBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ty) = &self.ty {
            write!(f, " : {}", ty)?;
        }
        write!(f, " = {}", self.value)
    }
}

impl Display for LamParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domain)?;
        if let Some(filter) = &self.filter {
            write!(f, " @ {}", filter)?;
        }
        Ok(())
    }
}

impl Display for LamDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            LamKind::Lam => "lam",
            LamKind::Con => "con",
            LamKind::Fun => "fun",
        })?;
        if self.is_extern {
            f.write_str(" extern")?;
        }
        write!(f, " {}", self.name)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        if let Some(codomain) = &self.codomain {
            write!(f, " : {}", codomain)?;
        }
        if let Some(body) = &self.body {
            write!(f, " = {}", body)?;
        }
        Ok(())
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_doc(f, &self.doc)?;
        match &self.kind {
            DeclarationKind::Axiom(axm) => {
                write!(f, "axm {} : {}", axm.name, axm.ty)?;
                if let Some(normalizer) = &axm.normalizer {
                    write!(f, ", {}", normalizer)?;
                }
                if let Some(curry) = axm.curry {
                    write!(f, ", {}", curry)?;
                    if let Some(trip) = &axm.trip {
                        write!(f, ", {}", trip)?;
                    }
                }
                Ok(())
            }
            DeclarationKind::Cfun(cfun) => write!(f, "cfun {} : {}", cfun.domain, cfun.ty),
            DeclarationKind::Ccon(ccon) => write!(f, "ccon {}", ccon.domain),
            DeclarationKind::Let(decl) => write!(f, "let {} = {}", decl.target, decl.value),
            DeclarationKind::Rec(rec) => {
                f.write_str("rec ")?;
                join(f, &rec.bindings, " and ")?;
                if let Some(lam) = &rec.lam {
                    write!(f, " and {}", lam)?;
                }
                Ok(())
            }
            DeclarationKind::Lam(lam) => write!(f, "{}", lam),
            DeclarationKind::Rule(rule) => {
                let keyword = match rule.kind {
                    RuleKind::Rule => "rule",
                    RuleKind::Norm => "norm",
                };
                write!(f, "{} {} : {}", keyword, rule.binder, rule.lhs)?;
                if let Some(guard) = &rule.guard {
                    write!(f, " when {}", guard)?;
                }
                write!(f, " => {}", rule.rhs)
            }
            DeclarationKind::Error => f.write_str("/* error */"),
        }
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            DependencyKind::Import => write!(f, "import {};", self.name),
            DependencyKind::Plugin => write!(f, "plugin {};", self.name),
        }
    }
}

impl Display for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for dep in &self.dependencies {
            writeln!(f, "{}", dep)?;
        }
        if !self.dependencies.is_empty() && !self.declarations.is_empty() {
            writeln!(f)?;
        }
        for decl in &self.declarations {
            writeln!(f, "{};", decl)?;
        }
        Ok(())
    }
}
