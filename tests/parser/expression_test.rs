//! 式のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("Univ", Primitive::Univ)]
#[test_case("Type", Primitive::Type)]
#[test_case("I64", Primitive::I64)]
#[test_case("*", Primitive::Star)]
#[test_case("★", Primitive::Star)]
#[test_case("□", Primitive::Box)]
#[test_case(".bot", Primitive::Bot)]
#[test_case("⊤", Primitive::Top)]
fn test_primitives(source: &str, expected: Primitive) {
    assert!(matches!(
        parse_expr(source),
        Expression::Primitive(PrimitiveExpr { kind, .. }) if kind == expected
    ));
}

#[test]
fn test_literals() {
    let literal = |source: &str| match parse_expr(source) {
        Expression::Literal(lit) => lit.value,
        other => panic!("expected literal, found {}", other),
    };
    assert_eq!(literal("tt"), Literal::Bool(true));
    assert_eq!(literal("0x2A"), Literal::Int(42));
    assert_eq!(literal("-7"), Literal::Int(-7));
    assert_eq!(literal("2.5"), Literal::Float(2.5));
    assert_eq!(literal(r#""hi""#), Literal::String("hi".into()));
    assert_eq!(literal("'c'"), Literal::Char('c'));
}

#[test]
fn test_annex_reference() {
    let Expression::Annex(annex) = parse_expr("%core.nat.add") else {
        panic!("expected annex");
    };
    assert_eq!(annex.module, "core");
    assert_eq!(annex.name, "nat");
    assert_eq!(annex.subtag.as_deref(), Some("add"));
    assert_eq!(annex.path(), "core.nat.add");
}

#[test]
fn test_annex_followed_by_parenthesis_is_applied() {
    let (expr, notes) = parse_expr_with_notes("%core.nat.add (a, b)");
    assert_eq!(sexp(&expr), "(app %core.nat.add (tuple a b))");
    assert!(notes.contains(&TieBreak::AnnexArgumentOverSubtags));
}

#[test]
fn test_tuples() {
    let Expression::Tuple(unit) = parse_expr("()") else {
        panic!("expected tuple");
    };
    assert!(unit.elements.is_empty());

    let Expression::Tuple(pair) = parse_expr("(a, b,)") else {
        panic!("expected tuple");
    };
    assert_eq!(pair.elements.len(), 2);
}

#[test]
fn test_sigma_with_alias() {
    let Expression::Sigma(sigma) = parse_expr("[n: Nat, «n; I8»] as vec") else {
        panic!("expected sigma");
    };
    assert_eq!(sigma.tuple.elements.len(), 2);
    assert!(matches!(sigma.alias, Some(Name::Ident(ref id)) if id.name == "vec"));
}

#[test_case("«2, 3; Nat»", 2; "guillemets")]
#[test_case("⟪4; I8⟫", 1; "white brackets")]
#[test_case("<<4, n,; I8>>", 2; "ascii with trailing comma")]
fn test_arrays(source: &str, sizes: usize) {
    let Expression::Array(array) = parse_expr(source) else {
        panic!("expected array");
    };
    assert_eq!(array.sizes.len(), sizes);
}

#[test_case("‹3; x›")]
#[test_case("⟨3; x⟩")]
#[test_case("<3; x>")]
fn test_packs(source: &str) {
    let Expression::Pack(pack) = parse_expr(source) else {
        panic!("expected pack");
    };
    assert_eq!(pack.shape.to_string(), "3");
    assert_eq!(ident(&pack.body), "x");
}

#[test_case("{| x |}")]
#[test_case("⦃x⦄")]
fn test_uniq(source: &str) {
    let Expression::Uniq(uniq) = parse_expr(source) else {
        panic!("expected uniq");
    };
    assert_eq!(ident(&uniq.inner), "x");
}

#[test_case("ins(t, 0, x)")]
#[test_case("insert(t, 0, x)")]
fn test_insert(source: &str) {
    let Expression::Insert(ins) = parse_expr(source) else {
        panic!("expected insert");
    };
    assert_eq!(ident(&ins.tuple), "t");
    assert_eq!(ident(&ins.value), "x");
}

#[test]
fn test_ret() {
    let Expression::Ret(ret) = parse_expr("ret r = f $ x; g r") else {
        panic!("expected ret");
    };
    assert!(matches!(ret.binder, Binder::Pattern(Pattern::Identifier(_))));
    assert_eq!(ident(&ret.callee), "f");
    assert_eq!(ident(&ret.argument), "x");
    assert_eq!(sexp(&ret.body), "(app g r)");
}

#[test]
fn test_match_with_leading_bar() {
    let Expression::Match(m) = parse_expr("match x with | a => a") else {
        panic!("expected match");
    };
    assert_eq!(ident(&m.scrutinee), "x");
    assert_eq!(m.arms.len(), 1);
}

#[test_case("lm x = x", LambdaKind::Lm)]
#[test_case("λ x = x", LambdaKind::Lm)]
#[test_case("fn x = x", LambdaKind::Lm)]
#[test_case("cn x = x", LambdaKind::Cn)]
fn test_lambda_spellings(source: &str, kind: LambdaKind) {
    let Expression::Lambda(lambda) = parse_expr(source) else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.kind, kind);
}

#[test]
fn test_keyword_pi_forms() {
    let Expression::Pi(cn) = parse_expr("Cn [Nat, Bool]") else {
        panic!("expected pi");
    };
    assert_eq!(cn.kind, PiKind::Cn);
    assert!(cn.codomain.is_none());

    let Expression::Pi(fun) = parse_expr("Fn {T: *} -> T") else {
        panic!("expected pi");
    };
    assert_eq!(fun.kind, PiKind::Fn);
    assert!(matches!(fun.domain, PiDomain::Implicit(_)));
}

#[test]
fn test_declaration_prefixed_expression() {
    let Expression::Declarations(block) = parse_expr("let x = 1; lam f y = y; f x") else {
        panic!("expected declarations");
    };
    assert_eq!(block.declarations.len(), 2);
    assert_eq!(sexp(&block.body), "(app f x)");
}

#[test]
fn test_where_scopes_declarations() {
    let Expression::Where(w) = parse_expr("(a, b) where let a = 1; let b = 2; end") else {
        panic!("expected where");
    };
    assert_eq!(sexp(&w.body), "(tuple a b)");
    assert_eq!(w.declarations.len(), 2);
    assert!(w
        .declarations
        .iter()
        .all(|d| matches!(d.kind, DeclarationKind::Let(_))));
}

#[test]
fn test_arrow_glyphs_are_equivalent() {
    assert_eq!(sexp(&parse_expr("a → b")), sexp(&parse_expr("a -> b")));
}

#[test]
fn test_error_token_becomes_placeholder() {
    let (tokens, lexical) = tokenize("f ~");
    assert_eq!(lexical.len(), 1);
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression().expect("placeholder keeps parsing");
    let Expression::Application(app) = expr else {
        panic!("expected application");
    };
    assert!(app.argument.is_error());
    // 字句エラーは二重に報告しない
    assert!(parser.into_diagnostics().iter().all(|d| !d.is_error()));
}
