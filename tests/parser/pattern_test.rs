//! バインダーのパーサーテスト

use super::*;

fn let_binder(source: &str) -> Binder {
    match single_declaration(source).kind {
        DeclarationKind::Let(LetDecl {
            target: LetTarget::Binder(binder),
            ..
        }) => binder,
        other => panic!("expected let with binder, found {:?}", other),
    }
}

#[test]
fn test_bare_identifier_binder_is_pattern() {
    let output = parse_source("let x = 1;");
    assert!(notes(&output).contains(&TieBreak::PatternOverBattern));
    let binder = let_binder("let x = 1;");
    assert!(matches!(binder, Binder::Pattern(Pattern::Identifier(ref id)) if id.name == "x"));
}

#[test]
fn test_typed_identifier_binder() {
    let Binder::Pattern(Pattern::Typed(typed)) = let_binder("let x: Nat = 1;") else {
        panic!("expected typed pattern");
    };
    assert_eq!(typed.name.name, "x");
    assert_eq!(typed.ty.to_string(), "Nat");
}

#[test]
fn test_pattern_tuple_binder() {
    let Binder::Pattern(Pattern::Tuple(tuple)) = let_binder("let (x, (y, z: Nat)) = p;") else {
        panic!("expected pattern tuple");
    };
    assert_eq!(tuple.elements.len(), 2);
    assert!(matches!(
        &tuple.elements[1],
        TupleItem::Binder(Pattern::Tuple(inner)) if inner.elements.len() == 2
    ));
}

#[test]
fn test_battern_tuple_binder() {
    let Binder::Battern(Battern::Tuple(tuple)) = let_binder("let [x: Nat, Bool] = p;") else {
        panic!("expected battern tuple");
    };
    assert!(matches!(tuple.elements[0], TupleItem::Binder(Battern::Typed(_))));
    assert!(matches!(tuple.elements[1], TupleItem::Binder(Battern::Type(_))));
}

#[test]
fn test_group_in_battern_keeps_single_type() {
    let (expr, notes) = parse_expr_with_notes("[a b: Nat, c: Bool] -> a");
    assert!(notes.contains(&TieBreak::GroupOverBatternType));

    let Expression::Pi(PiExpr {
        domain: PiDomain::Battern(Battern::Tuple(tuple)),
        ..
    }) = expr
    else {
        panic!("expected pi over a battern tuple");
    };
    assert_eq!(tuple.arity(), 3);
    let TupleItem::Group(group) = &tuple.elements[0] else {
        panic!("expected group");
    };
    let names: Vec<_> = group.binders().map(|(name, _)| name.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(group.ty.to_string(), "Nat");
}

#[test]
fn test_group_in_pattern() {
    let (expr, notes) = parse_expr_with_notes("lm (a b: Nat) = a");
    assert!(!notes.contains(&TieBreak::GroupOverBatternType));
    let Expression::Lambda(lambda) = expr else {
        panic!("expected lambda");
    };
    let LamDomain::Pattern(Pattern::Tuple(tuple)) = &lambda.domains[0] else {
        panic!("expected pattern tuple");
    };
    assert!(matches!(&tuple.elements[0], TupleItem::Group(g) if g.arity() == 2));
}

#[test]
fn test_implicit_domain() {
    let Expression::Pi(pi) = parse_expr("{T: *} -> T") else {
        panic!("expected pi");
    };
    let PiDomain::Implicit(implicit) = pi.domain else {
        panic!("expected implicit domain");
    };
    assert_eq!(implicit.elements.len(), 1);
}

#[test]
fn test_lambda_domains() {
    let Expression::Lambda(lambda) = parse_expr("lm {T: *} (x: T) y Nat Bool = x") else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.kind, LambdaKind::Lm);
    assert_eq!(lambda.domains.len(), 5);
    assert!(matches!(lambda.domains[0], LamDomain::Implicit(_)));
    assert!(matches!(lambda.domains[1], LamDomain::Pattern(Pattern::Tuple(_))));
    assert!(matches!(lambda.domains[2], LamDomain::Pattern(Pattern::Identifier(_))));
    // 型だけの定義域は並置で区切られる
    assert!(matches!(lambda.domains[3], LamDomain::Battern(Battern::Type(_))));
    assert!(matches!(lambda.domains[4], LamDomain::Battern(Battern::Type(_))));
}

#[test]
fn test_colon_after_bare_domain_is_codomain() {
    let (expr, notes) = parse_expr_with_notes("lm x: Nat = x");
    assert!(notes.contains(&TieBreak::CodomainOverDomainAnnotation));
    let Expression::Lambda(lambda) = expr else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.domains.len(), 1);
    assert_eq!(lambda.codomain.expect("codomain").to_string(), "Nat");
}

#[test]
fn test_continuation_lambda_takes_patterns() {
    let Expression::Lambda(lambda) = parse_expr("cn (x: Nat) k = k x") else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.kind, LambdaKind::Cn);
    assert_eq!(lambda.domains.len(), 2);
    assert_eq!(sexp(&lambda.body), "(app k x)");
}

#[test]
fn test_rule_binder_leaves_colon() {
    let output = parse_source("rule x : f x => x;");
    assert!(!output.has_errors());
    assert!(notes(&output).contains(&TieBreak::CodomainOverDomainAnnotation));
    let DeclarationKind::Rule(rule) = &output.tree.declarations[0].kind else {
        panic!("expected rule");
    };
    assert!(matches!(rule.binder, Binder::Pattern(Pattern::Identifier(_))));
    assert_eq!(sexp(&rule.lhs), "(app f x)");
}

#[test]
fn test_match_arm_binders() {
    let Expression::Match(m) = parse_expr("match p with (a, b) => a | [c: Nat] => c | tt => 0")
    else {
        panic!("expected match");
    };
    assert_eq!(m.arms.len(), 3);
    assert!(matches!(m.arms[0].binder, Binder::Pattern(Pattern::Tuple(_))));
    assert!(matches!(m.arms[1].binder, Binder::Battern(Battern::Tuple(_))));
    assert!(matches!(m.arms[2].binder, Binder::Battern(Battern::Type(_))));
}
