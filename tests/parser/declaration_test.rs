//! 宣言のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_dependencies_then_declarations() {
    // import・pluginの後に宣言が続く
    let tree = assert_parse_success("import foo; plugin mem; let x = 1;");
    assert_eq!(tree.dependencies.len(), 2);
    assert_eq!(tree.dependencies[0].kind, DependencyKind::Import);
    assert_eq!(tree.dependencies[0].name.name, "foo");
    assert_eq!(tree.dependencies[1].kind, DependencyKind::Plugin);
    assert_eq!(tree.declarations.len(), 1);
}

#[test]
fn test_empty_source() {
    let tree = assert_parse_success("  // nothing here\n");
    assert!(tree.dependencies.is_empty());
    assert!(tree.declarations.is_empty());
}

#[test]
fn test_axiom_with_normalizer_and_curry() {
    let decl = single_declaration("axm %core.add : Nat -> Nat -> Nat, normalize_add, 2;");
    let DeclarationKind::Axiom(axiom) = decl.kind else {
        panic!("expected axiom");
    };
    assert_eq!(axiom.name.path(), "core.add");
    assert_eq!(axiom.normalizer.map(|n| n.name).as_deref(), Some("normalize_add"));
    assert_eq!(axiom.curry, Some(2));
    assert_eq!(axiom.trip, None);
    assert_eq!(sexp(&axiom.ty), "(-> Nat (-> Nat Nat))");
}

#[test]
fn test_axiom_with_trip() {
    let decl = single_declaration("axm %core.add : Nat, norm_add, 1, trip_add;");
    let DeclarationKind::Axiom(axiom) = decl.kind else {
        panic!("expected axiom");
    };
    assert_eq!(axiom.curry, Some(1));
    assert_eq!(axiom.trip.map(|t| t.name).as_deref(), Some("trip_add"));

    // curryは正規化関数なしでも書ける
    let decl = single_declaration("axm %core.id : Nat -> Nat, 1;");
    let DeclarationKind::Axiom(axiom) = decl.kind else {
        panic!("expected axiom");
    };
    assert_eq!(axiom.normalizer, None);
    assert_eq!(axiom.curry, Some(1));
}

#[test]
fn test_axiom_with_subtag_list() {
    let decl = single_declaration("axm %core.nat(add = plus, sub, mul = times = star) : Nat;");
    let DeclarationKind::Axiom(axiom) = decl.kind else {
        panic!("expected axiom");
    };
    assert_eq!(axiom.name.subtag, None);
    let tags: Vec<_> = axiom.name.subtags.iter().map(|s| s.tag.name.as_str()).collect();
    assert_eq!(tags, vec!["add", "sub", "mul"]);
    assert_eq!(axiom.name.subtags[2].aliases.len(), 2);
}

#[test]
fn test_cfun_and_ccon() {
    let tree = assert_parse_success("cfun [x: Nat] : Nat; ccon [Nat, Bool]; ccon k: Cn Nat;");
    assert_eq!(tree.declarations.len(), 3);
    assert!(matches!(
        &tree.declarations[0].kind,
        DeclarationKind::Cfun(CfunDecl { domain: Battern::Tuple(_), .. })
    ));
    assert!(matches!(
        &tree.declarations[1].kind,
        DeclarationKind::Ccon(CconDecl { domain: Battern::Tuple(_), .. })
    ));
    assert!(matches!(
        &tree.declarations[2].kind,
        DeclarationKind::Ccon(CconDecl { domain: Battern::Typed(_), .. })
    ));
}

#[test]
fn test_cfun_bare_name_colon_is_declaration_type() {
    let output = parse_source("cfun f : Nat -> Nat;");
    assert!(!output.has_errors());
    assert!(notes(&output).contains(&TieBreak::CodomainOverDomainAnnotation));
    let DeclarationKind::Cfun(cfun) = &output.tree.declarations[0].kind else {
        panic!("expected cfun");
    };
    assert_eq!(cfun.domain.to_string(), "f");
    assert_eq!(cfun.ty.to_string(), "Nat -> Nat");
}

#[test]
fn test_let_annex_target() {
    let decl = single_declaration("let %core.pi = 3.14;");
    let DeclarationKind::Let(LetDecl {
        target: LetTarget::Annex(annex),
        value,
        ..
    }) = decl.kind
    else {
        panic!("expected annex let");
    };
    assert_eq!(annex.path(), "core.pi");
    assert!(value.is_literal());
}

#[test]
fn test_rec_group() {
    let decl = single_declaration(
        "rec even : Nat -> Bool = lm n = odd n and odd : Nat -> Bool = lm n = even n;",
    );
    let DeclarationKind::Rec(rec) = decl.kind else {
        panic!("expected rec");
    };
    assert_eq!(rec.bindings.len(), 2);
    assert!(rec.lam.is_none());
    assert!(rec.bindings.iter().all(|b| b.ty.is_some()));
    let names: Vec<_> = rec.names().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["even", "odd"]);
}

#[test]
fn test_lam_declaration() {
    // 例：lam f (x: Nat) : Nat = x;
    let decl = single_declaration("lam f (x: Nat) : Nat = x;");
    assert_eq!(decl.name().as_deref(), Some("f"));
    let DeclarationKind::Lam(lam) = decl.kind else {
        panic!("expected lam");
    };
    assert_eq!(lam.kind, LamKind::Lam);
    assert!(!lam.is_extern);
    assert_eq!(lam.params.len(), 1);
    let LamDomain::Pattern(Pattern::Tuple(tuple)) = &lam.params[0].domain else {
        panic!("expected pattern binder");
    };
    assert!(matches!(
        &tuple.elements[..],
        [TupleItem::Binder(Pattern::Typed(typed))] if typed.name.name == "x"
    ));
    assert_eq!(lam.codomain.as_ref().map(|c| c.to_string()).as_deref(), Some("Nat"));
    assert_eq!(ident(lam.body.as_ref().expect("body")), "x");
}

#[test]
fn test_extern_fun_without_body() {
    let decl = single_declaration("fun extern puts [%mem.M, Nat] : Nat;");
    let DeclarationKind::Lam(lam) = decl.kind else {
        panic!("expected lam");
    };
    assert_eq!(lam.kind, LamKind::Fun);
    assert!(lam.is_extern);
    assert!(lam.body.is_none());
}

#[test]
fn test_lam_filters() {
    let decl = single_declaration("con k (x: Nat) @ p (y: Nat) = x;");
    let DeclarationKind::Lam(lam) = decl.kind else {
        panic!("expected lam");
    };
    assert_eq!(lam.kind, LamKind::Con);
    assert_eq!(lam.params.len(), 2);
    assert_eq!(ident(lam.params[0].filter.as_ref().expect("filter")), "p");
    assert!(lam.params[1].filter.is_none());

    let output = parse_source("lam g Nat @ tt = tt;");
    assert!(!output.has_errors());
    assert!(notes(&output).contains(&TieBreak::FilterOverExplicitApplication));
}

#[test]
fn test_rule_and_norm() {
    let tree = assert_parse_success(
        "rule (x: Nat) : %core.nat.add (x, 0) when tt => x; norm y : g y => y;",
    );
    let DeclarationKind::Rule(rule) = &tree.declarations[0].kind else {
        panic!("expected rule");
    };
    assert_eq!(rule.kind, RuleKind::Rule);
    assert!(rule.guard.is_some());
    assert_eq!(ident(&rule.rhs), "x");

    let DeclarationKind::Rule(norm) = &tree.declarations[1].kind else {
        panic!("expected norm");
    };
    assert_eq!(norm.kind, RuleKind::Norm);
    assert!(norm.guard.is_none());
}

#[test]
fn test_doc_comments_attach_to_declaration() {
    let tree = assert_parse_success(
        "/// Adds two numbers.\n///\n/// Curried.\naxm %core.add : Nat;\nlet x = 1;",
    );
    assert_eq!(
        tree.declarations[0].doc.as_deref(),
        Some("Adds two numbers.\n\nCurried.")
    );
    assert_eq!(tree.declarations[1].doc, None);
    assert_eq!(tree.documented().count(), 1);
}

#[test]
fn test_semicolons_are_optional() {
    let tree = assert_parse_success("let a = 1\nlet b = 2;\nlet c = 3");
    assert_eq!(tree.declarations.len(), 3);
}
