//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use mim_syntax::ast::*;
use mim_syntax::error::MimError;
use mim_syntax::lexer::tokenize;
use mim_syntax::parser::{Parser, TieBreak};
use mim_syntax::ParseOutput;

/// ソースコードを解析して結果を取得するヘルパー関数
pub fn parse_source(source: &str) -> ParseOutput {
    mim_syntax::parse_source(source)
}

/// 解析に成功することを確認するヘルパー関数
pub fn assert_parse_success(source: &str) -> SourceFile {
    let output = parse_source(source);
    let errors: Vec<String> = output.errors().map(|d| d.message()).collect();
    assert!(errors.is_empty(), "Parsing should succeed: {:?}", errors);
    output.tree
}

/// 解析に失敗することを確認するヘルパー関数
pub fn assert_parse_error(source: &str) -> ParseOutput {
    let output = parse_source(source);
    assert!(output.has_errors(), "Parsing should fail");
    output
}

/// 唯一の宣言を取り出すヘルパー関数
pub fn single_declaration(source: &str) -> Declaration {
    let mut tree = assert_parse_success(source);
    assert_eq!(tree.declarations.len(), 1, "expected exactly one declaration");
    tree.declarations.remove(0)
}

/// 式を解析し、適用された曖昧性解消ルールも返すヘルパー関数
pub fn parse_expr_with_notes(source: &str) -> (Expression, Vec<TieBreak>) {
    let (tokens, lexical) = tokenize(source);
    assert!(lexical.iter().all(|d| !d.is_error()), "lexing should succeed");
    let mut parser = Parser::new(tokens);
    let expr = parser
        .parse_expression()
        .unwrap_or_else(|e| panic!("expression should parse: {}", e));
    let diagnostics = parser.into_diagnostics();
    assert!(diagnostics.iter().all(|d| !d.is_error()));
    (expr, rules(diagnostics.iter().map(|d| &d.error)))
}

pub fn parse_expr(source: &str) -> Expression {
    parse_expr_with_notes(source).0
}

/// ソース全体で適用された曖昧性解消ルール
pub fn notes(output: &ParseOutput) -> Vec<TieBreak> {
    rules(output.notes().map(|d| &d.error))
}

fn rules<'a>(errors: impl Iterator<Item = &'a MimError>) -> Vec<TieBreak> {
    errors
        .filter_map(|e| match e {
            MimError::Ambiguity(rule) => Some(*rule),
            _ => None,
        })
        .collect()
}

/// 結合の形をS式で表す（中置構文以外は正規形の表示を使う）
pub fn sexp(expr: &Expression) -> String {
    let list = |items: &[Expression]| {
        items.iter().map(sexp).collect::<Vec<_>>().join(" ")
    };
    match expr {
        Expression::Application(app) => format!(
            "({} {} {})",
            if app.explicit { "@" } else { "app" },
            sexp(&app.callee),
            sexp(&app.argument)
        ),
        Expression::Arrow(arrow) => {
            format!("(-> {} {})", sexp(&arrow.domain), sexp(&arrow.codomain))
        }
        Expression::Union(union) => format!("(∪ {})", list(&union.variants)),
        Expression::Injection(inj) => format!("(inj {} {})", sexp(&inj.value), sexp(&inj.ty)),
        Expression::Extraction(ext) => {
            format!("(# {} {})", sexp(&ext.tuple), sexp(&ext.index))
        }
        Expression::Annotated(ann) => format!("(: {} {})", ann.value, sexp(&ann.ty)),
        Expression::Where(w) => format!("(where {})", sexp(&w.body)),
        Expression::Tuple(tuple) => format!("(tuple {})", list(&tuple.elements)),
        other => other.to_string(),
    }
}

/// スパンを取り除いたJSON表現（構造の比較用）
pub fn strip_spans(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key != "span")
                .map(|(key, value)| (key, strip_spans(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_spans).collect()),
        other => other,
    }
}

pub fn structure(tree: &SourceFile) -> serde_json::Value {
    strip_spans(serde_json::to_value(tree).expect("tree should serialize"))
}

pub fn ident(expr: &Expression) -> &str {
    match expr {
        Expression::Identifier(id) => &id.name,
        other => panic!("expected identifier, found {}", other),
    }
}

// サブモジュールの宣言
#[cfg(test)]
mod declaration_test;
#[cfg(test)]
mod expression_test;
#[cfg(test)]
mod pattern_test;
#[cfg(test)]
mod roundtrip_test;
