//! 式の解析（precedence climbing）
//!
//! 一次式を読んだ後、優先順位表から中置構文の結合力を引き、
//! `min`以上のものだけを左から畳み込む。並置も結合力6の中置構文として扱う。

use crate::ast::*;
use crate::lexer::Token;

use super::{InfixOp, ParseResult, Parser, Prec, TieBreak};

/// 一次式を始められるトークンか
pub(super) fn starts_primary(token: &Token) -> bool {
    token.starts_declaration()
        || matches!(
            token,
            Token::Primitive(_)
                | Token::Identifier(_)
                | Token::Annex(_)
                | Token::Bool(_)
                | Token::Int(_)
                | Token::Float(_)
                | Token::String(_)
                | Token::Char(_)
                | Token::LeftParen
                | Token::LeftBracket
                | Token::LeftBrace
                | Token::LeftUniq
                | Token::LeftArray
                | Token::LeftPack
                | Token::CnType
                | Token::FnType
                | Token::Lm
                | Token::Cn
                | Token::Ins
                | Token::Ret
                | Token::Match
                | Token::Error(_)
        )
}

impl Parser {
    /// `min`以上の結合力を持つ式を解析
    pub(super) fn parse_expression_bp(&mut self, min: Prec) -> ParseResult<Expression> {
        let mut lhs = self.parse_primary(min)?;

        while let Some(op) = self.peek_infix() {
            if op.prec() < min {
                break;
            }
            lhs = self.parse_infix(op, lhs)?;
        }

        Ok(lhs)
    }

    /// 次の中置構文を判定（消費しない）
    fn peek_infix(&mut self) -> Option<InfixOp> {
        let op = match self.current_token()? {
            Token::Where => InfixOp::Where,
            Token::Arrow => InfixOp::Arrow,
            Token::Inj => InfixOp::Injection,
            Token::At => InfixOp::ExplicitApplication,
            Token::Union => InfixOp::Union,
            Token::Hash => InfixOp::Extraction,
            token if token.starts_declaration() => {
                self.note(TieBreak::DeclarationEndsApplication, self.current_span());
                return None;
            }
            token if starts_primary(token) => InfixOp::Application,
            _ => return None,
        };
        Some(op)
    }

    fn parse_infix(&mut self, op: InfixOp, lhs: Expression) -> ParseResult<Expression> {
        let start = lhs.span().start;
        let lhs = Box::new(lhs);

        let expr = match op {
            InfixOp::Where => {
                self.advance();
                let declarations = self.parse_where_declarations()?;
                Expression::Where(WhereExpr {
                    body: lhs,
                    declarations,
                    span: self.span_from(start),
                })
            }
            InfixOp::Arrow => {
                self.advance();
                let codomain = self.parse_expression_bp(op.right_min())?;
                Expression::Arrow(ArrowExpr {
                    domain: lhs,
                    codomain: Box::new(codomain),
                    span: self.span_from(start),
                })
            }
            InfixOp::Injection => {
                self.advance();
                let ty = self.parse_expression_bp(op.right_min())?;
                Expression::Injection(InjectionExpr {
                    value: lhs,
                    ty: Box::new(ty),
                    span: self.span_from(start),
                })
            }
            InfixOp::Application | InfixOp::ExplicitApplication => {
                let explicit = op == InfixOp::ExplicitApplication;
                if explicit {
                    self.advance();
                }
                let argument = self.parse_expression_bp(op.right_min())?;
                Expression::Application(ApplicationExpr {
                    callee: lhs,
                    argument: Box::new(argument),
                    explicit,
                    span: self.span_from(start),
                })
            }
            InfixOp::Union => {
                // n項に平坦化
                let mut variants = vec![*lhs];
                while self.match_token(&Token::Union) {
                    variants.push(self.parse_expression_bp(op.right_min())?);
                }
                Expression::Union(UnionExpr {
                    variants,
                    span: self.span_from(start),
                })
            }
            InfixOp::Extraction => {
                self.advance();
                let index = self.parse_expression_bp(op.right_min())?;
                Expression::Extraction(ExtractionExpr {
                    tuple: lhs,
                    index: Box::new(index),
                    span: self.span_from(start),
                })
            }
        };

        Ok(expr)
    }

    /// `where`の後の宣言列を`end`まで解析
    ///
    /// 壊れた宣言は`end`の手前までで回復し、`Error`宣言を残す。
    fn parse_where_declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();
        loop {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            if self.check(&Token::End) || self.is_at_end() {
                break;
            }
            let from = self.current;
            match self.parse_declaration() {
                Ok(decl) => declarations.push(decl),
                Err(e) => {
                    self.report(e);
                    let span = self.synchronize_in_where(from);
                    declarations.push(Declaration {
                        doc: None,
                        kind: DeclarationKind::Error,
                        span,
                    });
                }
            }
        }
        self.expect(&Token::End)?;
        Ok(declarations)
    }
}
