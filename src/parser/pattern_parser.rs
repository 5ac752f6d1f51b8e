//! バインダーの解析
//!
//! 括弧の形で3種類に分かれる：
//! - pattern  `( … )`：識別子・型付き識別子・パターンのタプル
//! - battern  `[ … ]`：型付き識別子・batternのタプル・型だけの無名バインダー
//! - implicit `{ … }`：batternのタプル
//!
//! タプルの要素には`a b c : T`のグループも書ける。

use crate::ast::*;
use crate::lexer::Token;

use super::expr_parser::starts_primary;
use super::{ParseResult, Parser, Prec, TieBreak};

impl Parser {
    /// パターンを解析
    pub(super) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        match self.current_token() {
            Some(Token::LeftParen) => {
                let tuple = self.parse_binder_tuple(&Token::RightParen, Self::parse_pattern)?;
                Ok(Pattern::Tuple(tuple))
            }
            Some(Token::Identifier(_)) if self.check_at(1, &Token::Colon) => {
                Ok(Pattern::Typed(self.parse_typed_binder()?))
            }
            Some(Token::Identifier(_)) => Ok(Pattern::Identifier(self.expect_identifier()?)),
            _ => Err(self.unexpected("pattern")),
        }
    }

    /// batternを解析（型だけの場合は`min`以上の結合力で解析）
    pub(super) fn parse_battern_at(&mut self, min: Prec) -> ParseResult<Battern> {
        match self.current_token() {
            Some(Token::LeftBracket) => {
                let tuple = self.parse_binder_tuple(&Token::RightBracket, |p| {
                    p.parse_battern_at(Prec::Bottom)
                })?;
                Ok(Battern::Tuple(tuple))
            }
            Some(Token::Identifier(_)) if self.check_at(1, &Token::Colon) => {
                Ok(Battern::Typed(self.parse_typed_binder()?))
            }
            _ => Ok(Battern::Type(Box::new(self.parse_expression_bp(min)?))),
        }
    }

    /// implicitを解析
    pub(super) fn parse_implicit(&mut self) -> ParseResult<Implicit> {
        let tuple = self.parse_binder_tuple(&Token::RightBrace, |p| {
            p.parse_battern_at(Prec::Bottom)
        })?;
        Ok(Implicit {
            elements: tuple.elements,
            span: tuple.span,
        })
    }

    /// 開き括弧から閉じ括弧までのタプルを解析（末尾のカンマを許す）
    pub(super) fn parse_binder_tuple<P, F>(
        &mut self,
        close: &Token,
        mut item: F,
    ) -> ParseResult<BinderTuple<P>>
    where
        F: FnMut(&mut Self) -> ParseResult<P>,
    {
        let start = self.current_span().start;
        self.advance(); // 開き括弧

        let mut elements = Vec::new();
        while !self.check(close) {
            let element = if self.group_ahead() {
                if !matches!(close, Token::RightParen) {
                    self.note(TieBreak::GroupOverBatternType, self.current_span());
                }
                TupleItem::Group(self.parse_group()?)
            } else {
                TupleItem::Binder(item(self)?)
            };
            elements.push(element);

            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(close)?;

        Ok(BinderTuple {
            elements,
            span: self.span_from(start),
        })
    }

    /// `id id+ :`が続くか（識別子の並びだけを先読みする）
    fn group_ahead(&self) -> bool {
        let mut n = 0;
        while matches!(self.peek(n), Some(Token::Identifier(_))) {
            n += 1;
        }
        n >= 2 && self.check_at(n, &Token::Colon)
    }

    /// `a b c : T`
    fn parse_group(&mut self) -> ParseResult<Group> {
        let start = self.current_span().start;
        let mut names = Vec::new();
        while matches!(self.current_token(), Some(Token::Identifier(_))) {
            names.push(self.expect_identifier()?);
        }
        self.expect(&Token::Colon)?;
        let ty = self.parse_expression()?;
        Ok(Group {
            names,
            ty: Box::new(ty),
            span: self.span_from(start),
        })
    }

    /// `name : type`
    fn parse_typed_binder(&mut self) -> ParseResult<TypedBinder> {
        let start = self.current_span().start;
        let name = self.expect_identifier()?;
        self.expect(&Token::Colon)?;
        let ty = self.parse_expression()?;
        Ok(TypedBinder {
            name,
            ty: Box::new(ty),
            span: self.span_from(start),
        })
    }

    /// let・ret・rule・matchのバインダー
    ///
    /// `annotated`が偽なら裸の識別子は`: type`を取らない（ruleの`:`のため）。
    pub(super) fn parse_binder(&mut self, annotated: bool) -> ParseResult<Binder> {
        match self.current_token() {
            Some(Token::LeftParen) => Ok(Binder::Pattern(self.parse_pattern()?)),
            Some(Token::LeftBracket) => Ok(Binder::Battern(self.parse_battern_at(Prec::Pi)?)),
            Some(Token::Identifier(_)) => {
                let span = self.current_span();
                self.note(TieBreak::PatternOverBattern, span);
                if annotated {
                    Ok(Binder::Pattern(self.parse_pattern()?))
                } else {
                    if self.check_at(1, &Token::Colon) {
                        self.note(TieBreak::CodomainOverDomainAnnotation, span);
                    }
                    Ok(Binder::Pattern(Pattern::Identifier(self.expect_identifier()?)))
                }
            }
            Some(token) if starts_primary(token) => {
                let ty = self.parse_expression_bp(Prec::Pi)?;
                Ok(Binder::Battern(Battern::Type(Box::new(ty))))
            }
            _ => Err(self.unexpected("binder")),
        }
    }

    /// ラムダ・lam宣言の定義域
    ///
    /// 裸の識別子は名前だけのパターン。型だけの定義域は適用より強く結合するので、
    /// 並置は次の定義域を始める。
    pub(super) fn parse_lam_domain(&mut self) -> ParseResult<LamDomain> {
        match self.current_token() {
            Some(Token::LeftParen) => Ok(LamDomain::Pattern(self.parse_pattern()?)),
            Some(Token::LeftBracket) => Ok(LamDomain::Battern(self.parse_battern_at(Prec::Pi)?)),
            Some(Token::LeftBrace) => Ok(LamDomain::Implicit(self.parse_implicit()?)),
            Some(Token::Identifier(_)) => {
                if self.check_at(1, &Token::Colon) {
                    self.note(TieBreak::CodomainOverDomainAnnotation, self.current_span());
                }
                Ok(LamDomain::Pattern(Pattern::Identifier(self.expect_identifier()?)))
            }
            Some(token) if starts_primary(token) => {
                let ty = self.parse_expression_bp(Prec::Union)?;
                Ok(LamDomain::Battern(Battern::Type(Box::new(ty))))
            }
            _ => Err(self.unexpected("domain")),
        }
    }

    /// 依存関数型の定義域
    pub(super) fn parse_pi_domain(&mut self, min: Prec) -> ParseResult<PiDomain> {
        if self.check(&Token::LeftBrace) {
            Ok(PiDomain::Implicit(self.parse_implicit()?))
        } else {
            Ok(PiDomain::Battern(self.parse_battern_at(min)?))
        }
    }

    /// 定義域を始められるトークンか
    pub(super) fn starts_lam_domain(&self) -> bool {
        match self.current_token() {
            Some(Token::LeftBrace) => true,
            Some(token) => starts_primary(token) && !token.starts_declaration(),
            None => false,
        }
    }
}
