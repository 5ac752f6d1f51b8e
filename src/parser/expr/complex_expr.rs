//! 複合式の解析
//!
//! タプル、sigma・依存関数型、配列、パック、singleton、insertを扱う。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser, Prec};

impl Parser {
    /// `[ … ]`：矢印が続けば依存関数型、そうでなければsigma
    pub(in crate::parser) fn parse_bracket_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let tuple = self.parse_binder_tuple(&Token::RightBracket, |p| {
            p.parse_battern_at(Prec::Bottom)
        })?;

        if self.match_token(&Token::Arrow) {
            let codomain = self.parse_expression_bp(Prec::Arrow)?;
            return Ok(Expression::Pi(PiExpr {
                kind: PiKind::Arrow,
                domain: PiDomain::Battern(Battern::Tuple(tuple)),
                codomain: Some(Box::new(codomain)),
                span: self.span_from(start),
            }));
        }

        let alias = if self.match_token(&Token::As) {
            Some(self.parse_name()?)
        } else {
            None
        };
        Ok(Expression::Sigma(SigmaExpr {
            tuple,
            alias,
            span: self.span_from(start),
        }))
    }

    /// `{ … } -> e`
    pub(in crate::parser) fn parse_implicit_pi(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let implicit = self.parse_implicit()?;
        self.expect(&Token::Arrow)?;
        let codomain = self.parse_expression_bp(Prec::Arrow)?;
        Ok(Expression::Pi(PiExpr {
            kind: PiKind::Arrow,
            domain: PiDomain::Implicit(implicit),
            codomain: Some(Box::new(codomain)),
            span: self.span_from(start),
        }))
    }

    /// `Cn domain` / `Fn domain [-> e]`
    pub(in crate::parser) fn parse_keyword_pi(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let kind = if self.match_token(&Token::CnType) {
            PiKind::Cn
        } else {
            self.expect(&Token::FnType)?;
            PiKind::Fn
        };

        let domain = self.parse_pi_domain(Prec::Pi)?;
        let codomain = if kind == PiKind::Fn && self.match_token(&Token::Arrow) {
            Some(Box::new(self.parse_expression_bp(Prec::Arrow)?))
        } else {
            None
        };

        Ok(Expression::Pi(PiExpr {
            kind,
            domain,
            codomain,
            span: self.span_from(start),
        }))
    }

    /// `ins(tuple, index, value)`
    pub(in crate::parser) fn parse_insert(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::Ins)?;
        self.expect(&Token::LeftParen)?;
        let tuple = self.parse_expression()?;
        self.expect(&Token::Comma)?;
        let index = self.parse_expression()?;
        self.expect(&Token::Comma)?;
        let value = self.parse_expression()?;
        self.expect(&Token::RightParen)?;

        Ok(Expression::Insert(InsertExpr {
            tuple: Box::new(tuple),
            index: Box::new(index),
            value: Box::new(value),
            span: self.span_from(start),
        }))
    }

    /// `{| e |}` / `⦃ e ⦄`
    pub(in crate::parser) fn parse_uniq(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::LeftUniq)?;
        let inner = self.parse_expression()?;
        self.expect(&Token::RightUniq)?;
        Ok(Expression::Uniq(UniqExpr {
            inner: Box::new(inner),
            span: self.span_from(start),
        }))
    }

    /// `«n, m; T»`
    pub(in crate::parser) fn parse_array(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::LeftArray)?;

        let mut sizes = vec![self.parse_expression()?];
        while self.match_token(&Token::Comma) {
            if self.check(&Token::Semicolon) {
                break;
            }
            sizes.push(self.parse_expression()?);
        }
        self.expect(&Token::Semicolon)?;
        let element = self.parse_expression()?;
        self.expect(&Token::RightArray)?;

        Ok(Expression::Array(ArrayExpr {
            sizes,
            element: Box::new(element),
            span: self.span_from(start),
        }))
    }

    /// `‹shape; body›`
    pub(in crate::parser) fn parse_pack(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::LeftPack)?;
        let shape = self.parse_expression()?;
        self.expect(&Token::Semicolon)?;
        let body = self.parse_expression()?;
        self.expect(&Token::RightPack)?;

        Ok(Expression::Pack(PackExpr {
            shape: Box::new(shape),
            body: Box::new(body),
            span: self.span_from(start),
        }))
    }

    /// `(e, …)`。括弧は常にタプルを作る
    pub(in crate::parser) fn parse_tuple(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::LeftParen)?;

        let mut elements = Vec::new();
        while !self.check(&Token::RightParen) {
            elements.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RightParen)?;

        Ok(Expression::Tuple(TupleExpr {
            elements,
            span: self.span_from(start),
        }))
    }
}
