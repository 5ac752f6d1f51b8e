//! 制御構造と束縛を含む式の解析
//!
//! ラムダ、`ret`、`match`、宣言付き式（`decl+ e`）を扱う。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// `lm domain+ [: T] = body` / `cn pattern+ = body`
    pub(in crate::parser) fn parse_lambda(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let kind = if self.match_token(&Token::Cn) {
            LambdaKind::Cn
        } else {
            self.expect(&Token::Lm)?;
            LambdaKind::Lm
        };

        let mut domains = Vec::new();
        match kind {
            LambdaKind::Lm => {
                domains.push(self.parse_lam_domain()?);
                while self.starts_lam_domain() {
                    domains.push(self.parse_lam_domain()?);
                }
            }
            LambdaKind::Cn => {
                domains.push(LamDomain::Pattern(self.parse_pattern()?));
                while self.check(&Token::LeftParen)
                    || matches!(self.current_token(), Some(Token::Identifier(_)))
                {
                    domains.push(LamDomain::Pattern(self.parse_pattern()?));
                }
            }
        }

        let codomain = if kind == LambdaKind::Lm && self.match_token(&Token::Colon) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect(&Token::Assign)?;
        let body = self.parse_expression()?;

        Ok(Expression::Lambda(LambdaExpr {
            kind,
            domains,
            codomain,
            body: Box::new(body),
            span: self.span_from(start),
        }))
    }

    /// `ret binder = callee $ argument; body`
    pub(in crate::parser) fn parse_ret(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::Ret)?;
        let binder = self.parse_binder(true)?;
        self.expect(&Token::Assign)?;
        let callee = self.parse_expression()?;
        self.expect(&Token::Dollar)?;
        let argument = self.parse_expression()?;
        self.expect(&Token::Semicolon)?;
        let body = self.parse_expression()?;

        Ok(Expression::Ret(RetExpr {
            binder,
            callee: Box::new(callee),
            argument: Box::new(argument),
            body: Box::new(body),
            span: self.span_from(start),
        }))
    }

    /// `match e with [arm] {| arm}`
    pub(in crate::parser) fn parse_match(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(&Token::Match)?;
        let scrutinee = self.parse_expression()?;
        self.expect(&Token::With)?;

        let mut arms = Vec::new();
        if self.starts_lam_domain() && !self.check(&Token::LeftBrace) {
            arms.push(self.parse_match_arm()?);
        }
        while self.match_token(&Token::Pipe) {
            arms.push(self.parse_match_arm()?);
        }

        Ok(Expression::Match(MatchExpr {
            scrutinee: Box::new(scrutinee),
            arms,
            span: self.span_from(start),
        }))
    }

    fn parse_match_arm(&mut self) -> ParseResult<MatchArm> {
        let start = self.current_span().start;
        let binder = self.parse_binder(true)?;
        self.expect(&Token::FatArrow)?;
        let body = self.parse_expression()?;
        Ok(MatchArm {
            binder,
            body,
            span: self.span_from(start),
        })
    }

    /// 宣言付き式：宣言は本体の式だけに見える
    pub(in crate::parser) fn parse_declaration_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let mut declarations = Vec::new();
        while self
            .current_token()
            .is_some_and(|token| token.starts_declaration())
        {
            declarations.push(self.parse_declaration()?);
            self.match_token(&Token::Semicolon);
        }
        let body = self.parse_expression()?;

        Ok(Expression::Declarations(DeclExpr {
            declarations,
            body: Box::new(body),
            span: self.span_from(start),
        }))
    }
}
