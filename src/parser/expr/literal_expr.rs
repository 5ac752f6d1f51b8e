// リテラル式と基本的な式の解析
//
// 一次式の振り分けと、プリミティブ・識別子・annex・リテラルを解析する。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser, Prec, TieBreak};

impl Parser {
    /// 一次式を解析
    ///
    /// `min`はリテラル注釈のノート記録にだけ使う。
    pub(in crate::parser) fn parse_primary(&mut self, min: Prec) -> ParseResult<Expression> {
        match self.current_token() {
            Some(Token::Primitive(kind)) => {
                let kind = *kind;
                let span = self.current_span();
                self.advance();
                Ok(Expression::Primitive(PrimitiveExpr { kind, span }))
            }
            Some(Token::Identifier(_)) => Ok(Expression::Identifier(self.expect_identifier()?)),
            Some(Token::Annex(_)) => self.parse_annex_expression(),
            Some(Token::Bool(_))
            | Some(Token::Int(_))
            | Some(Token::Float(_))
            | Some(Token::String(_))
            | Some(Token::Char(_)) => self.parse_literal(min),
            Some(token) if token.starts_declaration() => self.parse_declaration_expression(),
            Some(Token::LeftBracket) => self.parse_bracket_expression(),
            Some(Token::LeftBrace) => self.parse_implicit_pi(),
            Some(Token::CnType) | Some(Token::FnType) => self.parse_keyword_pi(),
            Some(Token::Lm) | Some(Token::Cn) => self.parse_lambda(),
            Some(Token::Ins) => self.parse_insert(),
            Some(Token::Ret) => self.parse_ret(),
            Some(Token::LeftUniq) => self.parse_uniq(),
            Some(Token::LeftArray) => self.parse_array(),
            Some(Token::LeftPack) => self.parse_pack(),
            Some(Token::LeftParen) => self.parse_tuple(),
            Some(Token::Match) => self.parse_match(),
            Some(Token::Error(_)) => {
                // 字句解析で報告済み
                let span = self.current_span();
                self.advance();
                Ok(Expression::Error(span))
            }
            Some(Token::Percent) => Err(self.invalid(
                "annex name must follow '%' without whitespace",
                self.current_span(),
            )),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// 式の位置のannex（後続の`(`は引数）
    fn parse_annex_expression(&mut self) -> ParseResult<Expression> {
        let annex = self.parse_annex_name(false)?;
        if self.check(&Token::LeftParen) {
            self.note(TieBreak::AnnexArgumentOverSubtags, self.current_span());
        }
        Ok(Expression::Annex(annex))
    }

    /// リテラルと、続く`: type`注釈
    fn parse_literal(&mut self, min: Prec) -> ParseResult<Expression> {
        let span = self.current_span();
        let value = match self.current_token() {
            Some(Token::Bool(b)) => Literal::Bool(*b),
            Some(Token::Int(n)) => Literal::Int(*n),
            Some(Token::Float(x)) => Literal::Float(*x),
            Some(Token::String(s)) => Literal::String(s.clone()),
            Some(Token::Char(c)) => Literal::Char(*c),
            _ => return Err(self.unexpected("literal")),
        };
        self.advance();
        let literal = LiteralExpr { value, span };

        if !self.match_token(&Token::Colon) {
            return Ok(Expression::Literal(literal));
        }

        // 注釈はリテラルだけに掛かり、型は最も弱い結合力で読む
        if min > Prec::Annotation {
            self.note(TieBreak::LiteralAnnotation, span);
        }
        let ty = self.parse_expression_bp(Prec::Bottom)?;
        Ok(Expression::Annotated(AnnotatedExpr {
            value: literal,
            ty: Box::new(ty),
            span: self.span_from(span.start),
        }))
    }

    /// annex名を解析
    ///
    /// `subtags`が真（名前の位置）なら、識別子・`=`・`,`だけからなる括弧を
    /// サブタグの一覧として読む。
    pub(in crate::parser) fn parse_annex_name(&mut self, subtags: bool) -> ParseResult<AnnexName> {
        let start = self.current_span().start;
        let path = match self.current_token() {
            Some(Token::Annex(path)) => path.clone(),
            Some(Token::Percent) => {
                return Err(self.invalid(
                    "annex name must follow '%' without whitespace",
                    self.current_span(),
                ))
            }
            _ => return Err(self.unexpected("annex name")),
        };
        self.advance();

        let mut list = Vec::new();
        if subtags && self.subtag_list_ahead() {
            if path.subtag.is_some() {
                return Err(self.invalid(
                    "annex cannot have both a dotted subtag and a subtag list",
                    self.current_span(),
                ));
            }
            list = self.parse_subtag_list()?;
        }

        Ok(AnnexName {
            module: path.module,
            name: path.name,
            subtag: path.subtag,
            subtags: list,
            span: self.span_from(start),
        })
    }

    fn subtag_list_ahead(&self) -> bool {
        if !self.check(&Token::LeftParen) {
            return false;
        }
        let mut n = 1;
        loop {
            match self.peek(n) {
                Some(Token::Identifier(_)) | Some(Token::Assign) | Some(Token::Comma) => n += 1,
                Some(Token::RightParen) => return n > 1,
                _ => return false,
            }
        }
    }

    /// `(tag [= alias]* {, tag [= alias]*} [,])`
    fn parse_subtag_list(&mut self) -> ParseResult<Vec<AnnexSubtag>> {
        self.expect(&Token::LeftParen)?;
        let mut list = Vec::new();
        while !self.check(&Token::RightParen) {
            let start = self.current_span().start;
            let tag = self.expect_identifier()?;
            let mut aliases = Vec::new();
            while self.match_token(&Token::Assign) {
                aliases.push(self.expect_identifier()?);
            }
            list.push(AnnexSubtag {
                tag,
                aliases,
                span: self.span_from(start),
            });
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RightParen)?;
        Ok(list)
    }

    /// 名前の位置：識別子かannex
    pub(in crate::parser) fn parse_name(&mut self) -> ParseResult<Name> {
        match self.current_token() {
            Some(Token::Identifier(_)) => Ok(Name::Ident(self.expect_identifier()?)),
            Some(Token::Annex(_)) | Some(Token::Percent) => {
                Ok(Name::Annex(self.parse_annex_name(true)?))
            }
            _ => Err(self.unexpected("name")),
        }
    }
}
