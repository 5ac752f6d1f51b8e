//! 依存宣言と宣言（axm、cfun、ccon、let、rec、lam、rule）の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser, Prec, TieBreak};

impl Parser {
    /// `import name;` / `plugin name;`
    pub(super) fn parse_dependency(&mut self) -> ParseResult<Dependency> {
        let start = self.current_span().start;
        let kind = if self.match_token(&Token::Plugin) {
            DependencyKind::Plugin
        } else {
            self.expect(&Token::Import)?;
            DependencyKind::Import
        };
        let name = self.expect_identifier()?;
        // 依存宣言のセミコロンは省略できない
        self.expect(&Token::Semicolon)?;

        Ok(Dependency {
            kind,
            name,
            span: self.span_from(start),
        })
    }

    /// 宣言を解析（末尾の`;`は呼び出し側が処理する）
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let start = self.current_span().start;
        let doc = self.docs.get_mut(self.current).and_then(Option::take);
        if let Some(token) = self.current_token() {
            log::debug!("declaration '{}' at {}", token, start);
        }

        let kind = match self.current_token() {
            Some(Token::Axm) => DeclarationKind::Axiom(self.parse_axiom()?),
            Some(Token::Cfun) => DeclarationKind::Cfun(self.parse_cfun()?),
            Some(Token::Ccon) => DeclarationKind::Ccon(self.parse_ccon()?),
            Some(Token::Let) => DeclarationKind::Let(self.parse_let()?),
            Some(Token::Rec) => DeclarationKind::Rec(self.parse_rec()?),
            Some(Token::Lam) | Some(Token::Con) | Some(Token::Fun) => {
                DeclarationKind::Lam(self.parse_lam_decl()?)
            }
            Some(Token::Rule) | Some(Token::Norm) => DeclarationKind::Rule(self.parse_rule()?),
            _ => return Err(self.unexpected("declaration")),
        };

        Ok(Declaration {
            doc,
            kind,
            span: self.span_from(start),
        })
    }

    /// `axm %m.n : T [, normalizer] [, curry [, trip]]`
    fn parse_axiom(&mut self) -> ParseResult<AxiomDecl> {
        let start = self.current_span().start;
        self.expect(&Token::Axm)?;
        let name = self.parse_annex_name(true)?;
        self.expect(&Token::Colon)?;
        let ty = self.parse_expression()?;

        let mut normalizer = None;
        let mut curry = None;
        let mut trip = None;
        if self.match_token(&Token::Comma) {
            if matches!(self.current_token(), Some(Token::Identifier(_))) {
                normalizer = Some(self.expect_identifier()?);
                if self.match_token(&Token::Comma) {
                    curry = Some(self.parse_curry()?);
                }
            } else {
                curry = Some(self.parse_curry()?);
            }
            // tripはcurryの後にだけ書ける
            if curry.is_some() && self.match_token(&Token::Comma) {
                trip = Some(self.expect_identifier()?);
            }
        }

        Ok(AxiomDecl {
            name,
            ty,
            normalizer,
            curry,
            trip,
            span: self.span_from(start),
        })
    }

    /// カリー化の段数（非負の整数リテラル）
    fn parse_curry(&mut self) -> ParseResult<u64> {
        let span = self.current_span();
        match self.current_token() {
            Some(Token::Int(n)) => {
                let n = *n;
                self.advance();
                u64::try_from(n).map_err(|_| {
                    self.invalid(format!("curry count must be non-negative, found {}", n), span)
                })
            }
            _ => Err(self.unexpected("curry count")),
        }
    }

    /// `cfun battern : T`
    fn parse_cfun(&mut self) -> ParseResult<CfunDecl> {
        let start = self.current_span().start;
        self.expect(&Token::Cfun)?;

        let domain = if self.check(&Token::LeftBracket) {
            self.parse_battern_at(Prec::Pi)?
        } else {
            // 裸の識別子の後の`:`は宣言の型
            if matches!(self.current_token(), Some(Token::Identifier(_)))
                && self.check_at(1, &Token::Colon)
            {
                self.note(TieBreak::CodomainOverDomainAnnotation, self.current_span());
            }
            Battern::Type(Box::new(self.parse_expression_bp(Prec::Pi)?))
        };
        self.expect(&Token::Colon)?;
        let ty = self.parse_expression()?;

        Ok(CfunDecl {
            domain,
            ty,
            span: self.span_from(start),
        })
    }

    /// `ccon battern`
    fn parse_ccon(&mut self) -> ParseResult<CconDecl> {
        let start = self.current_span().start;
        self.expect(&Token::Ccon)?;
        let domain = self.parse_battern_at(Prec::Pi)?;

        Ok(CconDecl {
            domain,
            span: self.span_from(start),
        })
    }

    /// `let (annex | binder) = e`
    fn parse_let(&mut self) -> ParseResult<LetDecl> {
        let start = self.current_span().start;
        self.expect(&Token::Let)?;

        let target = match self.current_token() {
            Some(Token::Annex(_)) | Some(Token::Percent) => {
                LetTarget::Annex(self.parse_annex_name(true)?)
            }
            _ => LetTarget::Binder(self.parse_binder(true)?),
        };
        self.expect(&Token::Assign)?;
        let value = self.parse_expression()?;

        Ok(LetDecl {
            target,
            value,
            span: self.span_from(start),
        })
    }

    /// `rec name [: T] = e {and name [: T] = e} [and lam]`
    fn parse_rec(&mut self) -> ParseResult<RecDecl> {
        let start = self.current_span().start;
        self.expect(&Token::Rec)?;

        let mut bindings = vec![self.parse_rec_binding()?];
        let mut lam = None;
        while self.match_token(&Token::And) {
            if matches!(
                self.current_token(),
                Some(Token::Lam) | Some(Token::Con) | Some(Token::Fun)
            ) {
                // lamはグループの最後にだけ置ける
                lam = Some(self.parse_lam_decl()?);
                break;
            }
            bindings.push(self.parse_rec_binding()?);
        }

        Ok(RecDecl {
            bindings,
            lam,
            span: self.span_from(start),
        })
    }

    fn parse_rec_binding(&mut self) -> ParseResult<RecBinding> {
        let start = self.current_span().start;
        let name = self.parse_name()?;
        let ty = if self.match_token(&Token::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&Token::Assign)?;
        let value = self.parse_expression()?;

        Ok(RecBinding {
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    /// `(lam|con|fun) [extern] name {domain [@ filter]} [: T] [= e]`
    fn parse_lam_decl(&mut self) -> ParseResult<LamDecl> {
        let start = self.current_span().start;
        let kind = match self.current_token() {
            Some(Token::Lam) => LamKind::Lam,
            Some(Token::Con) => LamKind::Con,
            Some(Token::Fun) => LamKind::Fun,
            _ => return Err(self.unexpected("'lam', 'con' or 'fun'")),
        };
        self.advance();
        let is_extern = self.match_token(&Token::Extern);
        let name = self.parse_name()?;

        let mut params = Vec::new();
        while self.starts_lam_domain() {
            params.push(self.parse_lam_param()?);
        }

        let codomain = if self.match_token(&Token::Colon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let body = if self.match_token(&Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(LamDecl {
            kind,
            is_extern,
            name,
            params,
            codomain,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_lam_param(&mut self) -> ParseResult<LamParam> {
        let start = self.current_span().start;
        let domain = self.parse_lam_domain()?;

        let filter = if self.check(&Token::At) {
            if matches!(domain, LamDomain::Battern(Battern::Type(_))) {
                self.note(TieBreak::FilterOverExplicitApplication, self.current_span());
            }
            self.advance();
            Some(self.parse_expression_bp(Prec::Union)?)
        } else {
            None
        };

        Ok(LamParam {
            domain,
            filter,
            span: self.span_from(start),
        })
    }

    /// `(rule|norm) binder : lhs [when guard] => rhs`
    fn parse_rule(&mut self) -> ParseResult<RuleDecl> {
        let start = self.current_span().start;
        let kind = if self.match_token(&Token::Norm) {
            RuleKind::Norm
        } else {
            self.expect(&Token::Rule)?;
            RuleKind::Rule
        };

        let binder = self.parse_binder(false)?;
        self.expect(&Token::Colon)?;
        let lhs = self.parse_expression()?;
        let guard = if self.match_token(&Token::When) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&Token::FatArrow)?;
        let rhs = self.parse_expression()?;

        Ok(RuleDecl {
            kind,
            binder,
            lhs,
            guard,
            rhs,
            span: self.span_from(start),
        })
    }
}
