//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::{Diagnostic, Diagnostics, ParserError};
use crate::lexer::{Token, TokenWithPosition};

use super::{ParseResult, TieBreak};

/// Mimパーサー
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    /// `tokens[i]`の直前に書かれたドキュメントコメント
    pub(super) docs: Vec<Option<String>>,
    pub(super) current: usize,
    pub(super) diagnostics: Diagnostics,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        // ドキュメントコメントはトークン列から外し、次のトークンに紐付ける
        let mut kept = Vec::with_capacity(tokens.len());
        let mut docs = Vec::with_capacity(tokens.len());
        let mut pending: Vec<String> = Vec::new();
        for token in tokens {
            match token.token {
                Token::DocComment(text) => pending.push(text),
                _ => {
                    docs.push((!pending.is_empty()).then(|| pending.join("\n")));
                    pending.clear();
                    kept.push(token);
                }
            }
        }

        Self {
            tokens: kept,
            docs,
            current: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    /// ソースファイル全体を解析
    ///
    /// 失敗しない。構文エラーは診断として記録され、木には`Error`宣言が残る。
    pub fn parse_source_file(&mut self) -> SourceFile {
        let start = self.current_span().start;

        // 依存宣言
        let mut dependencies = Vec::new();
        while self.check(&Token::Import) || self.check(&Token::Plugin) {
            let from = self.current;
            match self.parse_dependency() {
                Ok(dep) => dependencies.push(dep),
                Err(e) => {
                    self.report(e);
                    self.synchronize(from);
                }
            }
        }

        // トップレベル宣言
        let mut declarations = Vec::new();
        while !self.is_at_end() {
            let from = self.current;
            let result = if self.check(&Token::Import) || self.check(&Token::Plugin) {
                Err(ParserError::InvalidSyntax {
                    message: "dependencies must precede all declarations".to_string(),
                    span: self.current_span(),
                })
            } else {
                self.parse_declaration()
            };

            match result {
                Ok(decl) => {
                    declarations.push(decl);
                    self.match_token(&Token::Semicolon);
                }
                Err(e) => {
                    self.report(e);
                    let span = self.synchronize(from);
                    declarations.push(Declaration {
                        doc: None,
                        kind: DeclarationKind::Error,
                        span,
                    });
                }
            }
        }

        SourceFile {
            dependencies,
            declarations,
            span: self.span_from(start),
        }
    }

    /// 単一の式を解析
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_bp(super::Prec::Bottom)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }

    // ==================== エラー回復 ====================

    /// 構文エラーを記録（字句エラー由来のものは二重に報告しない）
    pub(super) fn report(&mut self, error: ParserError) {
        log::debug!("syntax error: {}", error);
        if !error.is_reported() {
            let span = error.span();
            self.diagnostics.error(error, span);
        }
    }

    /// 次の`;`（消費する）か宣言キーワードまで読み飛ばす
    ///
    /// `from`は失敗した宣言の開始位置。少なくとも1トークンは進める。
    pub(super) fn synchronize(&mut self, from: usize) -> Span {
        self.skip_to_boundary(from, false)
    }

    /// `where`の中での回復：`end`（消費しない）でも止まる
    pub(super) fn synchronize_in_where(&mut self, from: usize) -> Span {
        self.skip_to_boundary(from, true)
    }

    fn skip_to_boundary(&mut self, from: usize, stop_at_end: bool) -> Span {
        let start = self
            .tokens
            .get(from)
            .map(|t| t.span.start)
            .unwrap_or_else(|| self.current_span().start);
        if self.current == from {
            self.advance();
        }
        while let Some(token) = self.current_token() {
            if matches!(token, Token::Semicolon) {
                self.advance();
                break;
            }
            if token.starts_declaration() || matches!(token, Token::Import | Token::Plugin) {
                break;
            }
            if stop_at_end && matches!(token, Token::End) {
                break;
            }
            self.advance();
        }
        log::debug!("recovered at token {}", self.current);
        self.span_from(start)
    }

    /// 曖昧性解消ノートを記録（同じ位置の連続した記録はまとめる）
    pub(super) fn note(&mut self, rule: TieBreak, span: Span) {
        let duplicate = self
            .diagnostics
            .iter()
            .last()
            .is_some_and(|d| d.span == span && d.error == crate::error::MimError::Ambiguity(rule));
        if !duplicate {
            self.diagnostics.note(rule, span);
        }
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のスパンを取得（終端では最後のトークンの直後）
    pub(super) fn current_span(&self) -> Span {
        match self.tokens.get(self.current) {
            Some(t) => t.span,
            None => {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                Span::new(end, end)
            }
        }
    }

    /// 開始位置から現在位置までのスパンを作成
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = if self.current > 0 {
            // 前のトークンの終了位置を使用
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start)
        } else {
            start
        };
        Span::new(start, end.max(start))
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// オフセット先のトークンをチェック
    pub(super) fn check_at(&self, offset: usize, token_type: &Token) -> bool {
        self.peek(offset)
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token_type))
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, token_type: &Token) -> ParseResult<Span> {
        if self.check(token_type) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&format!("'{}'", token_type)))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Ident> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let ident = Ident::new(name.clone(), self.current_span());
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// 予期しないトークンエラーを作成
    pub(super) fn unexpected(&self, expected: &str) -> ParserError {
        let span = self.current_span();
        match self.current_token() {
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span,
            },
            Some(Token::Error(_)) => ParserError::ErrorSentinel { span },
            Some(token) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("'{}'", token),
                span,
            },
        }
    }

    /// 不正な構文エラーを作成
    pub(super) fn invalid(&self, message: impl Into<String>, span: Span) -> ParserError {
        ParserError::InvalidSyntax {
            message: message.into(),
            span,
        }
    }
}
