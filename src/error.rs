//! 統一的なエラーハンドリングモジュール
//!
//! 字句解析・構文解析で発生するエラーと、曖昧性解消の記録（ノート）を
//! 診断情報としてまとめ、codespan-reportingで表示できる形に変換します。

use crate::ast::Span;
use crate::parser::TieBreak;
use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use thiserror::Error;

/// Mimフロントエンドの統一エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MimError {
    /// レキサーエラー
    #[error("lexical error: {0}")]
    Lexer(#[from] LexerError),

    /// パーサーエラー
    #[error("syntax error: {0}")]
    Parser(#[from] ParserError),

    /// 曖昧性解消ルールの適用（エラーではない）
    #[error("ambiguity resolved: {0}")]
    Ambiguity(TieBreak),
}

/// レキサーエラー
///
/// logosのエラー型としても使うため、位置情報は持たずトークン側のスパンを使う。
#[derive(Error, Debug, Clone, PartialEq, Default)]
pub enum LexerError {
    #[default]
    #[error("unrecognized token")]
    UnrecognizedToken,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedBlockComment,

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("invalid syntax: {message}")]
    InvalidSyntax { message: String, span: Span },

    /// 字句解析で既に報告済みのエラートークンに当たった
    #[error("error token")]
    ErrorSentinel { span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::InvalidSyntax { span, .. }
            | ParserError::ErrorSentinel { span } => *span,
        }
    }

    /// 字句エラーとして既に報告されているか
    pub fn is_reported(&self) -> bool {
        matches!(self, ParserError::ErrorSentinel { .. })
    }
}

/// 診断の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Severity {
    Error,
    Note,
}

/// エラー情報とソースコードの位置情報を含む診断
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub span: Span,
    pub error: MimError,
}

impl Diagnostic {
    pub fn error(error: impl Into<MimError>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            span,
            error: error.into(),
        }
    }

    pub fn note(rule: TieBreak, span: Span) -> Self {
        Self {
            severity: Severity::Note,
            span,
            error: MimError::Ambiguity(rule),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_codespan<FileId: Copy>(&self, file_id: FileId) -> CodespanDiagnostic<FileId> {
        let range = self.span.range();
        let (base, label) = match &self.error {
            MimError::Lexer(e) => (
                CodespanDiagnostic::error().with_code("E0001"),
                Label::primary(file_id, range).with_message(match e {
                    LexerError::UnrecognizedToken => "not a Mim token",
                    LexerError::UnterminatedString => "string is never closed",
                    LexerError::UnterminatedBlockComment => "comment runs to end of input",
                    LexerError::InvalidNumber(_) => "number out of range",
                }),
            ),
            MimError::Parser(e) => (
                CodespanDiagnostic::error().with_code("E0002"),
                Label::primary(file_id, range).with_message(match e {
                    ParserError::UnexpectedToken { expected, .. } => {
                        format!("expected {} here", expected)
                    }
                    ParserError::UnexpectedEof { .. } => "input ends here".to_string(),
                    ParserError::InvalidSyntax { .. } => "malformed construct".to_string(),
                    ParserError::ErrorSentinel { .. } => "error token".to_string(),
                }),
            ),
            MimError::Ambiguity(rule) => (
                CodespanDiagnostic::note(),
                Label::secondary(file_id, range).with_message(rule.name()),
            ),
        };
        base.with_message(self.message()).with_labels(vec![label])
    }
}

/// 複数の診断を蓄積するためのコレクター
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn error(&mut self, error: impl Into<MimError>, span: Span) {
        self.items.push(Diagnostic::error(error, span));
    }

    /// 曖昧性解消ノートを追加
    pub fn note(&mut self, rule: TieBreak, span: Span) {
        log::trace!("tie-break {} at {}..{}", rule.name(), span.start, span.end);
        self.items.push(Diagnostic::note(rule, span));
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(other);
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(mut self) -> Vec<Diagnostic> {
        self.items.sort_by_key(|d| d.span.start);
        self.items
    }
}
