//! Lexical analysis module for the Mim language.
//!
//! Tokens are produced by a `logos` automaton. The [`Lexer`] wrapper adds
//! line/column tracking, turns lexical failures into error-sentinel tokens
//! and splits a numeral from a following member access (`1.bot`).

mod literal_parser;

use logos::{FilterResult, Lexer as LogosLexer, Logos};
use std::fmt;

use crate::ast::{Primitive, Span};
use crate::error::{Diagnostic, LexerError};
use crate::parser::TieBreak;

pub use literal_parser::{parse_float, parse_int};

/// Dotted annex path scanned as one token: `%module.name[.subtag]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnexPath {
    pub module: String,
    pub name: String,
    pub subtag: Option<String>,
}

/// Token types for the Mim language
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexerError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Dependencies
    #[token("import")]
    Import,
    #[token("plugin")]
    Plugin,

    // Declarations
    #[token("axm")]
    Axm,
    #[token("cfun")]
    Cfun,
    #[token("ccon")]
    Ccon,
    #[token("let")]
    Let,
    #[token("rec")]
    Rec,
    #[token("and")]
    And,
    #[token("lam")]
    Lam,
    #[token("con")]
    Con,
    #[token("fun")]
    Fun,
    #[token("extern")]
    Extern,
    #[token("rule")]
    Rule,
    #[token("norm")]
    Norm,
    #[token("when")]
    When,

    // Expression keywords
    #[token("match")]
    Match,
    #[token("with")]
    With,
    #[token("where")]
    Where,
    #[token("end")]
    End,
    #[token("as")]
    As,
    #[token("ins")]
    #[token("insert")]
    Ins,
    #[token("ret")]
    Ret,
    #[token("inj")]
    Inj,
    #[token("Cn")]
    CnType,
    #[token("Fn")]
    FnType,
    #[token("cn")]
    Cn,
    #[token("lm")]
    #[token("λ")]
    #[token("fn")]
    Lm,

    // Builtin types
    #[token("Univ", |_| Primitive::Univ)]
    #[token("Type", |_| Primitive::Type)]
    #[token("Nat", |_| Primitive::Nat)]
    #[token("Idx", |_| Primitive::Idx)]
    #[token("Bool", |_| Primitive::Bool)]
    #[token("I1", |_| Primitive::I1)]
    #[token("I8", |_| Primitive::I8)]
    #[token("I16", |_| Primitive::I16)]
    #[token("I32", |_| Primitive::I32)]
    #[token("I64", |_| Primitive::I64)]
    #[token("*", |_| Primitive::Star)]
    #[token("★", |_| Primitive::Star)]
    #[token("□", |_| Primitive::Box)]
    #[token(".bot", |_| Primitive::Bot)]
    #[token("⊥", |_| Primitive::Bot)]
    #[token(".top", |_| Primitive::Top)]
    #[token("⊤", |_| Primitive::Top)]
    Primitive(Primitive),

    // Identifiers (keywords win on equal length)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    #[regex(
        r"%[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?",
        lex_annex
    )]
    Annex(AnnexPath),

    #[token("%")]
    Percent,

    // Literals
    #[token("tt", |_| true)]
    #[token("ff", |_| false)]
    Bool(bool),

    #[regex(
        r"[+-]?(0[bB][01]+|0[oO][0-7]+|0[xX][0-9a-fA-F]+|[0-9]+)",
        |lex| parse_int(lex.slice())
    )]
    Int(i128),

    #[regex(
        r"[+-]?([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?[0-9]+[eE][+-]?[0-9]+",
        |lex| parse_float(lex.slice())
    )]
    #[regex(
        r"[+-]?0[xX]([0-9a-fA-F]+\.[0-9a-fA-F]*|\.[0-9a-fA-F]+)([pP][+-]?[0-9]+)?|[+-]?0[xX][0-9a-fA-F]+[pP][+-]?[0-9]+",
        |lex| parse_float(lex.slice())
    )]
    Float(f64),

    #[regex(r#""([^"\\]|\\(.|\n))*""#, |lex| {
        let s = lex.slice();
        literal_parser::unescape_string(&s[1..s.len() - 1])
    })]
    #[regex(r#""([^"\\]|\\(.|\n))*"#, unterminated_string)]
    String(String),

    #[regex(r"'([^'\\]|\\.)'", |lex| {
        let s = lex.slice();
        literal_parser::unescape_char(&s[1..s.len() - 1])
    })]
    Char(char),

    #[regex(r"///[^\n]*", |lex| literal_parser::doc_text(lex.slice()))]
    DocComment(String),

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("{|")]
    #[token("⦃")]
    LeftUniq,
    #[token("|}")]
    #[token("⦄")]
    RightUniq,
    #[token("«")]
    #[token("⟪")]
    #[token("<<")]
    LeftArray,
    #[token("»")]
    #[token("⟫")]
    #[token(">>")]
    RightArray,
    #[token("‹")]
    #[token("⟨")]
    #[token("<")]
    LeftPack,
    #[token("›")]
    #[token("⟩")]
    #[token(">")]
    RightPack,

    // Punctuation
    #[token("=")]
    Assign,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    #[token("$")]
    Dollar,
    #[token("|")]
    Pipe,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    #[token("→")]
    Arrow,
    #[token("∪")]
    Union,

    // Comments (skipped)
    #[regex(r"//([^/\n][^\n]*)?", logos::skip)]
    #[token("/*", block_comment)]
    Comment,

    /// Error sentinel for input the automaton rejects
    Error(LexerError),
}

fn lex_annex(lex: &mut LogosLexer<Token>) -> AnnexPath {
    let mut parts = lex.slice()[1..].split('.').map(str::to_owned);
    AnnexPath {
        module: parts.next().unwrap_or_default(),
        name: parts.next().unwrap_or_default(),
        subtag: parts.next(),
    }
}

fn unterminated_string(_: &mut LogosLexer<Token>) -> Result<String, LexerError> {
    Err(LexerError::UnterminatedString)
}

/// Skips a block comment up to the first `*/`; a stray `*` or `/` does not end it.
fn block_comment(lex: &mut LogosLexer<Token>) -> FilterResult<(), LexerError> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexerError::UnterminatedBlockComment)
        }
    }
}

/// Closed classification of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    AnnexSigil,
    Punctuation,
    Primitive,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    DocComment,
    ErrorSentinel,
}

impl TokenKind {
    /// Primitive spellings are reserved words as well.
    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Keyword | TokenKind::Primitive)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::BoolLiteral
        )
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Import
            | Token::Plugin
            | Token::Axm
            | Token::Cfun
            | Token::Ccon
            | Token::Let
            | Token::Rec
            | Token::And
            | Token::Lam
            | Token::Con
            | Token::Fun
            | Token::Extern
            | Token::Rule
            | Token::Norm
            | Token::When
            | Token::Match
            | Token::With
            | Token::Where
            | Token::End
            | Token::As
            | Token::Ins
            | Token::Ret
            | Token::Inj
            | Token::CnType
            | Token::FnType
            | Token::Cn
            | Token::Lm => TokenKind::Keyword,
            Token::Primitive(_) => TokenKind::Primitive,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Annex(_) | Token::Percent => TokenKind::AnnexSigil,
            Token::Bool(_) => TokenKind::BoolLiteral,
            Token::Int(_) => TokenKind::IntLiteral,
            Token::Float(_) => TokenKind::FloatLiteral,
            Token::String(_) => TokenKind::StringLiteral,
            Token::Char(_) => TokenKind::CharLiteral,
            Token::DocComment(_) => TokenKind::DocComment,
            Token::Error(_) => TokenKind::ErrorSentinel,
            _ => TokenKind::Punctuation,
        }
    }

    /// Keywords that begin a declaration.
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            Token::Axm
                | Token::Cfun
                | Token::Ccon
                | Token::Let
                | Token::Rec
                | Token::Lam
                | Token::Con
                | Token::Fun
                | Token::Rule
                | Token::Norm
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Import => "import",
            Token::Plugin => "plugin",
            Token::Axm => "axm",
            Token::Cfun => "cfun",
            Token::Ccon => "ccon",
            Token::Let => "let",
            Token::Rec => "rec",
            Token::And => "and",
            Token::Lam => "lam",
            Token::Con => "con",
            Token::Fun => "fun",
            Token::Extern => "extern",
            Token::Rule => "rule",
            Token::Norm => "norm",
            Token::When => "when",
            Token::Match => "match",
            Token::With => "with",
            Token::Where => "where",
            Token::End => "end",
            Token::As => "as",
            Token::Ins => "ins",
            Token::Ret => "ret",
            Token::Inj => "inj",
            Token::CnType => "Cn",
            Token::FnType => "Fn",
            Token::Cn => "cn",
            Token::Lm => "lm",
            Token::Primitive(p) => return write!(f, "{}", p),
            Token::Identifier(s) => return write!(f, "{}", s),
            Token::Annex(path) => {
                write!(f, "%{}.{}", path.module, path.name)?;
                if let Some(subtag) = &path.subtag {
                    write!(f, ".{}", subtag)?;
                }
                return Ok(());
            }
            Token::Percent => "%",
            Token::Bool(true) => "tt",
            Token::Bool(false) => "ff",
            Token::Int(n) => return write!(f, "{}", n),
            Token::Float(x) => return write!(f, "{:?}", x),
            Token::String(s) => return write!(f, "\"{}\"", s),
            Token::Char(c) => return write!(f, "'{}'", c.escape_default()),
            Token::DocComment(s) => return write!(f, "/// {}", s),
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftUniq => "{|",
            Token::RightUniq => "|}",
            Token::LeftArray => "«",
            Token::RightArray => "»",
            Token::LeftPack => "‹",
            Token::RightPack => "›",
            Token::Assign => "=",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Dot => ".",
            Token::Hash => "#",
            Token::Colon => ":",
            Token::At => "@",
            Token::Dollar => "$",
            Token::Pipe => "|",
            Token::FatArrow => "=>",
            Token::Arrow => "->",
            Token::Union => "∪",
            Token::Comment => "comment",
            Token::Error(_) => "<error>",
        };
        f.write_str(text)
    }
}

/// Position tracking for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// A token with its position information
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub position: Position,
    pub span: Span,
}

/// Lexer for the Mim language
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    input: &'a str,
    /// Byte offset of `inner`'s source within `input`
    offset: usize,
    position: Position,
    last_end: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            input,
            offset: 0,
            position: Position::new(),
            last_end: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Lexical errors and notes recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// `1.` directly followed by an identifier character is an integer and a member.
    fn ends_before_member(&self, span: Span) -> bool {
        self.input[span.range()].ends_with('.')
            && self.input[span.end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    }

    /// Restarts scanning at `pos`.
    fn rebase(&mut self, pos: usize) {
        log::trace!("lexer rebased at byte {}", pos);
        self.offset = pos;
        self.inner = Token::lexer(&self.input[pos..]);
    }

    fn split_member(&mut self, span: Span) -> (Token, Span) {
        let int_span = Span::new(span.start, span.end - 1);
        self.rebase(int_span.end);
        self.diagnostics
            .push(Diagnostic::note(TieBreak::IntegerBeforeMember, int_span));
        let token = match parse_int(&self.input[int_span.range()]) {
            Ok(value) => Token::Int(value),
            Err(e) => {
                self.diagnostics.push(Diagnostic::error(e.clone(), int_span));
                Token::Error(e)
            }
        };
        (token, int_span)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = Span::new(local.start + self.offset, local.end + self.offset);

        let (token, span) = match result {
            Ok(Token::Float(_)) if self.ends_before_member(span) => self.split_member(span),
            Ok(token) => (token, span),
            Err(e) => {
                log::debug!("lexical error at {}..{}: {}", span.start, span.end, e);
                self.diagnostics.push(Diagnostic::error(e.clone(), span));
                (Token::Error(e), span)
            }
        };

        // Update position for any skipped content since last token
        for ch in self.input[self.last_end..span.start].chars() {
            self.position.advance(ch);
        }
        let position = self.position;
        for ch in self.input[span.range()].chars() {
            self.position.advance(ch);
        }
        self.last_end = span.end;

        Some(TokenWithPosition {
            token,
            position,
            span,
        })
    }
}

/// Tokenizes a whole source text, returning tokens and lexical diagnostics.
pub fn tokenize(input: &str) -> (Vec<TokenWithPosition>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(input);
    let tokens: Vec<_> = lexer.by_ref().collect();
    (tokens, lexer.into_diagnostics())
}
