//! Mim Syntax Library
//!
//! This library provides the lexer, parser and pretty printer for the Mim language.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use ast::{Declaration, DeclarationKind, Expression, SourceFile, Span};
pub use error::{Diagnostic, Diagnostics, LexerError, MimError, ParserError, Severity};
pub use lexer::{tokenize, Lexer, Token, TokenKind, TokenWithPosition};
pub use parser::{ParseResult, Parser, Prec, TieBreak};

/// Result of parsing one source unit: the tree is always present.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub name: String,
    pub tree: SourceFile,
    /// Lexical and syntax diagnostics ordered by position
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Tie-break notes recorded while parsing.
    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Parses a named source unit.
///
/// Independent units share no mutable state and may be parsed on separate threads.
pub fn parse_unit(name: impl Into<String>, text: &str) -> ParseOutput {
    let name = name.into();
    log::debug!("parsing unit {}", name);

    let (tokens, lexical) = tokenize(text);
    let mut parser = Parser::new(tokens);
    let tree = parser.parse_source_file();

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(lexical);
    diagnostics.extend(parser.into_diagnostics());
    let diagnostics = diagnostics.into_vec();
    log::debug!(
        "parsed unit {}: {} declarations, {} diagnostics",
        name,
        tree.declarations.len(),
        diagnostics.len()
    );

    ParseOutput {
        name,
        tree,
        diagnostics,
    }
}

pub fn parse_source(text: &str) -> ParseOutput {
    parse_unit("<input>", text)
}
