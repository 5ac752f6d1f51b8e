//! パーサーモジュール
//!
//! トークン列をMimの構文木に変換する。優先順位表に基づく
//! precedence climbingで式を解析し、バインダー（pattern / battern /
//! implicit）は専用の再帰下降パーサーで扱う。
//!
//! ```mim
//! import core;
//!
//! /// 自然数の加算
//! axm %core.nat.add : [Nat, Nat] -> Nat, normalize_add, 1;
//!
//! lam f (x: Nat) : Nat = x;
//! ```
//!
//! 構文エラーが起きても解析は止まらない。宣言単位で次の`;`か
//! 宣言キーワードまで読み飛ばし、`Error`宣言を置いて続行する。

mod decl_parser;
mod expr;
mod expr_parser;
mod parser_impl;
mod pattern_parser;
pub mod precedence;

// 公開API
pub use parser_impl::Parser;
pub use precedence::{Assoc, InfixOp, Prec, TieBreak};

use crate::error::ParserError;
pub type ParseResult<T> = Result<T, ParserError>;
