//! 式の解析モジュール
//!
//! 一次式の解析を複数のサブモジュールに分割して管理する。
//! 中置構文の畳み込みは`expr_parser`が担当する。

// サブモジュール
mod complex_expr;
mod control_expr;
mod literal_expr;
