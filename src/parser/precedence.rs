//! 優先順位表と曖昧性解消ルール
//!
//! 二項・混置構文の結合力と結合性を一か所にまとめる。
//! 式パーサーとバインダーパーサーはこの表だけを参照して分岐を決める。

use std::fmt;

/// 結合力（低い順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prec {
    Bottom,
    /// `literal : type`
    Annotation,
    Where,
    Arrow,
    /// バインダー・依存関数型の定義域
    Pi,
    Injection,
    Application,
    Union,
    Extraction,
    Primary,
}

impl Prec {
    /// 数値としての結合力
    pub const fn power(self) -> i8 {
        match self {
            Prec::Bottom => -2,
            Prec::Annotation => -1,
            Prec::Where => 1,
            Prec::Arrow => 2,
            Prec::Pi => 3,
            Prec::Injection => 5,
            Prec::Application => 6,
            Prec::Union => 7,
            Prec::Extraction => 8,
            Prec::Primary => i8::MAX,
        }
    }

    /// 一段強い結合力
    pub const fn next(self) -> Prec {
        match self {
            Prec::Bottom => Prec::Annotation,
            Prec::Annotation => Prec::Where,
            Prec::Where => Prec::Arrow,
            Prec::Arrow => Prec::Pi,
            Prec::Pi => Prec::Injection,
            Prec::Injection => Prec::Application,
            Prec::Application => Prec::Union,
            Prec::Union => Prec::Extraction,
            Prec::Extraction | Prec::Primary => Prec::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// 中置構文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    /// `e where decl* end`
    Where,
    /// `->` / `→`
    Arrow,
    /// `inj`
    Injection,
    /// 並置
    Application,
    /// `@`
    ExplicitApplication,
    /// `∪`
    Union,
    /// `#`
    Extraction,
}

/// 優先順位表
pub const TABLE: [(InfixOp, Prec, Assoc); 7] = [
    (InfixOp::Where, Prec::Where, Assoc::Left),
    (InfixOp::Arrow, Prec::Arrow, Assoc::Right),
    (InfixOp::Injection, Prec::Injection, Assoc::Left),
    (InfixOp::Application, Prec::Application, Assoc::Left),
    (InfixOp::ExplicitApplication, Prec::Application, Assoc::Left),
    (InfixOp::Union, Prec::Union, Assoc::Left),
    (InfixOp::Extraction, Prec::Extraction, Assoc::Left),
];

impl InfixOp {
    pub fn binding(self) -> (Prec, Assoc) {
        TABLE
            .iter()
            .find(|(op, _, _)| *op == self)
            .map(|&(_, prec, assoc)| (prec, assoc))
            .unwrap_or((Prec::Primary, Assoc::Left))
    }

    pub fn prec(self) -> Prec {
        self.binding().0
    }

    /// 右オペランドを解析するときの最小結合力
    pub fn right_min(self) -> Prec {
        match self.binding() {
            (prec, Assoc::Left) => prec.next(),
            (prec, Assoc::Right) => prec,
        }
    }
}

/// 名前付きの曖昧性解消ルール
///
/// 適用されるたびに`Severity::Note`の診断として記録される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TieBreak {
    /// 両方を受け付けるバインダー位置の裸の識別子はパターン
    PatternOverBattern,
    /// `[a b : T]`はグループであり、適用`a b`ではない
    GroupOverBatternType,
    /// 括弧なし識別子の後の`:`は外側の構文に属する
    CodomainOverDomainAnnotation,
    /// `lit : T`はリテラルだけを注釈する
    LiteralAnnotation,
    /// 型だけの定義域の後の`@`はフィルター
    FilterOverExplicitApplication,
    /// 式の位置では`%m.n (…)`は適用
    AnnexArgumentOverSubtags,
    /// 宣言キーワードは適用の引数を始めない
    DeclarationEndsApplication,
    /// `1.bot`は整数と`.bot`
    IntegerBeforeMember,
}

impl TieBreak {
    pub fn name(self) -> &'static str {
        match self {
            TieBreak::PatternOverBattern => "pattern-over-battern",
            TieBreak::GroupOverBatternType => "group-over-battern-type",
            TieBreak::CodomainOverDomainAnnotation => "codomain-over-domain-annotation",
            TieBreak::LiteralAnnotation => "literal-annotation",
            TieBreak::FilterOverExplicitApplication => "filter-over-explicit-application",
            TieBreak::AnnexArgumentOverSubtags => "annex-argument-over-subtags",
            TieBreak::DeclarationEndsApplication => "declaration-ends-application",
            TieBreak::IntegerBeforeMember => "integer-before-member",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TieBreak::PatternOverBattern => "identifier binder read as a pattern",
            TieBreak::GroupOverBatternType => "identifier run read as a binder group",
            TieBreak::CodomainOverDomainAnnotation => {
                "type annotation belongs to the enclosing form, not the identifier"
            }
            TieBreak::LiteralAnnotation => "type annotation applies to the literal only",
            TieBreak::FilterOverExplicitApplication => "'@' read as a filter",
            TieBreak::AnnexArgumentOverSubtags => {
                "parenthesized group after an annex read as an argument"
            }
            TieBreak::DeclarationEndsApplication => "declaration keyword ends the application",
            TieBreak::IntegerBeforeMember => "numeral before '.' read as an integer",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.name())
    }
}
