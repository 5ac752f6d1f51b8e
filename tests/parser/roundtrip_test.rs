//! 整形出力の再解析テスト
//!
//! 構文木を表示して再び解析すると、スパンを除いて同じ木になる。

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn assert_round_trip(source: &str) {
    let first = assert_parse_success(source);
    let printed = first.to_string();
    let second = assert_parse_success(&printed);
    assert_eq!(structure(&first), structure(&second), "printed:\n{}", printed);

    // 二度目の表示は変わらない
    assert_eq!(second.to_string(), printed);
}

#[test_case("import core;\nplugin mem;\naxm %core.nat.add : [Nat, Nat] -> Nat, normalize_add, 1;"; "dependencies and axiom")]
#[test_case("axm %core.nat(add = plus, sub) : Nat, 2, trip;"; "subtag list")]
#[test_case("lam f (x: Nat) : Nat = x;"; "lam declaration")]
#[test_case("let y = (a, b) where let a = 1; let b = 2; end;"; "where")]
#[test_case("rec even = lm n = odd n and odd = lm n = even n and fun h x = x;"; "rec group")]
#[test_case("let id = lm {T: *} (x: T) : T = x;"; "implicit lambda")]
#[test_case("let t = ⦃x⦄ ∪ «2, 3; I8» ∪ ‹n; y›;"; "unicode delimiters")]
#[test_case("let u = {| x |} ∪ <<2; I8>> ∪ <n; y>;"; "ascii delimiters")]
#[test_case("let m = match p with (a, b) => a | [c: Nat] => c;"; "match")]
#[test_case("let r = ret x = f $ y; g x;"; "ret")]
#[test_case("rule (x: Nat) : %core.nat.add (x, 0) when tt => x;"; "rule")]
#[test_case("fun extern puts [%mem.M, Nat] : Nat;"; "extern")]
#[test_case("let s = [n: Nat, «n; I8»] as vec;"; "sigma")]
#[test_case("let c = cn (x: Nat) k = k x;"; "continuation")]
#[test_case("let p = Fn [a: Nat] -> Cn Nat;"; "keyword pi")]
#[test_case("let f = lm x = %core.nat.add (x, 1.5) inj T#0;"; "injection and extraction")]
#[test_case("/// the answer\nlet answer = 42;"; "doc comment")]
#[test_case("let a = ins(t, 0, 'x');"; "insert")]
#[test_case(r#"let s = "say \"hi\"";"#; "string escape")]
#[test_case("cfun [x: Nat] : Nat; ccon [Nat];"; "cfun and ccon")]
#[test_case("let x : Nat = 1;"; "typed binder")]
#[test_case("let u = f @ x ∪ y;"; "explicit application")]
#[test_case("let b = f 1 : Nat;"; "annotated literal")]
#[test_case("lam g Nat @ p = p;"; "filter")]
#[test_case("let e = ⊥ -> ⊤ → λ x = x;"; "glyphs")]
#[test_case("let v = x where end;"; "empty where")]
#[test_case("let z = let q = 1; q;"; "declaration expression")]
#[test_case("let w = [a b: Nat] -> {T: *} -> T;"; "group and implicit pi")]
#[test_case("let k = 1e300 ∪ -0.5 ∪ 0x1.8p1;"; "floats")]
fn test_round_trip(source: &str) {
    assert_round_trip(source);
}

#[test]
fn test_canonical_output() {
    let tree = assert_parse_success("import core;\nlet x = (a,b) → c;\n/// d\nlam f x = x\n");
    assert_eq!(
        tree.to_string(),
        "import core;\n\nlet x = (a, b) -> c;\n/// d\nlam f x = x;\n"
    );
}

#[test]
fn test_printed_output_has_no_new_diagnostics() {
    let source = "let e = f 1 : Nat; lam g Nat @ p = p;";
    let first = parse_source(source);
    let second = parse_source(&first.tree.to_string());
    assert!(!second.has_errors());
    assert_eq!(notes(&first), notes(&second));
}
