//! リテラルの解析

use crate::error::LexerError;

/// 符号と基数プレフィックスを取り除き、(符号, 基数, 数字部分)を返す
fn split_radix(text: &str) -> (&str, u32, &str) {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => ("", &text[1..]),
        Some(b'-') => ("-", &text[1..]),
        _ => ("", text),
    };
    let lower = rest.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0b") => (sign, 2, &rest[2..]),
        Some("0o") => (sign, 8, &rest[2..]),
        Some("0x") => (sign, 16, &rest[2..]),
        _ => (sign, 10, rest),
    }
}

/// 整数リテラルを解析（2進・8進・10進・16進）
pub fn parse_int(text: &str) -> Result<i128, LexerError> {
    let (sign, radix, digits) = split_radix(text);
    i128::from_str_radix(&format!("{}{}", sign, digits), radix)
        .map_err(|_| LexerError::InvalidNumber(text.to_string()))
}

/// 浮動小数点リテラルを解析（有限の値だけを受け付ける）
pub fn parse_float(text: &str) -> Result<f64, LexerError> {
    let (sign, radix, body) = split_radix(text);
    let value = if radix == 16 {
        parse_hex_float(body).ok_or_else(|| LexerError::InvalidNumber(text.to_string()))?
    } else {
        body.parse::<f64>()
            .map_err(|_| LexerError::InvalidNumber(text.to_string()))?
    };
    if !value.is_finite() {
        return Err(LexerError::InvalidNumber(text.to_string()));
    }
    Ok(if sign == "-" { -value } else { value })
}

/// 16進浮動小数点（`1.8p+1`の形、プレフィックスなし）
fn parse_hex_float(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.find(['p', 'P']) {
        Some(idx) => (&body[..idx], body[idx + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };

    let mut value = 0f64;
    let mut fraction_digits = 0i32;
    let mut seen_dot = false;
    for ch in mantissa.chars() {
        if ch == '.' {
            seen_dot = true;
            continue;
        }
        value = value * 16.0 + f64::from(ch.to_digit(16)?);
        if seen_dot {
            fraction_digits += 1;
        }
    }

    let value = value * 2f64.powi(exponent.checked_sub(fraction_digits.checked_mul(4)?)?);
    value.is_finite().then_some(value)
}

/// 文字列リテラルの中身を処理
///
/// `\"`のみを`"`に戻し、それ以外のバックスラッシュ対はそのまま残す。
pub fn unescape_string(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// 文字リテラルの中身（引用符なし）を解析
pub fn unescape_char(body: &str) -> Option<char> {
    let mut chars = body.chars();
    let ch = match chars.next()? {
        '\\' => match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            // それ以外の`\x`は`x`そのもの
            c => c,
        },
        c => c,
    };
    chars.next().is_none().then_some(ch)
}

/// `///`行からドキュメント本文を取り出す
pub fn doc_text(line: &str) -> String {
    line.trim_start_matches("///")
        .trim_start_matches([' ', '\t'])
        .trim_end_matches('\r')
        .to_string()
}
