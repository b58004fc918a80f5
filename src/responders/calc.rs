//! Single binary-operation arithmetic found in a question.

use regex::Regex;
use std::sync::OnceLock;

fn expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)([+\-*/])(\d+)").expect("valid regex"))
}

/// Evaluate the first `a op b` in the question, ignoring spaces.
pub fn calculate(question: &str) -> String {
    let compact = question.replace(' ', "");

    let Some(caps) = expression_regex().captures(&compact) else {
        return "❌ Tôi không tìm thấy phép tính nào trong câu hỏi.".to_string();
    };

    let expression = &caps[0];
    match evaluate(&caps[1], &caps[2], &caps[3]) {
        Some(result) => format!("🧮 Kết quả: {} = {}", expression, result),
        None => "❌ Xin lỗi, tôi không thể tính toán biểu thức này.".to_string(),
    }
}

fn evaluate(lhs: &str, op: &str, rhs: &str) -> Option<String> {
    let a: i64 = lhs.parse().ok()?;
    let b: i64 = rhs.parse().ok()?;

    let value = match op {
        "+" => a.checked_add(b)?.to_string(),
        "-" => a.checked_sub(b)?.to_string(),
        "*" => a.checked_mul(b)?.to_string(),
        "/" => {
            if b == 0 {
                return None;
            }
            let quotient = a as f64 / b as f64;
            format_decimal(quotient)
        }
        _ => return None,
    };
    Some(value)
}

/// Division always yields a decimal: `6/3` is `2.0`, `7/2` is `3.5`.
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations() {
        assert_eq!(calculate("1+1 bằng bao nhiêu"), "🧮 Kết quả: 1+1 = 2");
        assert_eq!(calculate("tính 10 - 25"), "🧮 Kết quả: 10-25 = -15");
        assert_eq!(calculate("7 / 2"), "🧮 Kết quả: 7/2 = 3.5");
        assert_eq!(calculate("6/3"), "🧮 Kết quả: 6/3 = 2.0");
    }

    #[test]
    fn test_only_spaces_are_removed() {
        assert_eq!(calculate("3 *   4"), "🧮 Kết quả: 3*4 = 12");
        // A tab still separates the operands.
        assert_eq!(
            calculate("3\t*4"),
            "❌ Tôi không tìm thấy phép tính nào trong câu hỏi."
        );
    }

    #[test]
    fn test_no_expression() {
        assert_eq!(
            calculate("cộng hai số"),
            "❌ Tôi không tìm thấy phép tính nào trong câu hỏi."
        );
    }

    #[test]
    fn test_invalid_arithmetic() {
        let err = "❌ Xin lỗi, tôi không thể tính toán biểu thức này.";
        assert_eq!(calculate("5/0"), err);
        assert_eq!(calculate("99999999999999999999+1"), err);
        assert_eq!(calculate("9223372036854775807*2"), err);
    }
}
