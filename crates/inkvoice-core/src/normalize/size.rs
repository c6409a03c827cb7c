//! Size canonicalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FRACTION: Regex = Regex::new(r"(\d+)/(\d+)").unwrap();

    static ref OUNCE: Regex = Regex::new(r"^([\d.]+)(?:ounces?|oz\.?)?$").unwrap();

    static ref CANONICAL_OUNCE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)oz$").unwrap();
}

/// Canonicalize a raw size to `"<number>oz"`.
///
/// Rules, first match wins:
/// 1. anything mentioning `mm` is a hardware size and passes through;
/// 2. a fraction `a/b` becomes its decimal value in ounces;
/// 3. a number with an optional `oz`, `oz.`, `ounce` or `ounces` unit;
/// 4. a bare number is taken as ounces;
/// 5. anything else passes through unchanged.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize_size(raw: &str) -> String {
    let trimmed = raw.trim();
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if compact.is_empty() {
        return String::new();
    }

    if compact.contains("mm") {
        return trimmed.to_string();
    }

    if let Some(caps) = FRACTION.captures(&compact) {
        if let (Ok(numerator), Ok(denominator)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            if denominator != 0.0 {
                return format!("{}oz", numerator / denominator);
            }
        }
    }

    if let Some(magnitude) = OUNCE
        .captures(&compact)
        .and_then(|caps| parse_magnitude(&caps[1]))
    {
        return format!("{}oz", magnitude);
    }

    if let Some(magnitude) = parse_magnitude(&compact) {
        return format!("{}oz", magnitude);
    }

    trimmed.to_string()
}

/// Render a canonical ounce size with a space before the unit (`"1 oz"`).
///
/// Sizes that are not canonical ounce values come back unchanged.
pub fn spaced_size(canonical: &str) -> String {
    match CANONICAL_OUNCE.captures(canonical) {
        Some(caps) => format!("{} oz", &caps[1]),
        None => canonical.to_string(),
    }
}

fn parse_magnitude(s: &str) -> Option<f64> {
    if !s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_ounce_spellings() {
        assert_eq!(normalize_size("1 ounce"), "1oz");
        assert_eq!(normalize_size("2 Ounces"), "2oz");
        assert_eq!(normalize_size("4 Oz."), "4oz");
        assert_eq!(normalize_size("1.5oz"), "1.5oz");
        assert_eq!(normalize_size("8"), "8oz");
        assert_eq!(normalize_size("01.50 oz"), "1.5oz");
    }

    #[test]
    fn test_normalize_fractions() {
        assert_eq!(normalize_size("1/2oz"), "0.5oz");
        assert_eq!(normalize_size("1/2 ounce"), "0.5oz");
        assert_eq!(normalize_size("1/4"), "0.25oz");
        assert_eq!(normalize_size("1/0 oz"), "1/0 oz");
    }

    #[test]
    fn test_normalize_pass_through() {
        assert_eq!(normalize_size("30mm"), "30mm");
        assert_eq!(normalize_size("16 MM"), "16 MM");
        assert_eq!(normalize_size("garbage"), "garbage");
        assert_eq!(normalize_size("ounce"), "ounce");
        assert_eq!(normalize_size("nan"), "nan");
        assert_eq!(normalize_size("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let corpus = [
            "1 ounce", "1/2oz", "4 Oz.", "30mm", "garbage", "1/3 oz", "12", "0.5 oz", "",
            "1.2.3 oz", "Size: 1oz",
        ];
        for raw in corpus {
            let once = normalize_size(raw);
            assert_eq!(normalize_size(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_spaced_size() {
        assert_eq!(spaced_size("1oz"), "1 oz");
        assert_eq!(spaced_size("0.5oz"), "0.5 oz");
        assert_eq!(spaced_size("30mm"), "30mm");
        assert_eq!(normalize_size(&spaced_size("4oz")), "4oz");
    }
}
