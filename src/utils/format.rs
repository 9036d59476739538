// ============================================================================
// FORMAT - Helpers de presentación (moneda, hashes, escape)
// ============================================================================

/// Formatear un total en USD con dos decimales y separador de miles.
pub fn money_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }

    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    // Separador de miles manual (sin locale en WASM)
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Truncar un hash largo para mostrarlo en tablas: 10 primeros + 8 últimos.
/// Se corta por chars, no por bytes: el hash viene del backend y no hay
/// garantía de que sea ASCII puro.
pub fn trunc_hash(hash: &str) -> String {
    if hash.is_empty() {
        return "—".to_string();
    }
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 18 {
        return hash.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Escapar texto que se interpola en HTML generado con format!
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_with_thousands_separator() {
        assert_eq!(money_usd(4500.0), "$4,500.00");
        assert_eq!(money_usd(120.5), "$120.50");
        assert_eq!(money_usd(0.0), "$0.00");
        assert_eq!(money_usd(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn money_handles_non_finite() {
        assert_eq!(money_usd(f64::NAN), "$0.00");
    }

    #[test]
    fn hash_truncation() {
        assert_eq!(trunc_hash(""), "—");
        assert_eq!(trunc_hash("INIT_HASH"), "INIT_HASH");
        let long = "abcdef0123456789abcdef0123456789";
        assert_eq!(trunc_hash(long), "abcdef0123...23456789");
    }

    #[test]
    fn hash_truncation_handles_non_ascii() {
        // Un char multi-byte cayendo justo en el corte no debe romper
        let hash = "ABCDEFGHI\u{00e9}0123456789XYZ";
        assert_eq!(trunc_hash(hash), "ABCDEFGHIé...56789XYZ");

        let accented = "ñÑéÉáÁíÍóÓúÚ0123456789";
        let short = trunc_hash(accented);
        assert!(short.starts_with("ñÑéÉáÁíÍóÓ"));
        assert!(short.ends_with("23456789"));
    }

    #[test]
    fn html_escape_covers_special_chars() {
        assert_eq!(
            escape_html("<b>\"A&B\"</b>'"),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;"
        );
    }
}
