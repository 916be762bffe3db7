/// Format a contact number for display, prefixing the area code when present.
/// The backend stores area code ("+91") and number ("9876543210") separately.
pub fn format_phone(area_code: &str, number: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    if area_code.is_empty() {
        digits
    } else {
        format!("{} {}", area_code, digits)
    }
}

/// Format a price with its currency type for display.
/// Currency types are backend-defined strings ("INR", "USD").
pub fn format_price(price: f64, currency_type: &str) -> String {
    let symbol = match currency_type {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        other => return format!("{} {:.0}", other, price),
    };

    if price >= 10_000_000.0 && currency_type == "INR" {
        format!("{}{:.2} Cr", symbol, price / 10_000_000.0)
    } else if price >= 100_000.0 && currency_type == "INR" {
        format!("{}{:.2} L", symbol, price / 100_000.0)
    } else {
        format!("{}{:.0}", symbol, price)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Try to parse YYYY-MM-DD format
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("+91", "9876543210"), "+91 9876543210");
        assert_eq!(format_phone("", "9876543210"), "9876543210");
        assert_eq!(format_phone("+1", "555-123-4567"), "+1 5551234567");
        assert_eq!(format_phone("+91", ""), "");
    }

    #[test]
    fn test_format_price_inr() {
        assert_eq!(format_price(15_000_000.0, "INR"), "₹1.50 Cr");
        assert_eq!(format_price(2_500_000.0, "INR"), "₹25.00 L");
        assert_eq!(format_price(45_000.0, "INR"), "₹45000");
    }

    #[test]
    fn test_format_price_other_currencies() {
        assert_eq!(format_price(250_000.0, "USD"), "$250000");
        assert_eq!(format_price(1_000.0, "AED"), "AED 1000");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-03-15T10:30:00+00:00"), "Mar 15, 2025");
        assert_eq!(format_date("2025-03-15"), "2025-03-15");
        assert_eq!(format_date("TBD"), "TBD");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("Pune".to_string()), "-"), "Pune");
        assert_eq!(format_optional(&None, "-"), "-");
    }
}
