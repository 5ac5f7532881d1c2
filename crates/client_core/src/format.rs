const RUPEE: char = '₹';

/// Renders an amount the way the prediction service does: rupee sign,
/// comma-grouped thousands, two decimals (`₹1,234,567.89`).
pub fn format_inr(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.')?;
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    Some(format!("{RUPEE}{sign}{}.{cents}", group_thousands(whole)))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::format_inr;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(format_inr(1_200_000.0).as_deref(), Some("₹1,200,000.00"));
        assert_eq!(format_inr(987_654_321.5).as_deref(), Some("₹987,654,321.50"));
        assert_eq!(format_inr(999.999).as_deref(), Some("₹1,000.00"));
        assert_eq!(format_inr(12.5).as_deref(), Some("₹12.50"));
        assert_eq!(format_inr(0.0).as_deref(), Some("₹0.00"));
    }

    #[test]
    fn keeps_sign_of_negative_amounts() {
        assert_eq!(format_inr(-4_500.0).as_deref(), Some("₹-4,500.00"));
        assert_eq!(format_inr(-0.001).as_deref(), Some("₹0.00"));
    }

    #[test]
    fn refuses_non_finite_amounts() {
        assert_eq!(format_inr(f64::NAN), None);
        assert_eq!(format_inr(f64::INFINITY), None);
    }
}
