//! Display formatting for rupee amounts and percentages

/// Format a rupee amount with Indian digit grouping and no paise,
/// e.g. 5000000 -> "₹50,00,000"
pub fn format_rupee(value: f64) -> String {
    let rupees = value.abs().round() as u64;
    let grouped = group_indian(&rupees.to_string());

    if value < 0.0 && rupees > 0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

/// Last three digits form one group, every two digits before that another
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut result = String::new();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.push(',');
    result.push_str(tail);
    result
}

/// Format a percentage given in percent units (8.0 -> "8.0%")
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}
