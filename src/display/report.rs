//! Report formatting utilities for terminal output

use chrono::NaiveDate;

use crate::models::Money;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Share of `part` in `whole`, in percent
pub fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.to_f64() / whole.to_f64() * 100.0
    }
}

/// Horizontal bar scaled against `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_chars` characters, ending with an ellipsis when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

/// "March 2025"
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// Money amount as a plain two-decimal string, for CSV cells
pub fn csv_amount(amount: Money) -> String {
    format!("{:.2}", amount.round_cents().amount())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(Money::from_units(25), Money::from_units(100)), 25.0);
        assert_eq!(percentage_of(Money::from_units(25), Money::zero()), 0.0);
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Électricité", 20), "Électricité");
        assert_eq!(truncate("Électricité", 6), "Éle...");
        assert_eq!(truncate("abc", 2), "..");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2025, 3), "March 2025");
        assert_eq!(month_label(2025, 13), "2025-13");
    }

    #[test]
    fn test_csv_amount() {
        assert_eq!(csv_amount(Money::from_units(100).divide(3)), "33.33");
        assert_eq!(csv_amount(Money::from_units(12)), "12.00");
    }
}
