//! Formatting helpers for presenting metrics.

pub fn format_hours(value: f64) -> String {
    format!("{value:.1}h")
}

pub fn format_hours_precise(value: f64) -> String {
    format!("{value:.2}h")
}

/// Optional hour values render as an em dash when absent.
pub fn format_optional_hours(value: Option<f64>) -> String {
    value.map(format_hours).unwrap_or_else(|| "—".to_string())
}

pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

/// `value` is already on a 0–100 scale.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed impact such as `+0.280` or `-0.150`.
pub fn format_impact(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.3}")
    } else {
        format!("{value:.3}")
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
