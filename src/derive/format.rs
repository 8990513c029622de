//! Display formatting for derived values.

use crate::process::Cell;

const ORDINALS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Unit column values written by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Count,
    Billions,
    Pounds,
    Millions,
    Plain,
}

impl Unit {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "count" => Unit::Count,
            "£bn" => Unit::Billions,
            "£" => Unit::Pounds,
            "millions" => Unit::Millions,
            _ => Unit::Plain,
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            Unit::Count => format_count(value),
            Unit::Billions => format_bn(value),
            Unit::Pounds => format_gbp(value),
            Unit::Millions => format!("{:.1}m", value),
            Unit::Plain => value.to_string(),
        }
    }

    /// Numbers get the unit's format, text cells pass through untouched.
    pub fn format_cell(self, cell: &Cell) -> String {
        match cell {
            Cell::Number(n) => self.format(*n),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// `+9%` / `-28%` from an already-scaled percentage. Rounds half away from zero.
pub fn signed_percent(pct: f64) -> String {
    let rounded = pct.round() as i64;
    if rounded >= 0 {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

/// Relative error of an estimate against its reference, from their ratio.
pub fn relative_error(ratio: f64) -> String {
    signed_percent((ratio - 1.0) * 100.0)
}

/// Integer with comma thousands separators.
pub fn with_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_count(value: f64) -> String {
    with_thousands(value.round() as i64)
}

pub fn format_bn(value: f64) -> String {
    if value < 0.0 {
        format!("-£{:.2}bn", value.abs())
    } else {
        format!("£{:.2}bn", value)
    }
}

pub fn format_gbp(value: f64) -> String {
    let digits = with_thousands(value.round() as i64);
    match digits.strip_prefix('-') {
        Some(magnitude) => format!("-£{}", magnitude),
        None => format!("£{}", digits),
    }
}

/// Percentage rounded to whole units, no sign.
pub fn percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Percentage with one decimal place, no sign.
pub fn percent_1dp(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `1` → `first` … `10` → `tenth`.
pub fn ordinal(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| ORDINALS.get(i)).copied()
}
