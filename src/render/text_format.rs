//! Case transforms selected by the first character of a format string

/// Apply the case named by the first character of `format`: `u` upper,
/// `w` lower, `t` title. Any other format leaves the value unchanged.
pub fn format_case(value: &str, format: &str) -> String {
    match format.chars().next() {
        Some('u') => value.to_uppercase(),
        Some('w') => value.to_lowercase(),
        Some('t') => title_case(value),
        _ => value.to_string(),
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
