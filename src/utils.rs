use crate::NumericField;

/// Parse the raw `value` of a range input for `field`.
///
/// Browsers report range values as decimal strings; fractional values are
/// floored the same way the slider itself steps.
pub fn parse_range_value(input: &str, field: NumericField) -> Result<u32, String> {
    let name = field.label();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", name));
    }
    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| format!("{} must be a valid number", name))?;

    let (min, max) = field.bounds();
    if value < min as f64 {
        return Err(format!("{} must be at least {}", name, min));
    }
    if value > max as f64 {
        return Err(format!("{} cannot exceed {}", name, max));
    }
    Ok(value.floor() as u32)
}

/// Index of `preset` in a select whose first option means "no preset".
pub fn preset_index(presets: &[String], preset: Option<&str>) -> usize {
    preset
        .and_then(|name| presets.iter().position(|p| p == name))
        .map(|pos| pos + 1)
        .unwrap_or(0)
}

/// Inverse of [`preset_index`]; out-of-range indices mean "no preset".
pub fn preset_at(presets: &[String], index: usize) -> Option<String> {
    index
        .checked_sub(1)
        .and_then(|pos| presets.get(pos))
        .cloned()
}

/// Text for the server status line.
pub fn format_port(port: Option<u16>) -> String {
    match port {
        Some(port) => port.to_string(),
        None => "offline".to_string(),
    }
}
