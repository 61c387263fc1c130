//! Width-driven word wrapping

use crate::linebreak::find_break_points;
use std::convert::Infallible;

/// Wrap text to `max_width` using `measure` to size candidate lines
///
/// Explicit `\n` always starts a new line and blank lines are preserved.
/// A single unbreakable run wider than `max_width` is split between
/// characters. Trailing whitespace is dropped at every break.
///
/// # Arguments
/// * `text` - Text to wrap
/// * `max_width` - Available width, in the unit returned by `measure`
/// * `measure` - Width of a string
pub fn wrap_text<F>(text: &str, max_width: f64, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    match try_wrap_text(text, max_width, |s| Ok::<f64, Infallible>(measure(s))) {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`wrap_text`] for measures that can fail
pub fn try_wrap_text<F, E>(text: &str, max_width: f64, mut measure: F) -> Result<Vec<String>, E>
where
    F: FnMut(&str) -> Result<f64, E>,
{
    let mut lines = Vec::new();

    for paragraph_line in text.split('\n') {
        let paragraph_line = paragraph_line.trim_end_matches('\r');
        if paragraph_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        wrap_line(paragraph_line, max_width, &mut measure, &mut lines)?;
    }

    Ok(lines)
}

/// Wrap a single line (no explicit breaks) into `lines`
fn wrap_line<F, E>(
    line: &str,
    max_width: f64,
    measure: &mut F,
    lines: &mut Vec<String>,
) -> Result<(), E>
where
    F: FnMut(&str) -> Result<f64, E>,
{
    let chars: Vec<char> = line.chars().collect();
    let breaks = find_break_points(line);

    let mut current = String::new();

    for window in breaks.windows(2) {
        let unit: String = chars[window[0]..window[1]].iter().collect();

        let mut candidate = current.clone();
        candidate.push_str(&unit);
        if measure(candidate.trim_end())? <= max_width {
            current = candidate;
            continue;
        }

        if !current.trim().is_empty() {
            lines.push(current.trim_end().to_string());
        }
        current = String::new();

        let unit = unit.trim_start();
        if measure(unit.trim_end())? <= max_width {
            current.push_str(unit);
            continue;
        }

        // Unit is wider than a whole line on its own
        for c in unit.chars() {
            let mut candidate = current.clone();
            candidate.push(c);
            if current.is_empty() || measure(candidate.trim_end())? <= max_width {
                current = candidate;
            } else {
                lines.push(current.trim_end().to_string());
                current = c.to_string();
            }
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }

    Ok(())
}
