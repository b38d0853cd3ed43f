//! Workout text parser
//!
//! Converts the shorthand workout format into structured drafts. The grammar
//! is an explicit set of anchored regular expressions with named capture
//! groups, so a non-matching segment fails loudly instead of being coerced
//! to zero.
//!
//! Format, one entry (entries separated by `;`):
//!
//! ```text
//! #Legs
//! -Back Squat
//! -5 sets X 15 reps
//! -30 kg
//! -10 min
//! ```

use regex::Regex;

use crate::error::CoreError;
use crate::types::WorkoutDraft;

/// Parser for the `;`-separated, newline-segmented workout shorthand.
///
/// Holds pre-compiled segment grammars; reuse one instance across calls.
pub struct WorkoutParser {
    sets_reps: Regex,
    weight: Regex,
    duration: Regex,
}

impl Default for WorkoutParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutParser {
    pub fn new() -> Self {
        // Delimiter literals ("sets", "X", "reps", "kg", "min") are
        // case-sensitive per the format contract.
        Self {
            sets_reps: Regex::new(r"^(?P<sets>\d+)\s*sets\s*X\s*(?P<reps>\d+)\s*reps$")
                .expect("sets/reps grammar"),
            weight: Regex::new(r"^(?P<weight>\d+(?:\.\d+)?)\s*kg$").expect("weight grammar"),
            duration: Regex::new(r"^(?P<duration>\d+(?:\.\d+)?)\s*min$")
                .expect("duration grammar"),
        }
    }

    /// Parse a raw multi-entry blob into ordered drafts.
    ///
    /// All-or-nothing: any malformed entry fails the whole call, so callers
    /// can guarantee no partial batch reaches the store. Whitespace-only
    /// entries are skipped silently (trailing-semicolon tolerance).
    pub fn parse(&self, input: &str) -> Result<Vec<WorkoutDraft>, CoreError> {
        let mut drafts = Vec::new();

        for entry in input.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            drafts.push(self.parse_entry(entry)?);
        }

        Ok(drafts)
    }

    fn parse_entry(&self, entry: &str) -> Result<WorkoutDraft, CoreError> {
        if !entry.starts_with('#') {
            return Err(CoreError::MalformedInput(
                "missing category marker".to_string(),
            ));
        }

        let segments: Vec<&str> = entry.lines().map(str::trim).collect();
        if segments.len() < 5 {
            return Err(CoreError::MalformedInput(
                "incomplete entry: expected category, name, sets/reps, weight, duration"
                    .to_string(),
            ));
        }

        let category = segments[0][1..].trim();
        if category.is_empty() {
            return Err(CoreError::MalformedInput(
                "category name is empty".to_string(),
            ));
        }

        let name = strip_dash(segments[1])?.trim();
        if name.is_empty() {
            return Err(CoreError::MalformedInput(
                "exercise name is empty".to_string(),
            ));
        }

        let (sets, reps) = self.parse_sets_reps(strip_dash(segments[2])?.trim())?;
        let weight = self.parse_weight(strip_dash(segments[3])?.trim())?;
        let duration = self.parse_duration(strip_dash(segments[4])?.trim())?;

        Ok(WorkoutDraft {
            category: category.to_string(),
            name: name.to_string(),
            sets,
            reps,
            weight,
            duration,
        })
    }

    fn parse_sets_reps(&self, segment: &str) -> Result<(u32, u32), CoreError> {
        let caps = self.sets_reps.captures(segment).ok_or_else(|| {
            CoreError::MalformedInput(format!("cannot read sets and reps from \"{segment}\""))
        })?;

        let sets = parse_count(&caps["sets"], "sets")?;
        let reps = parse_count(&caps["reps"], "reps")?;
        Ok((sets, reps))
    }

    fn parse_weight(&self, segment: &str) -> Result<f64, CoreError> {
        let caps = self.weight.captures(segment).ok_or_else(|| {
            CoreError::MalformedInput(format!("cannot read weight in kg from \"{segment}\""))
        })?;
        parse_real(&caps["weight"], "weight")
    }

    fn parse_duration(&self, segment: &str) -> Result<f64, CoreError> {
        let caps = self.duration.captures(segment).ok_or_else(|| {
            CoreError::MalformedInput(format!("cannot read duration in min from \"{segment}\""))
        })?;

        let duration = parse_real(&caps["duration"], "duration")?;
        if duration <= 0.0 {
            return Err(CoreError::MalformedInput(
                "duration must be greater than zero".to_string(),
            ));
        }
        Ok(duration)
    }
}

/// Segments 2 through 5 carry a leading `-` in the format.
fn strip_dash(segment: &str) -> Result<&str, CoreError> {
    segment.strip_prefix('-').ok_or_else(|| {
        CoreError::MalformedInput(format!("segment \"{segment}\" must start with '-'"))
    })
}

fn parse_count(digits: &str, field: &str) -> Result<u32, CoreError> {
    let value: u32 = digits
        .parse()
        .map_err(|_| CoreError::MalformedInput(format!("{field} value \"{digits}\" is not a valid integer")))?;
    if value == 0 {
        return Err(CoreError::MalformedInput(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(value)
}

fn parse_real(digits: &str, field: &str) -> Result<f64, CoreError> {
    digits.parse().map_err(|_| {
        CoreError::MalformedInput(format!("{field} value \"{digits}\" is not a valid number"))
    })
}
