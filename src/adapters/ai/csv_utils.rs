//! CSV utilities for coach prompts. Uses the `csv` crate for safe serialization.
//!
//! Converts the history window to a compact table suitable for LLM context input.

use crate::domain::DailySummary;

/// Convert daily summaries to a CSV string for LLM context.
///
/// Format: `Date;Total;Goal` (semicolon-delimited for LLM token efficiency), totals in whole mL.
pub fn history_to_csv(history: &[DailySummary]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Date", "Total", "Goal"])?;

    for day in history {
        let total = (day.total.round() as i64).to_string();
        let goal = day.goal.to_string();
        wtr.write_record([day.date.as_str(), total.as_str(), goal.as_str()])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}
