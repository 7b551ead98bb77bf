use chrono::NaiveDate;

use crate::error::{
  ChecklistError,
  Result
};
use crate::model::NO_DATE;

/// Format accepted from date inputs.
pub const INPUT_DATE_FORMAT: &str =
  "%Y-%m-%d";
/// Format stored on tasks and shown
/// in the task panel.
pub const TASK_DATE_FORMAT: &str =
  "%m/%d/%Y";

/// Turns the raw date field of a new
/// task into the stored `date` value.
///
/// A blank field yields [`NO_DATE`].
/// Anything else must be a calendar
/// date in `YYYY-MM-DD` form.
pub fn format_task_date(
  input: &str
) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Ok(NO_DATE.to_string());
  }

  let date = parse_input_date(trimmed)?;
  Ok(
    date
      .format(TASK_DATE_FORMAT)
      .to_string()
  )
}

pub fn parse_input_date(
  input: &str
) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(
    input.trim(),
    INPUT_DATE_FORMAT
  )
  .map_err(|source| {
    ChecklistError::InvalidDate {
      input: input.to_string(),
      source
    }
  })
}
