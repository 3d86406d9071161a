//! Quiz id argument parsing.

use crate::error::CommandError;
use crate::model::QuizId;

/// Parse the raw id argument of a command.
///
/// Uses leading-prefix parsing: leading whitespace and an optional sign are
/// accepted, then as many digits as follow. Anything after the digits is
/// ignored, so `"7x"` is `7`. Whether the id exists is up to the store.
pub fn parse_id(raw: Option<&str>) -> Result<QuizId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingParameter)?;
    let not_a_number = || CommandError::NotANumber(raw.to_string());

    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(not_a_number());
    }

    let magnitude: QuizId = rest[..digits_len].parse().map_err(|_| not_a_number())?;
    Ok(if negative { -magnitude } else { magnitude })
}
