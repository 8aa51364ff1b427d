pub mod batches;
pub mod dashboard;
pub mod farm;
pub mod records;
pub mod reports;

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date from the UI layer.
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| format!("Please enter a valid date (YYYY-MM-DD): {}", input))
}

/// Parse a whole-number count typed into a form field. Rejects anything
/// that is not purely digits, matching the numeric-keypad inputs.
pub fn parse_count(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Please enter a valid number".to_string());
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| "Please enter a valid number".to_string())
}

/// Parse a decimal pounds value typed into a form field.
pub fn parse_pounds(input: &str) -> Result<f64, String> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| "Please enter a valid weight in pounds".to_string())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-04").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap()
        );
        assert!(parse_date("02/04/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_count_digits_only() {
        assert_eq!(parse_count("150").unwrap(), 150);
        assert_eq!(parse_count(" 25 ").unwrap(), 25);
        assert!(parse_count("12.5").is_err());
        assert!(parse_count("-3").is_err());
        assert!(parse_count("abc").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn test_parse_pounds() {
        assert_eq!(parse_pounds("22.5").unwrap(), 22.5);
        assert!(parse_pounds("lots").is_err());
    }
}
