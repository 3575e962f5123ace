mod analyze;
mod config_cmd;
mod food;
mod goals;
mod meal;
mod status;

pub use analyze::AnalyzeCommand;
pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use goals::GoalsCommand;
pub use meal::MealCommand;
pub use status::StatusCommand;

use chrono::{Local, NaiveDate};

/// Parses an optional YYYY-MM-DD argument, defaulting to today.
fn parse_date(date: &Option<String>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d)),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_explicit() {
        let date = parse_date(&Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_default_today() {
        assert_eq!(parse_date(&None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(&Some("01/15/2024".to_string())).is_err());
    }
}
