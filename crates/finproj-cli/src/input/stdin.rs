use serde_json::Value;
use std::io::{self, Read};

/// Read parameters piped on stdin as JSON or YAML.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // JSON is tried first so number formatting survives untouched
    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(trimmed)?,
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_piped_json_and_yaml() {
        let json = parse_piped(r#"{"years": 5}"#).unwrap().unwrap();
        assert_eq!(json["years"], 5);

        let yaml = parse_piped("years: 5\nmonthly_contribution: 100\n").unwrap().unwrap();
        assert_eq!(yaml["years"], 5);
        assert_eq!(yaml["monthly_contribution"], 100);
    }

    #[test]
    fn test_parse_piped_blank_is_none() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }
}
