use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref VARIABLE_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

pub fn validate_path_exists(path: &str) -> Result<String, String> {
    if Path::new(path).exists() {
        Ok(path.to_string())
    } else {
        Err(format!("Path does not exist: {path}"))
    }
}

/// Checks `NAME=VALUE`, where NAME is usable inside `{{...}}`.
pub fn validate_variable(variable: &str) -> Result<String, String> {
    parse_variable(variable).map(|_| variable.to_string())
}

pub fn parse_variable(variable: &str) -> Result<(String, String), String> {
    let (name, value) = variable
        .split_once('=')
        .ok_or_else(|| "Variable must be in format NAME=VALUE".to_string())?;

    if !VARIABLE_NAME_REGEX.is_match(name) {
        return Err(format!(
            "Invalid variable name '{name}': use letters, digits and underscores"
        ));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn validate_limit(limit: &str) -> Result<usize, String> {
    match limit.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Limit must be a positive integer".to_string()),
    }
}
