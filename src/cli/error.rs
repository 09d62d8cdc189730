// Error handling utilities for consistent error messages and exit codes
//
// Internal failures propagate as anyhow errors and are classified in main.

use std::process;
use crate::utils::fuzzy::closest_match;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// A command-line value that is not one of the accepted choices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{input}'.{}", hint(.suggestion, .valid))]
pub struct ParseValueError {
    pub kind: &'static str,
    pub input: String,
    pub suggestion: Option<&'static str>,
    pub valid: Vec<&'static str>,
}

fn hint(suggestion: &Option<&'static str>, valid: &[&'static str]) -> String {
    match suggestion {
        Some(s) => format!(" Did you mean '{}'?", s),
        None => format!(" Valid values: {}", valid.join(", ")),
    }
}

impl ParseValueError {
    pub fn new(kind: &'static str, input: &str, valid: &[&'static str]) -> Self {
        Self {
            kind,
            input: input.to_string(),
            suggestion: closest_match(input, valid, 2),
            valid: valid.to_vec(),
        }
    }
}

/// Validate that an entity ID is valid (positive integer)
pub fn validate_id(id_str: &str, entity: &str) -> Result<i64, String> {
    id_str.trim().parse::<i64>()
        .map_err(|_| format!("Invalid {} ID: '{}'. ID must be a number.", entity, id_str))
        .and_then(|id| {
            if id > 0 {
                Ok(id)
            } else {
                Err(format!("Invalid {} ID: {}. ID must be positive.", entity, id))
            }
        })
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Join trailing search words into a single term; empty means no search
pub fn search_term(words: &[String]) -> Option<String> {
    let term = words.join(" ");
    if validate_non_empty(&term, "Search").is_ok() {
        Some(term.trim().to_string())
    } else {
        None
    }
}
