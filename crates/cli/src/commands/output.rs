//! Terminal output.

use std::fmt::Display;
use std::io::{self, BufRead};

use secrecy::SecretString;

use rk_industry_storefront::error::AppError;
use rk_industry_storefront::views::Notifier;

/// Prints notifications on their own line.
#[derive(Debug, Clone, Copy)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        line(message);
    }
}

#[allow(clippy::print_stdout)]
pub fn line(value: impl Display) {
    println!("{value}");
}

#[allow(clippy::print_stderr)]
pub fn error(message: &str) {
    eprintln!("Error: {message}");
}

/// Use `password` if given, otherwise read one line from stdin.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if stdin cannot be read or is empty.
#[allow(clippy::print_stderr)]
pub fn password_or_prompt(password: Option<String>) -> Result<SecretString, AppError> {
    if let Some(password) = password {
        return Ok(SecretString::from(password));
    }

    eprint!("Password: ");
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| AppError::BadRequest(format!("could not read password: {e}")))?;

    let password = input.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    Ok(SecretString::from(password.to_owned()))
}
