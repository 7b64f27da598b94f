//! Session commands: status, whoami, login, register, logout.

use rk_industry_storefront::error::AppError;
use rk_industry_storefront::services::SessionStore;
use rk_industry_storefront::views::ViewShell;

use super::output::{self, line};

/// Check the backend answers and show who is signed in.
///
/// # Errors
///
/// Returns `AppError::Api` if the backend cannot be reached.
pub async fn status(shell: &ViewShell) -> Result<(), AppError> {
    let banner = shell.session().api().root().await?;
    line(format_args!("Backend: {}", banner.message));
    whoami(shell);
    Ok(())
}

pub fn whoami(shell: &ViewShell) {
    let session = shell.session().current();
    match session.identity() {
        Some(user) => {
            line(format_args!("{} <{}>", user.full_name, user.email));
            line(format_args!("id: {}", user.id));
            if let Some(phone) = &user.phone {
                line(format_args!("phone: {phone}"));
            }
            if let Some(address) = &user.address {
                line(format_args!("address: {address}"));
            }
        }
        None => line("Not logged in"),
    }
}

/// # Errors
///
/// Returns `AppError::Form` with "Invalid email or password" on any failure.
pub async fn login(
    shell: &ViewShell,
    email: &str,
    password: Option<String>,
) -> Result<(), AppError> {
    let password = output::password_or_prompt(password)?;
    let user = shell.auth().login(email, &password).await?;
    line(user.greeting());
    Ok(())
}

/// # Errors
///
/// Returns `AppError::Form` carrying the backend's message, if any.
pub async fn register(
    shell: &ViewShell,
    email: &str,
    password: Option<String>,
    full_name: &str,
    phone: &str,
    address: &str,
) -> Result<(), AppError> {
    let password = output::password_or_prompt(password)?;
    let user = shell
        .auth()
        .register_fields(email, password, full_name, phone, address)
        .await?;
    line(format_args!("Account created. {}", user.greeting()));
    Ok(())
}

/// Offline; the session is not restored first.
pub fn logout(session: &SessionStore) {
    session.logout();
    line("Logged out");
}
