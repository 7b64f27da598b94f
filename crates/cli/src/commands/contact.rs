//! Portfolio contact form commands.

use rk_industry_storefront::error::AppError;
use rk_industry_storefront::services::contact::CONTACT_SENT_MESSAGE;
use rk_industry_storefront::views::ViewShell;

use super::output::line;

/// # Errors
///
/// Returns `AppError::Contact`; validation errors are reported before any
/// request is made.
pub async fn send(
    shell: &ViewShell,
    name: &str,
    email: &str,
    project: &str,
    message: &str,
) -> Result<(), AppError> {
    shell
        .contact()
        .submit_fields(name, email, project, message)
        .await?;
    line(CONTACT_SENT_MESSAGE);
    Ok(())
}

/// # Errors
///
/// Returns `AppError::Contact` on backend failure.
pub async fn list(shell: &ViewShell) -> Result<(), AppError> {
    let messages = shell.contact().messages().await?;
    for message in &messages {
        let project = if message.project.is_empty() {
            String::new()
        } else {
            format!(" [{}]", message.project)
        };
        line(format_args!(
            "{} <{}>{project}: {}",
            message.name, message.email, message.message
        ));
    }
    Ok(())
}
