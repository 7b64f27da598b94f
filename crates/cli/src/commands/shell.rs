//! Render the page chrome for the current session.

use rk_industry_storefront::views::ViewShell;

use super::output::line;

pub fn render(shell: &ViewShell) {
    line(shell.header());
    line("");
    line(shell.footer());
}
