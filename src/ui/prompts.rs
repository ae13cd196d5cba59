//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{PackmuleError, Result};

use super::Confirmation;

/// Convert dialoguer errors to PackmuleError.
fn map_dialoguer_err(e: dialoguer::Error) -> PackmuleError {
    PackmuleError::Io(e.into())
}

/// Ask the user a yes/no question on the given terminal.
pub fn confirm_user(confirmation: &Confirmation, term: &Term) -> Result<bool> {
    Confirm::new()
        .with_prompt(&confirmation.question)
        .default(confirmation.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
