//! Shared helpers for command handlers.

use bigctl_api::Response;
use bigctl_core::{Confirm, CoreError, MemberTarget, Outcome, classify};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    ask(message, yes_flag).map_err(|e| CliError::Prompt {
        message: e.to_string(),
    })
}

fn ask(message: &str, yes_flag: bool) -> Result<bool, dialoguer::Error> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
}

/// Asks on the terminal before each removal in a batch.
#[derive(Debug, Clone, Copy)]
pub struct PromptConfirm {
    yes: bool,
}

impl PromptConfirm {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&mut self, target: &MemberTarget<'_>) -> Result<bool, CoreError> {
        let message = format!("Remove {target} from {}?", target.pool_path());
        ask(&message, self.yes).map_err(|e| CoreError::Prompt {
            message: e.to_string(),
        })
    }
}

/// Classify a raw appliance response, print its status line on stderr
/// and its body on stdout.
///
/// Anything classified as a failure becomes `CliError::Request` so the
/// process exits non-zero; conflicts stay warnings.
pub async fn show_response(resp: Response, global: &GlobalOpts) -> Result<(), CliError> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(bigctl_api::Error::from)?;

    match classify(status, &body) {
        Outcome::Failed { status, message } => Err(CliError::Request { status, message }),
        outcome => {
            if !global.quiet {
                let color = output::should_color(global.color);
                eprintln!("{}", output::status_line(&outcome, color));
            }
            output::print_output(&output::render_body(global.output, &body), global.quiet);
            Ok(())
        }
    }
}
