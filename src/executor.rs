//! Command Executor
//!
//! Runs one assistant action against a selection: resolves the
//! instruction, calls the completion backend, and reports how the
//! result should be delivered. One request per invocation; every
//! failure is terminal and leaves the selection source untouched.

use crate::actions::{Action, Mode};
use crate::config::Config;
use crate::core::CompletionBackend;
use crate::error::TweakResult;
use crate::selection::Selection;
use tracing::{debug, info, warn};

/// Result of running an action
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Edit mode: the selection should be replaced with this text
    Edited(String),
    /// Inquiry mode: show this text, leave the selection alone
    Message(String),
    /// Nothing selected; nothing was sent
    NoSelection,
    /// Inquire without a question; nothing was sent
    NoQuestion,
}

/// Run `action` against `selection`.
///
/// `question` is only consulted for [`Action::Inquire`]. The empty
/// selection and missing question guards sit before any backend call,
/// so an abandoned invocation never touches the network.
pub async fn run(
    action: Action,
    selection: &Selection,
    question: Option<&str>,
    config: &Config,
    backend: &dyn CompletionBackend,
) -> TweakResult<RunOutcome> {
    if selection.is_empty() {
        info!("No text selected.");
        return Ok(RunOutcome::NoSelection);
    }

    match action.mode() {
        Mode::Edit => {
            let instruction = action.instruction(config, selection.language());
            debug!("PROMPT:\n{}", instruction);

            let response = backend.edit(selection.text(), &instruction).await?;
            debug!("RESPONSE:\n{}", response);

            Ok(RunOutcome::Edited(response))
        }
        Mode::Inquiry => {
            let instruction = match action {
                Action::Inquire => match question {
                    Some(question) if !question.trim().is_empty() => question.to_string(),
                    _ => {
                        warn!("No input provided");
                        return Ok(RunOutcome::NoQuestion);
                    }
                },
                _ => action.instruction(config, selection.language()),
            };

            let prompt = format!("{} \n\n{}", instruction, selection.text());
            debug!("PROMPT:\n{}", prompt);

            let response = backend.complete(&prompt).await?;
            debug!("RESPONSE:\n{}", response);

            Ok(RunOutcome::Message(response))
        }
    }
}
