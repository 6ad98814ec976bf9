//! Action Dispatcher
//!
//! Maps user-invoked actions to instruction strings and routing modes.
//! Edit-mode actions rewrite the selection in place, inquiry-mode
//! actions answer about it.

use crate::config::Config;

/// Appended to every edit-mode instruction so the model returns code only
const ONLY_CODE_DIRECTIVE: &str = "Only reply with the output inside one unique code block, \
     and nothing else. Do not write explanations.";

/// Placeholder replaced with the selection's language identifier
const LANG_TOKEN: &str = "{{LANG}}";

/// How the completion result is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Response replaces the selection
    Edit,
    /// Response is shown as a read-only message
    Inquiry,
}

/// A user-invokable assistant action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Optimize,
    Document,
    Analyze,
    Dry,
    Inquire,
}

impl Action {
    /// All actions, in panel order
    pub const ALL: &'static [Action] = &[
        Action::Optimize,
        Action::Document,
        Action::Analyze,
        Action::Dry,
        Action::Inquire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Optimize => "optimize",
            Action::Document => "document",
            Action::Analyze => "analyze",
            Action::Dry => "dry",
            Action::Inquire => "inquire",
        }
    }

    /// One-line description shown by the `actions` listing
    pub fn description(&self) -> &'static str {
        match self {
            Action::Optimize => "Rewrite the selection as optimized code",
            Action::Document => "Add a comment to each line of the selection",
            Action::Analyze => "Explain what the selection does in plain English",
            Action::Dry => "Refactor the selection into concise, DRY code",
            Action::Inquire => "Ask a free-form question about the selection",
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Action::Optimize | Action::Document | Action::Dry => Mode::Edit,
            Action::Analyze | Action::Inquire => Mode::Inquiry,
        }
    }

    fn builtin_template(&self) -> &'static str {
        match self {
            Action::Optimize => {
                "You are a code optimizer that receives {{LANG}} code and outputs \
                 an optimized version of the {{LANG}} code."
            }
            Action::Document => {
                "You are a code documenting tool that receives {{LANG}} code and \
                 outputs the same code with comments in each line."
            }
            Action::Dry => {
                "You are a code optimizer that receives {{LANG}} code and outputs \
                 refactored, concise, and DRY {{LANG}} code."
            }
            Action::Analyze => {
                "You are a code analyzer that receives {{LANG}} code and outputs \
                 a brief explanation of what the code does in plain English"
            }
            // Inquire has no template; the user's question is the instruction
            Action::Inquire => "",
        }
    }

    /// Template after applying any per-action config override
    fn template(&self, config: &Config) -> String {
        let override_prompt = match self {
            Action::Optimize => &config.optimize_prompt,
            Action::Document => &config.document_prompt,
            Action::Analyze => &config.analyze_prompt,
            Action::Dry => &config.dry_prompt,
            Action::Inquire => return String::new(),
        };

        if override_prompt.is_empty() {
            match self.mode() {
                Mode::Edit => format!("{} {}", self.builtin_template(), ONLY_CODE_DIRECTIVE),
                Mode::Inquiry => self.builtin_template().to_string(),
            }
        } else {
            match self.mode() {
                Mode::Edit => format!("{} {}", override_prompt, ONLY_CODE_DIRECTIVE),
                Mode::Inquiry => override_prompt.clone(),
            }
        }
    }

    /// Resolve the final instruction for this action.
    ///
    /// Edit-mode instructions get every `{{LANG}}` token replaced with
    /// the selection's language identifier; inquiry-mode instructions
    /// are used verbatim.
    pub fn instruction(&self, config: &Config, language: &str) -> String {
        let template = self.template(config);
        match self.mode() {
            Mode::Edit => template.replace(LANG_TOKEN, language),
            Mode::Inquiry => template,
        }
    }
}
