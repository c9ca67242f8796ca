use airly_core::SelectionRequest;
use anyhow::{Context, Result};
use inquire::{InquireError, Select, Text};

/// The interactive questions the CLI may ask.
///
/// `Ok(None)` means the user cancelled the prompt.
pub trait Prompter {
    fn api_key(&mut self) -> Result<Option<String>>;

    fn choose_installation(&mut self, request: &SelectionRequest) -> Result<Option<usize>>;
}

/// Terminal prompts.
#[derive(Debug, Default)]
pub struct InquirePrompter;

fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

impl Prompter for InquirePrompter {
    fn api_key(&mut self) -> Result<Option<String>> {
        match Text::new("Paste your API key here:").prompt() {
            Ok(key) => Ok(Some(key)),
            Err(err) if cancelled(&err) => Ok(None),
            Err(err) => Err(err).context("Failed to read API key"),
        }
    }

    fn choose_installation(&mut self, request: &SelectionRequest) -> Result<Option<usize>> {
        let answer = Select::new("Choose an installation:", request.labels())
            .with_starting_cursor(request.default_index())
            .raw_prompt();

        match answer {
            Ok(choice) => Ok(Some(choice.index)),
            Err(err) if cancelled(&err) => Ok(None),
            Err(err) => Err(err).context("Failed to read installation choice"),
        }
    }
}
