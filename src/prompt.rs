use crate::error::ConjureError;

/// Instruction preamble sent ahead of the player's text. The model is told
/// to answer with a bare list of commands and nothing else.
const PREAMBLE: &str = "You are an expert in writing minecraft commands. \
The user gives you a prompt and you turn it into minecraft commands for \
minecraft the game. Don't give any details or explanation about the code \
you've written, only give the commands. Format it in a list. These commands \
will be chained into command blocks and be executed every tick. Prompt: ";

/// Build the full prompt from user text. Whitespace-only input is rejected
/// before any backend call is made.
pub fn build_prompt(user_text: &str) -> Result<String, ConjureError> {
    let trimmed = user_text.trim();
    if trimmed.is_empty() {
        return Err(ConjureError::EmptyPrompt);
    }
    Ok(format!("{PREAMBLE}{trimmed}. Commands:"))
}
