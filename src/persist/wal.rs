use crate::engine::types::SignatureCommand;
use crate::persist::types::PersistResult;

/// Convert a book command into a single-line JSON string
pub fn op_to_json(op: &SignatureCommand) -> PersistResult<String> {
    Ok(serde_json::to_string(op)?)
}

/// Parse one journal line back into a `SignatureCommand`.
pub fn op_from_json(s: &str) -> PersistResult<SignatureCommand> {
    Ok(serde_json::from_str(s)?)
}

/// Parse a newline-delimited journal. Blank lines are skipped.
pub fn read_journal(text: &str) -> PersistResult<Vec<SignatureCommand>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(op_from_json)
        .collect()
}
