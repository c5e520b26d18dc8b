use crate::commands::{CmdMessage, CmdResult};
use crate::error::SnipzError;

/// Result for a draft that did not pass validation: one message per field.
pub fn rejected(err: SnipzError) -> CmdResult {
    let mut result = CmdResult::default();
    match &err {
        SnipzError::Validation(fields) => {
            for field in fields {
                result.add_message(CmdMessage::error(field.clone()));
            }
        }
        other => result.add_message(CmdMessage::error(other.to_string())),
    }
    result.failure = Some(err);
    result
}

/// Result for a gateway call that failed: a short headline plus the cause.
pub fn failed(headline: &str, err: SnipzError) -> CmdResult {
    tracing::debug!(error = %err, "{}", headline);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::error(headline));
    result.add_message(CmdMessage::info(err.to_string()));
    result.failure = Some(err);
    result
}
