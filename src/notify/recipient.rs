use thiserror::Error;

const MIN_DIGITS: usize = 2;
const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipientError {
    #[error("recipient must start with '+'")]
    MissingPlus,
    #[error("recipient must have between 2 and 15 digits, got {0}")]
    InvalidLength(usize),
    #[error("recipient may only contain digits after '+'")]
    NonDigit,
}

/// Accepts E.164-like addresses: `+` followed by 2 to 15 ASCII digits.
pub fn validate_recipient(recipient: &str) -> Result<(), RecipientError> {
    let Some(digits) = recipient.strip_prefix('+') else {
        return Err(RecipientError::MissingPlus);
    };
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(RecipientError::NonDigit);
    }
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        return Err(RecipientError::InvalidLength(digits.len()));
    }
    Ok(())
}
