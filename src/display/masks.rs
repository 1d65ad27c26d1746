use crate::display::errors::MaskError;

const CARD_DIGITS: usize = 16;
const ACCOUNT_DIGITS: usize = 20;

fn is_digits(value: &str, length: usize) -> bool {
    value.len() == length && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// `7000792289606361` becomes `7000 79** **** 6361`.
pub fn mask_card_number(number: &str) -> Result<String, MaskError> {
    if !is_digits(number, CARD_DIGITS) {
        return Err(MaskError::InvalidCardNumber);
    }

    Ok(format!("{} {}** **** {}", &number[..4], &number[4..6], &number[12..]))
}

/// `73654108430135874305` becomes `**4305`.
pub fn mask_account_number(number: &str) -> Result<String, MaskError> {
    if !is_digits(number, ACCOUNT_DIGITS) {
        return Err(MaskError::InvalidAccountNumber);
    }

    Ok(format!("**{}", &number[ACCOUNT_DIGITS - 4..]))
}

/// Masks the trailing number of a `"<label> <number>"` string, keeping the label.
pub fn mask_account_card(value: &str) -> Result<String, MaskError> {
    let value = value.trim();
    let (label, number) = match value.rsplit_once(' ') {
        Some((label, number)) => (Some(label.trim_end()), number),
        None => (None, value)
    };

    let masked = if is_digits(number, CARD_DIGITS) {
        mask_card_number(number)?
    } else if is_digits(number, ACCOUNT_DIGITS) {
        mask_account_number(number)?
    } else {
        return Err(MaskError::Unrecognized(value.to_string()));
    };

    Ok(match label {
        Some(label) => format!("{label} {masked}"),
        None => masked
    })
}
