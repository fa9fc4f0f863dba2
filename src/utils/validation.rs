//! Validation utilities

use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode, ToPrimitive};
use std::str::FromStr;

use crate::traits::*;
use crate::types::*;

/// Longest PIX key format (an e-mail address) allowed by the payment system
pub const MAX_PIX_KEY_LEN: usize = 77;

/// Parse an amount typed by a user.
///
/// Accepts `.` or `,` as the decimal separator ("12,50" and "12.50" are the
/// same amount). The text is parsed exactly before conversion to `f64`.
pub fn parse_amount(input: &str) -> SplitResult<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(SplitError::InvalidAmount(
            "Amount cannot be empty".to_string(),
        ));
    }

    let decimal = BigDecimal::from_str(&normalized)
        .map_err(|_| SplitError::InvalidAmount(format!("'{}' is not a number", input.trim())))?;

    if decimal <= BigDecimal::from(0) {
        return Err(SplitError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }

    let out_of_range = || SplitError::InvalidAmount(format!("'{}' is out of range", input.trim()));
    let amount = decimal.to_f64().ok_or_else(out_of_range)?;
    // Positive decimals that overflow or underflow f64
    if !amount.is_finite() || amount <= 0.0 {
        return Err(out_of_range());
    }
    Ok(amount)
}

/// Round an amount to cents, half away from zero
pub fn round_to_cents(amount: f64) -> f64 {
    BigDecimal::from_f64(amount)
        .map(|d| d.with_scale_round(2, RoundingMode::HalfUp))
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Validate that an amount is a positive, finite number
pub fn validate_positive_amount(amount: f64) -> SplitResult<()> {
    if !amount.is_finite() {
        return Err(SplitError::InvalidAmount(
            "Amount must be a finite number".to_string(),
        ));
    }

    if amount <= 0.0 {
        Err(SplitError::InvalidAmount(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a participant name is valid
pub fn validate_participant_name(name: &str) -> SplitResult<()> {
    if name.trim().is_empty() {
        return Err(SplitError::Validation(
            "Participant name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 100 {
        return Err(SplitError::Validation(
            "Participant name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a PIX key is valid
pub fn validate_pix_key(pix_key: &str) -> SplitResult<()> {
    if pix_key.chars().count() > MAX_PIX_KEY_LEN {
        return Err(SplitError::Validation(format!(
            "PIX key cannot exceed {} characters",
            MAX_PIX_KEY_LEN
        )));
    }

    if pix_key.chars().any(char::is_whitespace) {
        return Err(SplitError::Validation(
            "PIX key cannot contain whitespace".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an expense description is valid
pub fn validate_expense_description(description: &str) -> SplitResult<()> {
    if description.chars().count() > 500 {
        return Err(SplitError::Validation(
            "Expense description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced participant validator with length and format checks
pub struct EnhancedParticipantValidator;

impl ParticipantValidator for EnhancedParticipantValidator {
    fn validate_participant(&self, participant: &Participant) -> SplitResult<()> {
        DefaultParticipantValidator.validate_participant(participant)?;
        validate_participant_name(&participant.name)?;

        if let Some(ref pix_key) = participant.pix_key {
            validate_pix_key(pix_key)?;
        }

        Ok(())
    }
}

/// Enhanced expense validator with description checks
pub struct EnhancedExpenseValidator;

impl ExpenseValidator for EnhancedExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SplitResult<()> {
        DefaultExpenseValidator.validate_expense(expense)?;
        validate_expense_description(&expense.description)
    }
}
