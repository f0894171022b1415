use crate::storage::BASIS_POINTS;

/// Calculate the full repayment obligation for a loan
///
/// Formula: principal + principal × rate
///
/// Example:
/// - principal: 10,000
/// - rate: 7% (700 basis points)
/// - obligation: 10,000 + 700 = 10,700
///
/// Division floors; the interest on tiny principals rounds down.
pub fn calculate_principal_with_interest(principal: i128, rate_bps: u32) -> Option<i128> {
    let interest = principal
        .checked_mul(rate_bps as i128)?
        .checked_div(BASIS_POINTS)?;

    principal.checked_add(interest)
}

/// Calculate a lender's pro-rata claim on the full repayment
///
/// Formula: owed = deposit × principal_with_interest / principal_requested
///
/// Example:
/// - deposit: 1,000 into a 10,000 loan at 7%
/// - owed: 1,000 × 10,700 / 10,000 = 1,070
///
/// Floors, so the sum of all owed amounts never exceeds
/// principal_with_interest.
pub fn calculate_owed_amount(
    deposit_amount: i128,
    principal_with_interest: i128,
    principal_requested: i128,
) -> Option<i128> {
    if principal_requested <= 0 {
        return None;
    }

    deposit_amount
        .checked_mul(principal_with_interest)?
        .checked_div(principal_requested)
}

/// Calculate a lender's share of a partial repayment on a defaulted loan
///
/// Formula: share = deposit × amount_repaid / principal_requested
///
/// Floors, so the sum of all shares never exceeds amount_repaid.
pub fn calculate_default_share(
    deposit_amount: i128,
    amount_repaid: i128,
    principal_requested: i128,
) -> Option<i128> {
    if principal_requested <= 0 {
        return None;
    }

    deposit_amount
        .checked_mul(amount_repaid)?
        .checked_div(principal_requested)
}
