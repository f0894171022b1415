use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Only the borrower may receive disbursements
    NotBorrower = 10,

    // ============================================
    // LOAN STATE ERRORS (20-29)
    // ============================================
    /// Loan not found
    LoanNotFound = 20,
    /// Invalid loan status for this operation
    InvalidStatus = 21,
    /// Loan already fully funded
    AlreadyFunded = 22,
    /// Loan has not yet been fully funded
    NotFullyFunded = 23,
    /// Loan has already been disbursed
    AlreadyDisbursed = 24,
    /// Borrower already has an active loan
    BorrowerHasActiveLoan = 25,

    // ============================================
    // AMOUNT ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 30,
    /// Amount sent does not equal the declared amount
    AmountMismatch = 31,
    /// Deposit exceeds the loan's remaining unfunded amount
    ExceedsRemainingFunding = 32,
    /// Arithmetic overflow in escrow accounting
    MathOverflow = 33,

    // ============================================
    // DEADLINE ERRORS (40-49)
    // ============================================
    /// Cannot mark defaulted: tenor deadline not yet passed
    DeadlineNotPassed = 40,

    // ============================================
    // OPERATIONAL ERRORS (50-59)
    // ============================================
    /// Contract is paused
    ContractPaused = 50,
}
