use soroban_sdk::{contracttype, Address};

// Constants
pub const BASIS_POINTS: i128 = 10_000; // 100% = 10,000 basis points
pub const INTEREST_RATE_BPS: u32 = 700; // Flat 7% interest on every loan
pub const TENOR_SECONDS: u64 = 90 * 24 * 60 * 60; // 90-day repayment window

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoanStatus {
    /// Loan requested, no deposits yet
    New = 0,
    /// Some deposits received, below the requested principal
    PartiallyFunded = 1,
    /// Fully funded, borrower owes principal plus interest
    NeedsRepayment = 2,
    /// Borrower repaid in full, lenders can be paid out
    Repaid = 3,
    /// Tenor deadline elapsed before full repayment
    FailedToRepayByDeadline = 4,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Loan {
    /// Unique loan ID (0 is reserved for "not found")
    pub loan_id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Principal the borrower asked for
    pub principal_requested: i128,
    /// Sum of all lender deposits so far
    pub amount_deposited: i128,
    /// Cumulative repayments by the borrower
    pub amount_repaid: i128,
    /// Interest rate in basis points (700 = 7%)
    pub interest_rate_bps: u32,
    /// principal_requested plus interest, fixed at creation
    pub principal_with_interest: i128,
    /// Repayment deadline, set when funding completes (0 until then)
    pub tenor_deadline: u64,
    /// Current loan status
    pub status: LoanStatus,
    /// Escrowed funding released to the borrower (legacy disburse path)
    pub disbursed: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LenderContribution {
    /// Lender address
    pub lender: Address,
    /// Cumulative deposits by this lender into this loan
    pub deposit_amount: i128,
    /// Pro-rata share of principal_with_interest owed back to this lender
    pub owed_amount: i128,
    /// Lender has received their payout
    pub is_repaid: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    LoanCounter,
    Loan(u64),              // Loan ID → Loan
    Lenders(u64),           // Loan ID → Vec<LenderContribution>
    BorrowerLoan(Address),  // Borrower → active loan ID
    BorrowerHistory(Address), // Borrower → count of repaid loans
    Initialized,
    Paused,
}
