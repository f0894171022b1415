use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanRequestedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub principal_requested: i128,
    pub principal_with_interest: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LenderDepositEvent {
    pub loan_id: u64,
    pub lender: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanFundedEvent {
    pub loan_id: u64,
    pub tenor_deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanRepaidEvent {
    pub loan_id: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanDisbursedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanDefaultedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount_repaid: i128,
}
