#![no_std]

mod error;
mod events;
mod storage;
mod validation;


use error::Error;
use events::*;
use storage::{
    DataKey, LenderContribution, Loan, LoanStatus, INTEREST_RATE_BPS, TENOR_SECONDS,
};
use validation::{calculate_default_share, calculate_owed_amount, calculate_principal_with_interest};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

#[contract]
pub struct SocialLending;

#[contractimpl]
impl SocialLending {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    pub fn initialize(env: Env, admin: Address, escrow_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &escrow_token);
        env.storage().instance().set(&DataKey::LoanCounter, &0u64);
        env.storage().instance().set(&DataKey::Paused, &false);

        Ok(())
    }

    pub fn pause(env: Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &true);
        Ok(())
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Paused, &false);
        Ok(())
    }

    // ============================================
    // CREATE LOAN
    // ============================================

    pub fn create_loan(
        env: Env,
        borrower: Address,
        principal_requested: i128,
    ) -> Result<u64, Error> {
        Self::check_not_paused(&env)?;

        // Loan ids come from the counter seeded at initialize; allocating
        // before that would let a later initialize reissue id 1.
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if principal_requested <= 0 {
            return Err(Error::InvalidAmount);
        }

        borrower.require_auth();

        let active: u64 = env
            .storage()
            .instance()
            .get(&DataKey::BorrowerLoan(borrower.clone()))
            .unwrap_or(0);
        if active != 0 {
            return Err(Error::BorrowerHasActiveLoan);
        }

        let principal_with_interest =
            calculate_principal_with_interest(principal_requested, INTEREST_RATE_BPS)
                .ok_or(Error::MathOverflow)?;

        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::LoanCounter)
            .unwrap_or(0);
        let loan_id = counter + 1;

        let loan = Loan {
            loan_id,
            borrower: borrower.clone(),
            principal_requested,
            amount_deposited: 0,
            amount_repaid: 0,
            interest_rate_bps: INTEREST_RATE_BPS,
            principal_with_interest,
            tenor_deadline: 0,
            status: LoanStatus::New,
            disbursed: false,
        };

        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);
        env.storage().instance().set(&DataKey::LoanCounter, &loan_id);
        env.storage()
            .instance()
            .set(&DataKey::BorrowerLoan(borrower.clone()), &loan_id);

        env.events().publish(
            (Symbol::new(&env, "loan_requested"), loan_id),
            LoanRequestedEvent {
                loan_id,
                borrower,
                principal_requested,
                principal_with_interest,
            },
        );

        Ok(loan_id)
    }

    // ============================================
    // DEPOSIT TO LOAN
    // ============================================

    pub fn deposit_to_loan(
        env: Env,
        lender: Address,
        loan_id: u64,
        declared_amount: i128,
        paid_value: i128,
    ) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let mut loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::LoanNotFound)?;

        if declared_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if paid_value != declared_amount {
            return Err(Error::AmountMismatch);
        }
        if loan.amount_deposited == loan.principal_requested {
            return Err(Error::AlreadyFunded);
        }
        // The funded transition fires on exact equality, so a deposit may
        // not overshoot the remaining unfunded amount.
        if declared_amount > loan.principal_requested - loan.amount_deposited {
            return Err(Error::ExceedsRemainingFunding);
        }

        lender.require_auth();

        let escrow_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let token_client = token::Client::new(&env, &escrow_token);
        token_client.transfer(&lender, &env.current_contract_address(), &declared_amount);

        // Merge into the lender's existing contribution; one record per address.
        let mut lenders: Vec<LenderContribution> = env
            .storage()
            .instance()
            .get(&DataKey::Lenders(loan_id))
            .unwrap_or(Vec::new(&env));

        let mut merged = false;
        for i in 0..lenders.len() {
            let mut contribution = lenders.get_unchecked(i);
            if contribution.lender == lender {
                contribution.deposit_amount += declared_amount;
                contribution.owed_amount = calculate_owed_amount(
                    contribution.deposit_amount,
                    loan.principal_with_interest,
                    loan.principal_requested,
                )
                .ok_or(Error::MathOverflow)?;
                lenders.set(i, contribution);
                merged = true;
                break;
            }
        }
        if !merged {
            let owed_amount = calculate_owed_amount(
                declared_amount,
                loan.principal_with_interest,
                loan.principal_requested,
            )
            .ok_or(Error::MathOverflow)?;
            lenders.push_back(LenderContribution {
                lender: lender.clone(),
                deposit_amount: declared_amount,
                owed_amount,
                is_repaid: false,
            });
        }
        env.storage()
            .instance()
            .set(&DataKey::Lenders(loan_id), &lenders);

        loan.amount_deposited += declared_amount;
        if loan.amount_deposited < loan.principal_requested {
            loan.status = LoanStatus::PartiallyFunded;
        } else {
            loan.status = LoanStatus::NeedsRepayment;
            loan.tenor_deadline = env.ledger().timestamp() + TENOR_SECONDS;
        }
        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);

        env.events().publish(
            (Symbol::new(&env, "lender_deposit"), loan_id),
            LenderDepositEvent {
                loan_id,
                lender,
                amount: declared_amount,
            },
        );

        if loan.status == LoanStatus::NeedsRepayment {
            env.events().publish(
                (Symbol::new(&env, "loan_funded"), loan_id),
                LoanFundedEvent {
                    loan_id,
                    tenor_deadline: loan.tenor_deadline,
                },
            );
        }

        Ok(())
    }

    // ============================================
    // REPAY LOAN
    // ============================================

    pub fn repay_loan(
        env: Env,
        payer: Address,
        loan_id: u64,
        declared_amount: i128,
        paid_value: i128,
    ) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let mut loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::LoanNotFound)?;

        if loan.status != LoanStatus::NeedsRepayment {
            return Err(Error::InvalidStatus);
        }
        if declared_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if paid_value != declared_amount {
            return Err(Error::AmountMismatch);
        }

        payer.require_auth();

        let escrow_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let token_client = token::Client::new(&env, &escrow_token);
        token_client.transfer(&payer, &env.current_contract_address(), &declared_amount);

        loan.amount_repaid += declared_amount;

        if loan.amount_repaid >= loan.principal_with_interest {
            loan.status = LoanStatus::Repaid;
            env.storage()
                .instance()
                .remove(&DataKey::BorrowerLoan(loan.borrower.clone()));

            let history: u32 = env
                .storage()
                .instance()
                .get(&DataKey::BorrowerHistory(loan.borrower.clone()))
                .unwrap_or(0);
            env.storage()
                .instance()
                .set(&DataKey::BorrowerHistory(loan.borrower.clone()), &(history + 1));
        }

        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);

        if loan.status == LoanStatus::Repaid {
            env.events().publish(
                (Symbol::new(&env, "loan_repaid"), loan_id),
                LoanRepaidEvent { loan_id },
            );
        }

        Ok(())
    }

    // ============================================
    // DISBURSE LOAN (LEGACY ESCROW RELEASE)
    // ============================================

    pub fn disburse_loan(env: Env, caller: Address, loan_id: u64) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let mut loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::LoanNotFound)?;

        caller.require_auth();

        if caller != loan.borrower {
            return Err(Error::NotBorrower);
        }
        if loan.amount_deposited != loan.principal_requested {
            return Err(Error::NotFullyFunded);
        }
        if loan.disbursed {
            return Err(Error::AlreadyDisbursed);
        }
        // A defaulted borrower forfeits the escrowed funding; payout
        // returns it to the lenders instead.
        if loan.status == LoanStatus::FailedToRepayByDeadline {
            return Err(Error::InvalidStatus);
        }

        loan.disbursed = true;
        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);

        let escrow_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let token_client = token::Client::new(&env, &escrow_token);
        token_client.transfer(
            &env.current_contract_address(),
            &loan.borrower,
            &loan.principal_requested,
        );

        env.events().publish(
            (Symbol::new(&env, "loan_disbursed"), loan_id),
            LoanDisbursedEvent {
                loan_id,
                borrower: loan.borrower.clone(),
                amount: loan.principal_requested,
            },
        );

        Ok(())
    }

    // ============================================
    // PAYOUT DEPOSITS WITH INTEREST
    // ============================================

    pub fn payout_deposits_with_interest(env: Env, loan_id: u64) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::LoanNotFound)?;

        if loan.status != LoanStatus::Repaid && loan.status != LoanStatus::FailedToRepayByDeadline {
            return Err(Error::InvalidStatus);
        }

        let escrow_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        let token_client = token::Client::new(&env, &escrow_token);

        let mut lenders: Vec<LenderContribution> = env
            .storage()
            .instance()
            .get(&DataKey::Lenders(loan_id))
            .unwrap_or(Vec::new(&env));

        for i in 0..lenders.len() {
            let mut contribution = lenders.get_unchecked(i);
            if contribution.is_repaid {
                continue;
            }

            let payout = if loan.status == LoanStatus::Repaid {
                contribution.owed_amount
            } else {
                // Defaulted: distribute whatever partial repayment was made,
                // plus the lender's own deposit if it was never disbursed.
                let share = calculate_default_share(
                    contribution.deposit_amount,
                    loan.amount_repaid,
                    loan.principal_requested,
                )
                .ok_or(Error::MathOverflow)?;
                if loan.disbursed {
                    share
                } else {
                    share + contribution.deposit_amount
                }
            };

            // Mark repaid and persist before transferring, so a re-entrant
            // call cannot claim the same contribution twice.
            contribution.is_repaid = true;
            let lender = contribution.lender.clone();
            lenders.set(i, contribution);
            env.storage()
                .instance()
                .set(&DataKey::Lenders(loan_id), &lenders);

            if payout > 0 {
                token_client.transfer(&env.current_contract_address(), &lender, &payout);
            }
        }

        Ok(())
    }

    // ============================================
    // MARK DEFAULTED
    // ============================================

    pub fn mark_defaulted(env: Env, loan_id: u64) -> Result<(), Error> {
        Self::check_not_paused(&env)?;

        let mut loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::LoanNotFound)?;

        if loan.status != LoanStatus::NeedsRepayment {
            return Err(Error::InvalidStatus);
        }

        let current_time = env.ledger().timestamp();
        if current_time <= loan.tenor_deadline {
            return Err(Error::DeadlineNotPassed);
        }

        loan.status = LoanStatus::FailedToRepayByDeadline;
        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);
        env.storage()
            .instance()
            .remove(&DataKey::BorrowerLoan(loan.borrower.clone()));

        env.events().publish(
            (Symbol::new(&env, "loan_defaulted"), loan_id),
            LoanDefaultedEvent {
                loan_id,
                borrower: loan.borrower.clone(),
                amount_repaid: loan.amount_repaid,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn get_loan_details(env: Env, loan_id: u64) -> Option<Loan> {
        env.storage().instance().get(&DataKey::Loan(loan_id))
    }

    pub fn get_lender_details(
        env: Env,
        loan_id: u64,
        lender: Address,
    ) -> Option<LenderContribution> {
        let lenders: Vec<LenderContribution> = env
            .storage()
            .instance()
            .get(&DataKey::Lenders(loan_id))
            .unwrap_or(Vec::new(&env));

        lenders.iter().find(|c| c.lender == lender)
    }

    pub fn get_lenders_for_loan(env: Env, loan_id: u64) -> Vec<LenderContribution> {
        env.storage()
            .instance()
            .get(&DataKey::Lenders(loan_id))
            .unwrap_or(Vec::new(&env))
    }

    pub fn get_borrowers_loan_id(env: Env, borrower: Address) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::BorrowerLoan(borrower))
            .unwrap_or(0)
    }

    pub fn get_previous_loan_count(env: Env, borrower: Address) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::BorrowerHistory(borrower))
            .unwrap_or(0)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_not_paused(env: &Env) -> Result<(), Error> {
        let paused = env
            .storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false);

        if paused {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }
}
