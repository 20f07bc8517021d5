use chrono::{Datelike, Months, NaiveDate};

use crate::early::EarlyPaymentPlan;
use crate::errors::{Result, ScheduleError};
use crate::money::Money;
use crate::payment::PlanState;
use crate::types::{CalcResult, CalcSummary, EarlyPaymentMode, LoanRequest, PaymentType, ScheduleRow};

/// hard cap on simulated months; exhausting it with balance outstanding is
/// a `NonConvergence` error, never a truncated schedule
pub const MAX_MONTHS_GUARD: u32 = 2000;

/// compute the full amortization schedule for one loan request.
///
/// Pure function of its input: identical requests produce bit-identical
/// results, and the savings counterfactual below is just a second call with
/// the early payments cleared.
pub fn compute_schedule(req: &LoanRequest) -> Result<CalcResult> {
    validate(req)?;

    let monthly_rate = req.annual_rate.monthly_rate().as_decimal();
    let plan = EarlyPaymentPlan::build(&req.early_payments, MAX_MONTHS_GUARD);

    let mut balance = req.principal;
    let mut state = PlanState::plan(req.payment_type, balance, monthly_rate, req.term_months);

    let mut schedule: Vec<ScheduleRow> = Vec::new();
    let mut total_paid = Money::ZERO;
    let mut total_interest = Money::ZERO;
    let mut total_early = Money::ZERO;

    for month in 1..=MAX_MONTHS_GUARD {
        if balance.is_zero() {
            break;
        }

        let balance_before = balance;
        let interest = balance_before.mul_rate(monthly_rate);

        let (payment_total, principal_portion) = match req.payment_type {
            PaymentType::Annuity => {
                let mut payment = state.fixed_charge;
                // rounding can leave a zero fixed payment on tiny balances;
                // fall back to an even split over the months left
                if !payment.is_positive() {
                    payment = balance_before.min(balance_before.div_round(state.remaining_months));
                }
                let mut principal = (payment - interest).max(Money::ZERO);
                // terminal month: never overshoot the balance
                if principal > balance_before {
                    principal = balance_before;
                    payment = interest + principal;
                }
                (payment, principal)
            }
            PaymentType::Differentiated => {
                let principal = balance_before.min(state.fixed_charge.max(Money::CENT));
                (interest + principal, principal)
            }
        };

        balance = (balance - principal_portion).max(Money::ZERO);

        // prepayments apply after the scheduled payment, sequentially,
        // each capped at the remaining balance
        let mut early_paid = Money::ZERO;
        let mut reduce_payment_applied = false;
        for item in plan.contributions_for(month) {
            if balance.is_zero() {
                break;
            }
            let applied = balance.min(item.amount.max(Money::ZERO));
            if !applied.is_positive() {
                continue;
            }
            balance -= applied;
            early_paid += applied;
            match item.mode {
                // any REDUCE_PAYMENT in the month wins the re-plan,
                // regardless of application order
                EarlyPaymentMode::ReducePayment => reduce_payment_applied = true,
                // payment stays fixed; the term shortens on its own
                EarlyPaymentMode::ReduceTerm => {}
            }
        }

        schedule.push(ScheduleRow {
            month,
            date_label: date_label(req.start_date, month),
            payment_total,
            principal_portion,
            interest_portion: interest,
            early_payment: early_paid,
            balance_before,
            balance_after: balance,
        });

        total_paid += payment_total + early_paid;
        total_interest += interest;
        total_early += early_paid;

        if balance.is_zero() {
            break;
        }

        state.complete_month(req.payment_type, balance, monthly_rate, reduce_payment_applied);
    }

    if schedule.len() as u32 >= MAX_MONTHS_GUARD && balance.is_positive() {
        return Err(ScheduleError::NonConvergence {
            months: MAX_MONTHS_GUARD,
            balance,
        });
    }

    let (saved_interest, interest_without_early) = if total_early.is_positive() {
        counterfactual_savings(req, total_interest)
    } else {
        (None, None)
    };

    let summary = CalcSummary {
        total_paid,
        total_interest,
        total_early_payments: total_early,
        actual_months: schedule.len() as u32,
        saved_interest,
        interest_without_early,
    };

    Ok(CalcResult { summary, schedule })
}

/// interest the same loan would cost with no prepayments, derived by a second
/// run of the engine rather than a stored baseline
fn counterfactual_savings(req: &LoanRequest, total_interest: Money) -> (Option<Money>, Option<Money>) {
    let baseline = LoanRequest {
        early_payments: Vec::new(),
        ..req.clone()
    };
    match compute_schedule(&baseline) {
        Ok(result) => {
            let without = result.summary.total_interest;
            let saved = (without - total_interest).max(Money::ZERO);
            (Some(saved), Some(without))
        }
        // if the baseline itself fails, savings are simply not reported
        Err(_) => (None, None),
    }
}

/// defensive re-checks; upstream validation owns the user-facing messages
fn validate(req: &LoanRequest) -> Result<()> {
    if !req.principal.is_positive() {
        return Err(ScheduleError::InvalidPrincipal {
            amount: req.principal,
        });
    }
    if req.annual_rate.is_negative() {
        return Err(ScheduleError::NegativeRate {
            rate: req.annual_rate,
        });
    }
    if req.term_months == 0 {
        return Err(ScheduleError::ZeroTerm);
    }
    for (index, spec) in req.early_payments.iter().enumerate() {
        if !spec.amount.is_positive() {
            return Err(ScheduleError::InvalidEarlyPayment {
                index,
                reason: "amount must be positive".to_string(),
            });
        }
        if spec.month_index == 0 {
            return Err(ScheduleError::InvalidEarlyPayment {
                index,
                reason: "month index starts at 1".to_string(),
            });
        }
    }
    Ok(())
}

/// `MM.yyyy` label for the given 1-indexed month; purely cosmetic
fn date_label(start_date: Option<NaiveDate>, month: u32) -> Option<String> {
    let start = start_date?;
    let date = start.checked_add_months(Months::new(month - 1))?;
    Some(format!("{:02}.{}", date.month(), date.year()))
}
