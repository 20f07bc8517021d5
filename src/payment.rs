use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::PaymentType;

/// fixed annuity payment: P * r * (1+r)^n / ((1+r)^n - 1), rounded to the
/// minor unit; P / n when the rate is zero
pub fn annuity_payment(balance: Money, monthly_rate: Decimal, months: u32) -> Money {
    if months == 0 {
        return Money::ZERO;
    }
    if monthly_rate.is_zero() {
        return balance.div_round(months);
    }

    // (1 + r)^n by repeated multiplication, everything stays in Decimal
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound *= base;
    }

    let factor = monthly_rate * compound / (compound - Decimal::ONE);
    balance.mul_rate(factor)
}

/// fixed principal share for differentiated plans: floor(balance / months)
pub fn principal_share(balance: Money, months: u32) -> Money {
    balance.div_floor(months)
}

/// planning state threaded through the simulation, one update per month.
///
/// `fixed_charge` is the annuity payment for annuity loans and the principal
/// share for differentiated loans; it only changes when a REDUCE_PAYMENT
/// prepayment forces a re-plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanState {
    pub remaining_months: u32,
    pub fixed_charge: Money,
}

impl PlanState {
    pub fn plan(
        payment_type: PaymentType,
        balance: Money,
        monthly_rate: Decimal,
        term_months: u32,
    ) -> Self {
        let remaining_months = term_months.max(1);
        let fixed_charge = fixed_charge_for(payment_type, balance, monthly_rate, remaining_months);
        PlanState {
            remaining_months,
            fixed_charge,
        }
    }

    /// close out a month: decrement the planned horizon (clamped to 1 while
    /// balance is outstanding, so the loan keeps progressing to payoff) and,
    /// if a REDUCE_PAYMENT prepayment applied this month, recompute the fixed
    /// charge against the new balance. REDUCE_TERM takes no action here; the
    /// unchanged charge depletes the lower balance faster on its own.
    pub fn complete_month(
        &mut self,
        payment_type: PaymentType,
        balance: Money,
        monthly_rate: Decimal,
        reduce_payment_applied: bool,
    ) {
        self.remaining_months = self.remaining_months.saturating_sub(1).max(1);
        if reduce_payment_applied {
            self.fixed_charge =
                fixed_charge_for(payment_type, balance, monthly_rate, self.remaining_months);
        }
    }
}

fn fixed_charge_for(
    payment_type: PaymentType,
    balance: Money,
    monthly_rate: Decimal,
    months: u32,
) -> Money {
    match payment_type {
        PaymentType::Annuity => annuity_payment(balance, monthly_rate, months),
        PaymentType::Differentiated => principal_share(balance, months),
    }
}
