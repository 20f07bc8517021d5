/// early payments - compare REDUCE_TERM against REDUCE_PAYMENT
use loan_schedule_rs::{
    compute_schedule, EarlyPaymentMode, EarlyPaymentRepeat, EarlyPaymentSpec, LoanRequest, Money,
    PaymentType, Rate, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = LoanRequest {
        principal: Money::from_major(300_000),
        annual_rate: Rate::from_percentage(dec!(12)),
        term_months: 120,
        payment_type: PaymentType::Annuity,
        start_date: None,
        early_payments: Vec::new(),
    };

    for mode in [EarlyPaymentMode::ReduceTerm, EarlyPaymentMode::ReducePayment] {
        let mut req = base.clone();
        req.early_payments = vec![EarlyPaymentSpec {
            id: Uuid::new_v4(),
            amount: Money::from_major(10_000),
            month_index: 6,
            mode,
            repeat: EarlyPaymentRepeat::Quarterly,
        }];

        let result = compute_schedule(&req)?;
        println!("{mode:?}:");
        println!("  months:         {}", result.summary.actual_months);
        println!("  total interest: {}", result.summary.total_interest);
        if let Some(saved) = result.summary.saved_interest {
            println!("  interest saved: {saved}");
        }
    }

    Ok(())
}
