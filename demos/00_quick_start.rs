/// quick start - minimal schedule computation
use loan_schedule_rs::{compute_schedule, LoanRequest, Money, PaymentType, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 300,000 mortgage at 12% over 10 years
    let req = LoanRequest {
        principal: Money::from_major(300_000),
        annual_rate: Rate::from_percentage(dec!(12)),
        term_months: 120,
        payment_type: PaymentType::Annuity,
        start_date: None,
        early_payments: Vec::new(),
    };

    let result = compute_schedule(&req)?;

    println!("monthly payment: {}", result.schedule[0].payment_total);
    println!("months:          {}", result.summary.actual_months);
    println!("total interest:  {}", result.summary.total_interest);
    println!("total paid:      {}", result.summary.total_paid);

    for row in &result.schedule[..3] {
        println!(
            "month {:>3}  payment {:>10}  principal {:>10}  interest {:>9}  balance {:>12}",
            row.month, row.payment_total, row.principal_portion, row.interest_portion, row.balance_after
        );
    }

    Ok(())
}
