/// json api - the request/response wire format consumed by renderers
use loan_schedule_rs::{compute_schedule, LoanRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"{
        "principal": "100000",
        "annualRate": "12",
        "termMonths": 24,
        "paymentType": "DIFFERENTIATED",
        "startDate": "2026-01-01",
        "earlyPayments": [
            {
                "amount": "5000",
                "monthIndex": 6,
                "mode": "REDUCE_PAYMENT",
                "repeat": "QUARTERLY"
            }
        ]
    }"#;

    let req: LoanRequest = serde_json::from_str(json)?;
    let result = compute_schedule(&req)?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
