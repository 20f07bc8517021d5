use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::{Money, Rate};

/// payment structure of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// fixed total monthly payment amortizing principal and interest
    Annuity,
    /// fixed principal portion per month, declining interest on top
    Differentiated,
}

/// effect of an early payment on the remaining plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarlyPaymentMode {
    /// keep the payment amount, shorten the payoff horizon
    ReduceTerm,
    /// keep the term, lower the recurring payment
    ReducePayment,
}

/// occurrence pattern of an early payment, starting at its month index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarlyPaymentRepeat {
    #[default]
    Once,
    Monthly,
    Quarterly,
    /// every month from the start index until the loan is paid off;
    /// termination is implicit, the balance reaching zero ends it
    UntilEnd,
}

/// one early payment (prepayment) instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPaymentSpec {
    /// caller correlation only, never affects arithmetic
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// amount per occurrence, applied against principal
    pub amount: Money,
    /// first month this prepayment applies; 1 = first scheduled payment
    pub month_index: u32,
    pub mode: EarlyPaymentMode,
    #[serde(default)]
    pub repeat: EarlyPaymentRepeat,
}

/// validated input for one schedule computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub payment_type: PaymentType,
    /// used only to derive display labels, never affects arithmetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub early_payments: Vec<EarlyPaymentSpec>,
}

/// one simulated month, 1-indexed, immutable once produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub month: u32,
    /// `MM.yyyy` label derived from the request start date, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_label: Option<String>,
    pub payment_total: Money,
    #[serde(rename = "principal")]
    pub principal_portion: Money,
    #[serde(rename = "interest")]
    pub interest_portion: Money,
    pub early_payment: Money,
    pub balance_before: Money,
    pub balance_after: Money,
}

/// aggregate totals over the whole schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcSummary {
    /// includes early payments
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_early_payments: Money,
    pub actual_months: u32,
    /// present only when early payments had an amortizing effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_interest: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_without_early: Option<Money>,
}

/// complete result of one engine invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResult {
    pub summary: CalcSummary,
    pub schedule: Vec<ScheduleRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_wire_format() {
        let json = r#"{
            "principal": "300000",
            "annualRate": "12.5",
            "termMonths": 120,
            "paymentType": "ANNUITY",
            "startDate": "2024-01-15",
            "earlyPayments": [
                {
                    "id": "a9e18a9f-7f3f-43c5-9d4f-0d4a8c3f0d10",
                    "amount": "50000",
                    "monthIndex": 6,
                    "mode": "REDUCE_TERM"
                }
            ]
        }"#;

        let req: LoanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.principal, Money::from_major(300_000));
        assert_eq!(req.payment_type, PaymentType::Annuity);
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        // repeat defaults to ONCE when absent
        assert_eq!(req.early_payments[0].repeat, EarlyPaymentRepeat::Once);
        assert_eq!(req.early_payments[0].mode, EarlyPaymentMode::ReduceTerm);
    }

    #[test]
    fn test_request_minimal() {
        let json = r#"{
            "principal": "1200",
            "annualRate": "0",
            "termMonths": 12,
            "paymentType": "DIFFERENTIATED"
        }"#;

        let req: LoanRequest = serde_json::from_str(json).unwrap();
        assert!(req.early_payments.is_empty());
        assert_eq!(req.start_date, None);
        assert!(req.annual_rate.is_zero());
    }

    #[test]
    fn test_request_round_trip() {
        let req = LoanRequest {
            principal: Money::from_major(100_000),
            annual_rate: Rate::from_percentage(rust_decimal_macros::dec!(9.5)),
            term_months: 60,
            payment_type: PaymentType::Annuity,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
            early_payments: vec![EarlyPaymentSpec {
                id: Uuid::new_v4(),
                amount: Money::from_major(2_500),
                month_index: 4,
                mode: EarlyPaymentMode::ReducePayment,
                repeat: EarlyPaymentRepeat::Monthly,
            }],
        };

        let json = serde_json::to_string(&req).unwrap();
        let back: LoanRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&EarlyPaymentRepeat::UntilEnd).unwrap(),
            "\"UNTIL_END\""
        );
        assert_eq!(
            serde_json::to_string(&EarlyPaymentMode::ReducePayment).unwrap(),
            "\"REDUCE_PAYMENT\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentType::Differentiated).unwrap(),
            "\"DIFFERENTIATED\""
        );
    }
}
