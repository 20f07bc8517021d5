use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{EarlyPaymentMode, EarlyPaymentRepeat, EarlyPaymentSpec};

/// one resolved prepayment contribution for a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub amount: Money,
    pub mode: EarlyPaymentMode,
}

/// open-ended spec, evaluated by threshold comparison every month because
/// the payoff month is not known in advance
#[derive(Debug, Clone, Copy)]
struct OpenEnded {
    start_month: u32,
    amount: Money,
    mode: EarlyPaymentMode,
}

/// sparse month-indexed prepayment lookup, built once before the loop starts.
///
/// ONCE/MONTHLY/QUARTERLY specs are pre-expanded up to the horizon so the
/// expansion itself is bounded; UNTIL_END specs stay un-expanded and are
/// matched on demand as `month >= start`.
#[derive(Debug, Clone, Default)]
pub struct EarlyPaymentPlan {
    by_month: BTreeMap<u32, Vec<Contribution>>,
    open_ended: Vec<OpenEnded>,
}

impl EarlyPaymentPlan {
    pub fn build(specs: &[EarlyPaymentSpec], horizon_months: u32) -> Self {
        let mut plan = EarlyPaymentPlan::default();

        for spec in specs {
            let item = Contribution {
                amount: spec.amount,
                mode: spec.mode,
            };
            match spec.repeat {
                EarlyPaymentRepeat::Once => plan.insert(spec.month_index, item),
                EarlyPaymentRepeat::Monthly => {
                    let mut month = spec.month_index;
                    while month <= horizon_months {
                        plan.insert(month, item);
                        month += 1;
                    }
                }
                EarlyPaymentRepeat::Quarterly => {
                    let mut month = spec.month_index;
                    while month <= horizon_months {
                        plan.insert(month, item);
                        month += 3;
                    }
                }
                EarlyPaymentRepeat::UntilEnd => plan.open_ended.push(OpenEnded {
                    start_month: spec.month_index,
                    amount: spec.amount,
                    mode: spec.mode,
                }),
            }
        }

        plan
    }

    fn insert(&mut self, month: u32, item: Contribution) {
        self.by_month.entry(month).or_default().push(item);
    }

    /// contributions due in the given month: pre-expanded entries first,
    /// open-ended entries after, each group in spec order
    pub fn contributions_for(&self, month: u32) -> Vec<Contribution> {
        let mut items = self.by_month.get(&month).cloned().unwrap_or_default();
        items.extend(
            self.open_ended
                .iter()
                .filter(|x| month >= x.start_month)
                .map(|x| Contribution {
                    amount: x.amount,
                    mode: x.mode,
                }),
        );
        items
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty() && self.open_ended.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn spec(month_index: u32, repeat: EarlyPaymentRepeat, mode: EarlyPaymentMode) -> EarlyPaymentSpec {
        EarlyPaymentSpec {
            id: Uuid::new_v4(),
            amount: Money::from_major(100),
            month_index,
            mode,
            repeat,
        }
    }

    #[test]
    fn test_once_resolves_single_month() {
        let plan = EarlyPaymentPlan::build(
            &[spec(5, EarlyPaymentRepeat::Once, EarlyPaymentMode::ReduceTerm)],
            2000,
        );
        assert!(plan.contributions_for(4).is_empty());
        assert_eq!(plan.contributions_for(5).len(), 1);
        assert!(plan.contributions_for(6).is_empty());
    }

    #[test]
    fn test_quarterly_steps_by_three() {
        let plan = EarlyPaymentPlan::build(
            &[spec(3, EarlyPaymentRepeat::Quarterly, EarlyPaymentMode::ReducePayment)],
            2000,
        );
        for month in [3, 6, 9, 12] {
            assert_eq!(plan.contributions_for(month).len(), 1, "month {month}");
        }
        for month in [1, 2, 4, 5, 7, 8] {
            assert!(plan.contributions_for(month).is_empty(), "month {month}");
        }
    }

    #[test]
    fn test_monthly_bounded_by_horizon() {
        let plan = EarlyPaymentPlan::build(
            &[spec(10, EarlyPaymentRepeat::Monthly, EarlyPaymentMode::ReduceTerm)],
            24,
        );
        assert_eq!(plan.contributions_for(24).len(), 1);
        assert!(plan.contributions_for(25).is_empty());
    }

    #[test]
    fn test_until_end_matches_by_threshold() {
        let plan = EarlyPaymentPlan::build(
            &[spec(7, EarlyPaymentRepeat::UntilEnd, EarlyPaymentMode::ReduceTerm)],
            24,
        );
        assert!(plan.contributions_for(6).is_empty());
        assert_eq!(plan.contributions_for(7).len(), 1);
        // no pre-expansion bound applies: still active far past the horizon
        assert_eq!(plan.contributions_for(1999).len(), 1);
    }

    #[test]
    fn test_same_month_keeps_spec_order() {
        let first = EarlyPaymentSpec {
            amount: Money::from_major(10),
            ..spec(4, EarlyPaymentRepeat::Once, EarlyPaymentMode::ReduceTerm)
        };
        let second = EarlyPaymentSpec {
            amount: Money::from_major(20),
            ..spec(4, EarlyPaymentRepeat::Once, EarlyPaymentMode::ReducePayment)
        };
        let plan = EarlyPaymentPlan::build(&[first, second], 2000);

        let items = plan.contributions_for(4);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].amount, Money::from_major(10));
        assert_eq!(items[1].amount, Money::from_major(20));
    }

    #[test]
    fn test_open_ended_after_fixed_entries() {
        let fixed = spec(2, EarlyPaymentRepeat::Monthly, EarlyPaymentMode::ReduceTerm);
        let open = EarlyPaymentSpec {
            amount: Money::from_major(5),
            ..spec(1, EarlyPaymentRepeat::UntilEnd, EarlyPaymentMode::ReducePayment)
        };
        let plan = EarlyPaymentPlan::build(&[open, fixed], 2000);

        let items = plan.contributions_for(3);
        assert_eq!(items[0].mode, EarlyPaymentMode::ReduceTerm);
        assert_eq!(items[1].amount, Money::from_major(5));
    }

    #[test]
    fn test_empty_plan() {
        let plan = EarlyPaymentPlan::build(&[], 2000);
        assert!(plan.is_empty());
        assert!(plan.contributions_for(1).is_empty());
    }
}
