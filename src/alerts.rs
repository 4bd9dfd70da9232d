// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Customer delinquency alerts.
//!
//! A customer is flagged when their summed balance is above
//! [`OWED_THRESHOLD`], or when they carried a positive balance on at least
//! [`MIN_CONSECUTIVE_DAYS`] consecutive calendar days. Both together make
//! the alert high priority.

use crate::models::SaleRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Strictly greater than this many currency units.
pub const OWED_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
/// Shortest run of owed calendar days that raises an alert.
pub const MIN_CONSECUTIVE_DAYS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("High"),
            Priority::Medium => f.write_str("Medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertReason {
    OwesOverThreshold { total: Decimal },
    ConsecutiveDaysOwed { days: u32 },
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertReason::OwesOverThreshold { total } => write!(
                f,
                "owes more than ${} (${:.2})",
                OWED_THRESHOLD,
                crate::utils::round2(*total)
            ),
            AlertReason::ConsecutiveDaysOwed { days } => {
                write!(f, "balance pending for {} consecutive day(s)", days)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Alert {
    pub customer: String,
    pub total_outstanding_balance: Decimal,
    pub last_sale_date: NaiveDate,
    pub reasons: Vec<AlertReason>,
    pub priority: Priority,
}

impl Alert {
    pub fn reason_text(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// One alert per flagged customer, in the order customers first appear.
pub fn analyze(records: &[SaleRecord]) -> Vec<Alert> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&SaleRecord>)> = Vec::new();
    for rec in records {
        let slot = *index.entry(rec.customer()).or_insert_with(|| {
            groups.push((rec.customer(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(rec);
    }

    groups
        .into_iter()
        .filter_map(|(customer, mut sales)| {
            sales.sort_by_key(|s| s.date());
            evaluate(customer, &sales)
        })
        .collect()
}

fn evaluate(customer: &str, sales: &[&SaleRecord]) -> Option<Alert> {
    let total: Decimal = sales.iter().map(|s| s.balance()).sum();
    let owes_over = total > OWED_THRESHOLD;

    let owed_dates: BTreeSet<NaiveDate> = sales
        .iter()
        .filter(|s| s.balance() > Decimal::ZERO)
        .map(|s| s.date())
        .collect();
    let run = longest_consecutive_run(&owed_dates);
    let consecutive = run >= MIN_CONSECUTIVE_DAYS;

    if !owes_over && !consecutive {
        return None;
    }

    let mut reasons = Vec::with_capacity(2);
    if owes_over {
        reasons.push(AlertReason::OwesOverThreshold { total });
    }
    if consecutive {
        reasons.push(AlertReason::ConsecutiveDaysOwed { days: run });
    }
    let priority = if owes_over && consecutive {
        Priority::High
    } else {
        Priority::Medium
    };
    tracing::debug!(customer, %total, run, ?priority, "customer flagged");

    // groups are sorted by date, so the last sale carries the latest date
    sales.last().map(|last| Alert {
        customer: customer.to_string(),
        total_outstanding_balance: total,
        last_sale_date: last.date(),
        reasons,
        priority,
    })
}

/// Longest stretch of dates each exactly one day after the previous.
/// Fewer than two dates never form a run and yield 0.
pub fn longest_consecutive_run(dates: &BTreeSet<NaiveDate>) -> u32 {
    if dates.len() < 2 {
        return 0;
    }
    let mut best = 1;
    let mut current = 1;
    let mut prev: Option<NaiveDate> = None;
    for &d in dates {
        if let Some(p) = prev {
            if (d - p).num_days() == 1 {
                current += 1;
                best = best.max(current);
            } else {
                current = 1;
            }
        }
        prev = Some(d);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BirdType, SaleInput};
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// A sale whose computed balance is exactly `balance`.
    fn sale(customer: &str, date: &str, balance: &str) -> SaleRecord {
        let b = dec(balance);
        let (gross, paid) = if b.is_sign_negative() {
            (Decimal::ONE, Decimal::ONE - b)
        } else {
            (b, Decimal::ZERO)
        };
        let rec = SaleRecord::new(SaleInput {
            date: day(date),
            customer: customer.into(),
            bird_type: BirdType::Pollo,
            quantity: 1,
            gross_weight: gross,
            discount_weight: Decimal::ZERO,
            unit_price: Decimal::ONE,
            amount_paid: paid,
        });
        assert_eq!(rec.balance(), b);
        rec
    }

    fn as_set(alerts: Vec<Alert>) -> HashSet<Alert> {
        alerts.into_iter().collect()
    }

    #[test]
    fn empty_input_gives_no_alerts() {
        assert!(analyze(&[]).is_empty());
    }

    #[test]
    fn small_single_balance_is_not_flagged() {
        assert!(analyze(&[sale("Senel", "2024-01-01", "5.00")]).is_empty());
    }

    #[test]
    fn single_large_balance_is_medium() {
        let alerts = analyze(&[sale("Senel", "2024-01-01", "15.00")]);
        assert_eq!(alerts.len(), 1);
        let a = &alerts[0];
        assert_eq!(a.priority, Priority::Medium);
        assert_eq!(
            a.reasons,
            vec![AlertReason::OwesOverThreshold { total: dec("15.00") }]
        );
        assert_eq!(a.reason_text(), "owes more than $10 ($15.00)");
        assert_eq!(a.last_sale_date, day("2024-01-01"));
    }

    #[test]
    fn three_consecutive_small_balances_are_medium() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "1"),
            sale("Senel", "2024-01-02", "1"),
            sale("Senel", "2024-01-03", "1"),
        ]);
        assert_eq!(alerts.len(), 1);
        let a = &alerts[0];
        assert_eq!(a.priority, Priority::Medium);
        assert_eq!(a.total_outstanding_balance, dec("3"));
        assert_eq!(a.reasons, vec![AlertReason::ConsecutiveDaysOwed { days: 3 }]);
        assert_eq!(a.reason_text(), "balance pending for 3 consecutive day(s)");
        assert_eq!(a.last_sale_date, day("2024-01-03"));
    }

    #[test]
    fn both_triggers_make_high_priority() {
        let alerts = analyze(&[
            sale("D. Jorge", "2024-02-28", "12.00"),
            sale("D. Jorge", "2024-02-29", "8.00"),
        ]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].priority, Priority::High);
        assert_eq!(
            alerts[0].reason_text(),
            "owes more than $10 ($20.00) | balance pending for 2 consecutive day(s)"
        );
    }

    #[test]
    fn gaps_never_extend_a_run() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "1"),
            sale("Senel", "2024-01-03", "1"),
            sale("Senel", "2024-01-05", "1"),
            sale("Senel", "2024-01-05", "2"),
        ]);
        assert!(alerts.is_empty());

        let dates: BTreeSet<NaiveDate> = ["2024-01-01", "2024-01-03", "2024-01-05"]
            .into_iter()
            .map(day)
            .collect();
        assert_eq!(longest_consecutive_run(&dates), 1);
    }

    #[test]
    fn run_counts_distinct_days_only() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "1"),
            sale("Senel", "2024-01-01", "1"),
            sale("Senel", "2024-01-02", "1"),
        ]);
        assert_eq!(
            alerts[0].reasons,
            vec![AlertReason::ConsecutiveDaysOwed { days: 2 }]
        );
    }

    #[test]
    fn longest_run_wins_over_earlier_shorter_runs() {
        let dates: BTreeSet<NaiveDate> = [
            "2024-01-01",
            "2024-01-02",
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
            "2024-01-20",
        ]
        .into_iter()
        .map(day)
        .collect();
        assert_eq!(longest_consecutive_run(&dates), 3);
        assert_eq!(longest_consecutive_run(&BTreeSet::new()), 0);
        assert_eq!(
            longest_consecutive_run(&[day("2024-01-01")].into_iter().collect()),
            0
        );
    }

    #[test]
    fn threshold_is_strictly_greater_than_ten() {
        assert!(analyze(&[sale("Senel", "2024-01-01", "10.00")]).is_empty());
        let alerts = analyze(&[sale("Senel", "2024-01-01", "10.01")]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].reason_text(), "owes more than $10 ($10.01)");
    }

    #[test]
    fn negative_balances_offset_positive_ones() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "25.00"),
            sale("Senel", "2024-01-05", "-20.00"),
        ]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn zero_and_negative_days_break_a_run() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "1"),
            sale("Senel", "2024-01-02", "0"),
            sale("Senel", "2024-01-03", "1"),
        ]);
        assert!(alerts.is_empty());
    }

    #[test]
    fn last_sale_date_ignores_balance_sign() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-01", "30"),
            sale("Senel", "2024-01-09", "-2"),
        ]);
        assert_eq!(alerts[0].last_sale_date, day("2024-01-09"));
        assert_eq!(alerts[0].total_outstanding_balance, dec("28"));
    }

    #[test]
    fn last_sale_date_is_latest_even_when_listed_newest_first() {
        let alerts = analyze(&[
            sale("Senel", "2024-01-09", "0"),
            sale("Senel", "2024-01-05", "12"),
            sale("Senel", "2024-01-07", "0"),
        ]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].last_sale_date, day("2024-01-09"));
    }

    #[test]
    fn customers_are_reported_in_first_seen_order() {
        let alerts = analyze(&[
            sale("B", "2024-01-01", "11"),
            sale("A", "2024-01-01", "11"),
            sale("B", "2024-01-02", "1"),
            sale("C", "2024-01-01", "1"),
        ]);
        let names: Vec<&str> = alerts.iter().map(|a| a.customer.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn repeated_analysis_is_stable() {
        let records = vec![
            sale("A", "2024-01-01", "4"),
            sale("A", "2024-01-02", "9"),
            sale("B", "2024-01-07", "30"),
        ];
        assert_eq!(as_set(analyze(&records)), as_set(analyze(&records)));
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = vec![
            sale("A", "2024-01-03", "4"),
            sale("B", "2024-01-07", "30"),
            sale("A", "2024-01-01", "9"),
            sale("C", "2024-01-04", "1"),
            sale("A", "2024-01-02", "-1"),
            sale("C", "2024-01-05", "1"),
        ];
        let expected = as_set(analyze(&records));
        assert_eq!(expected.len(), 3);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(as_set(analyze(&reversed)), expected);

        for k in 1..records.len() {
            let mut rotated = records.clone();
            rotated.rotate_left(k);
            assert_eq!(as_set(analyze(&rotated)), expected);
        }
    }
}
