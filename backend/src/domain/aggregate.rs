//! Pure aggregation over record snapshots.
//!
//! Everything here is deterministic and recomputed from scratch whenever a
//! subscription delivers a new snapshot; there is no incremental state.

use shared::{CategoryTotal, CombinedSeries, NetPosition, NetStatus, Record, SeriesPoint};

/// Sum of the amount field across a record set. `total(&[]) == 0.0`.
pub fn total(records: &[Record]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Net position of the two ledgers. Status is `Gain` when net >= 0.
pub fn net_position(income: &[Record], expense: &[Record]) -> NetPosition {
    let total_income = total(income);
    let total_expense = total(expense);
    let net = total_income - total_expense;
    NetPosition {
        total_income,
        total_expense,
        net,
        status: if net >= 0.0 {
            NetStatus::Gain
        } else {
            NetStatus::Loss
        },
    }
}

/// Income and expense as two series over a shared date axis.
///
/// The label set is the union of the day keys present in either set, in
/// first-appearance order (income first, then expense), without duplicates.
/// Per-kind points carry the summed amount for each day the kind has records.
pub fn combined_series(income: &[Record], expense: &[Record]) -> CombinedSeries {
    let mut labels: Vec<String> = Vec::new();
    for record in income.iter().chain(expense.iter()) {
        let day = day_key(&record.date);
        if !labels.iter().any(|l| *l == day) {
            labels.push(day);
        }
    }

    CombinedSeries {
        income: series_points(income),
        expense: series_points(expense),
        labels,
    }
}

fn series_points(records: &[Record]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = Vec::new();
    for record in records {
        let day = day_key(&record.date);
        match points.iter_mut().find(|p| p.date == day) {
            Some(point) => point.amount += record.amount,
            None => points.push(SeriesPoint {
                date: day,
                amount: record.amount,
            }),
        }
    }
    points
}

/// Per-category summed amounts, in first-appearance order. Input for the
/// pie/bar breakdown charts.
pub fn category_breakdown(records: &[Record]) -> Vec<CategoryTotal> {
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    for record in records {
        match breakdown.iter_mut().find(|c| c.category == record.category) {
            Some(entry) => entry.total += record.amount,
            None => breakdown.push(CategoryTotal {
                category: record.category.clone(),
                total: record.amount,
            }),
        }
    }
    breakdown
}

/// Calendar-day portion of an RFC 3339 timestamp, used as the chart key.
fn day_key(date: &str) -> String {
    date.split('T').next().unwrap_or(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RecordKind;

    fn record(kind: RecordKind, amount: f64, category: &str, date: &str) -> Record {
        Record {
            id: format!("{}-{}", category, amount),
            owner_id: "user-1".to_string(),
            kind,
            amount,
            category: category.to_string(),
            sub_category: String::new(),
            note: String::new(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_total_of_empty_set_is_zero() {
        assert_eq!(total(&[]), 0.0);
    }

    #[test]
    fn test_total_sums_amounts() {
        let records = vec![
            record(RecordKind::Income, 100.0, "Job", "2025-01-10T09:00:00+00:00"),
            record(RecordKind::Income, 50.5, "Other", "2025-01-11T09:00:00+00:00"),
        ];
        assert_eq!(total(&records), 150.5);
    }

    #[test]
    fn test_net_is_income_minus_expense() {
        let income = vec![record(RecordKind::Income, 200.0, "Job", "2025-01-10T09:00:00+00:00")];
        let expense = vec![record(RecordKind::Expense, 80.0, "Food", "2025-01-10T12:00:00+00:00")];

        let position = net_position(&income, &expense);
        assert_eq!(position.net, 120.0);
        assert_eq!(position.status, NetStatus::Gain);
        assert_eq!(position.status.label(), "Gain");
    }

    #[test]
    fn test_status_is_gain_at_exactly_zero() {
        let income = vec![record(RecordKind::Income, 80.0, "Job", "2025-01-10T09:00:00+00:00")];
        let expense = vec![record(RecordKind::Expense, 80.0, "Food", "2025-01-10T12:00:00+00:00")];
        assert_eq!(net_position(&income, &expense).status, NetStatus::Gain);

        let position = net_position(&[], &expense);
        assert_eq!(position.net, -80.0);
        assert_eq!(position.status, NetStatus::Loss);
    }

    #[test]
    fn test_combined_labels_are_date_union_without_duplicates() {
        let income = vec![
            record(RecordKind::Income, 10.0, "Job", "2025-01-10T09:00:00+00:00"),
            record(RecordKind::Income, 20.0, "Job", "2025-01-12T09:00:00+00:00"),
        ];
        let expense = vec![
            record(RecordKind::Expense, 5.0, "Food", "2025-01-10T18:00:00+00:00"),
            record(RecordKind::Expense, 7.0, "Food", "2025-01-13T18:00:00+00:00"),
        ];

        let series = combined_series(&income, &expense);
        assert_eq!(series.labels, vec!["2025-01-10", "2025-01-12", "2025-01-13"]);
    }

    #[test]
    fn test_combined_series_sums_same_day_amounts_per_kind() {
        let income = vec![
            record(RecordKind::Income, 10.0, "Job", "2025-01-10T09:00:00+00:00"),
            record(RecordKind::Income, 15.0, "Other", "2025-01-10T17:00:00+00:00"),
        ];
        let series = combined_series(&income, &[]);
        assert_eq!(series.income.len(), 1);
        assert_eq!(series.income[0].date, "2025-01-10");
        assert_eq!(series.income[0].amount, 25.0);
        assert!(series.expense.is_empty());
    }

    #[test]
    fn test_category_breakdown_groups_and_sums() {
        let records = vec![
            record(RecordKind::Expense, 30.0, "Food", "2025-01-10T09:00:00+00:00"),
            record(RecordKind::Expense, 12.0, "Travel", "2025-01-10T10:00:00+00:00"),
            record(RecordKind::Expense, 18.0, "Food", "2025-01-11T09:00:00+00:00"),
        ];

        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
        assert_eq!(breakdown[0].total, 48.0);
        assert_eq!(breakdown[1].category, "Travel");
        assert_eq!(breakdown[1].total, 12.0);
    }

    #[test]
    fn test_aggregates_reflect_deleted_record() {
        let mut records = vec![
            record(RecordKind::Expense, 30.0, "Food", "2025-01-10T09:00:00+00:00"),
            record(RecordKind::Expense, 12.0, "Travel", "2025-01-10T10:00:00+00:00"),
        ];
        assert_eq!(total(&records), 42.0);

        // A delete arrives as a new snapshot without the record.
        records.remove(1);
        assert_eq!(total(&records), 30.0);
        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category, "Food");
    }
}
