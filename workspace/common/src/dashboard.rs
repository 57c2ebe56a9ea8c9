use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Read-only rollup over every ledger, computed from one consistent snapshot.
///
/// - `total_fees_collected` is the sum of every payment, linked to a fee record or not.
/// - `pending_fees` is the outstanding balance summed over pending fee records.
/// - `net_revenue` is `total_fees_collected - total_expenses`.
///
/// Collection rate and profit margin are left to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardSummary {
    pub total_students: u64,
    #[schema(value_type = String, example = "70000")]
    pub total_fees_collected: Decimal,
    #[schema(value_type = String, example = "30000")]
    pub pending_fees: Decimal,
    pub pending_payments_count: u64,
    #[schema(value_type = String, example = "15000")]
    pub total_expenses: Decimal,
    #[schema(value_type = String, example = "55000")]
    pub net_revenue: Decimal,
}

impl DashboardSummary {
    /// Builds the summary, deriving `net_revenue` so it can never disagree with its inputs.
    pub fn new(
        total_students: u64,
        total_fees_collected: Decimal,
        pending_fees: Decimal,
        pending_payments_count: u64,
        total_expenses: Decimal,
    ) -> Self {
        Self {
            total_students,
            total_fees_collected,
            pending_fees,
            pending_payments_count,
            total_expenses,
            net_revenue: total_fees_collected - total_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_revenue_is_collected_minus_expenses() {
        let summary = DashboardSummary::new(
            3,
            Decimal::from(70000),
            Decimal::from(30000),
            1,
            Decimal::from(85000),
        );
        assert_eq!(summary.net_revenue, Decimal::from(-15000));
    }

    #[test]
    fn test_decimals_serialize_as_strings() {
        let summary = DashboardSummary::new(1, Decimal::new(125050, 2), Decimal::ZERO, 0, Decimal::ZERO);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_fees_collected"], "1250.50");
        assert_eq!(json["net_revenue"], "1250.50");
        assert_eq!(json["total_students"], 1);
    }
}
