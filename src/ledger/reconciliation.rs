use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::within_tolerance;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    InSync,
    Drifted,
}

/// Comparison between a running total computed on the fly and the posted
/// (materialised) balance for the same account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceReconciliation {
    /// The figure callers should display; always the materialised balance.
    pub authoritative: Decimal,
    pub live: Decimal,
    pub materialized: Decimal,
    /// `live - materialized`.
    pub difference: Decimal,
    pub status: ReconciliationStatus,
}

impl BalanceReconciliation {
    pub fn is_drifted(&self) -> bool {
        self.status == ReconciliationStatus::Drifted
    }
}

/// Reconciles a live running balance against the materialised one.
///
/// The materialised balance is never overridden by the live figure, whatever
/// the size of the gap; drift beyond `tolerance` is reported instead.
pub fn reconcile_balance(
    live: Decimal,
    materialized: Decimal,
    tolerance: Decimal,
) -> BalanceReconciliation {
    let status = if within_tolerance(live, materialized, tolerance) {
        ReconciliationStatus::InSync
    } else {
        ReconciliationStatus::Drifted
    };
    BalanceReconciliation {
        authoritative: materialized,
        live,
        materialized,
        difference: live - materialized,
        status,
    }
}
