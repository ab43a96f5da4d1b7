use serde::{Deserialize, Serialize};

use super::layout::WarehouseLayout;
use crate::domain::a001_pallet::aggregate::Pallet;

/// Derived occupancy figures, never stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStats {
    pub total_pallets: i64,
    pub total_quantity: i64,
    /// Signed: a negative value means more records than slots and is reported as is.
    pub empty_spots: i64,
}

pub fn compute_stats(records: &[Pallet], layout: &WarehouseLayout) -> WarehouseStats {
    compute_stats_with_capacity(records, layout.capacity())
}

fn compute_stats_with_capacity(records: &[Pallet], capacity: u32) -> WarehouseStats {
    let total_pallets = records.len() as i64;
    let total_quantity = records.iter().map(|p| p.quantity).sum();
    WarehouseStats {
        total_pallets,
        total_quantity,
        empty_spots: i64::from(capacity) - total_pallets,
    }
}
