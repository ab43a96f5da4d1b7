use crate::shared::warehouse_state::WarehouseState;
use contracts::domain::a001_pallet::aggregate::Pallet;
use contracts::shared::grid::{build_grid, GridSlot, WarehouseGrid};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct WarehouseViewerVm {
    pub grid: Memo<Option<WarehouseGrid>>,
    /// Палеты с ячейкой, которой нет в текущей раскладке
    pub orphans: Memo<Vec<Pallet>>,
    pub selected: RwSignal<Option<GridSlot>>,
}

impl WarehouseViewerVm {
    pub fn new() -> Self {
        let warehouse = use_context::<WarehouseState>().expect("WarehouseState not found");
        let layout = warehouse.layout;
        let pallets = warehouse.pallets;

        let grid = Memo::new(move |_| {
            layout.with(|l| l.as_ref().map(|l| pallets.with(|p| build_grid(l, p))))
        });
        let orphans = Memo::new(move |_| {
            grid.with(|g| match g {
                Some(g) => pallets.with(|p| g.orphans(p).into_iter().cloned().collect()),
                None => Vec::new(),
            })
        });

        Self {
            grid,
            orphans,
            selected: RwSignal::new(None),
        }
    }

    /// Выбор ячейки; повторный клик снимает выбор
    pub fn toggle(&self, slot: GridSlot) {
        self.selected.update(|current| {
            *current = match current.take() {
                Some(prev) if prev.location == slot.location => None,
                _ => Some(slot),
            };
        });
    }

    pub fn is_selected(&self, location: &str) -> bool {
        self.selected
            .with(|s| s.as_ref().is_some_and(|s| s.location == location))
    }
}

/// Подсказка при наведении на ячейку
pub fn slot_title(slot: &GridSlot) -> String {
    match &slot.pallet {
        Some(p) => format!(
            "{}: {} ({} uds.) - {}",
            slot.location, p.description, p.quantity, p.scan_code
        ),
        None => format!("{}: libre", slot.location),
    }
}

/// Resumen de ocupación sobre la rejilla
pub fn occupancy_text(occupied: usize, total: usize) -> String {
    if total == 0 {
        return "Sin ubicaciones configuradas".to_string();
    }
    format!("{} de {} ubicaciones ocupadas", occupied, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_shows_occupant() {
        let mut slot = GridSlot {
            location: "B3-1-2".into(),
            label: "B2".into(),
            pallet: None,
        };
        assert_eq!(slot_title(&slot), "B3-1-2: libre");

        slot.pallet = Some(Pallet::new("PALLET:x".into(), "Cemento".into(), 12, "B3-1-2".into()));
        assert_eq!(slot_title(&slot), "B3-1-2: Cemento (12 uds.) - PALLET:x");
    }

    #[test]
    fn occupancy_summary() {
        assert_eq!(occupancy_text(3, 120), "3 de 120 ubicaciones ocupadas");
        assert_eq!(occupancy_text(0, 0), "Sin ubicaciones configuradas");
    }
}
