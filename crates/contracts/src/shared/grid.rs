//! Occupancy grid: the layout expanded into sections, niches, levels and
//! slots, each slot carrying the pallet stored there.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::layout::WarehouseLayout;
use super::location::Location;
use crate::domain::a001_pallet::aggregate::Pallet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSlot {
    pub location: String,
    /// `P{n}` pallet slot, `B{n}` tray, or the location itself on the floor
    pub label: String,
    pub pallet: Option<Pallet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLevel {
    pub number: u32,
    pub is_tray: bool,
    pub slots: Vec<GridSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridNiche {
    pub label: String,
    pub number: u32,
    /// Top level first
    pub levels: Vec<GridLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSection {
    pub letter: char,
    pub niches: Vec<GridNiche>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFloor {
    pub letter: char,
    pub spots: Vec<GridSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseGrid {
    pub sections: Vec<GridSection>,
    pub floor: GridFloor,
}

pub fn build_grid(layout: &WarehouseLayout, records: &[Pallet]) -> WarehouseGrid {
    let by_location: HashMap<&str, &Pallet> =
        records.iter().map(|p| (p.location.as_str(), p)).collect();
    let occupant = |location: &str| by_location.get(location).map(|p| (*p).clone());

    let sections = layout
        .sections
        .iter()
        .map(|section| GridSection {
            letter: section.letter,
            niches: section
                .niches()
                .map(|niche| GridNiche {
                    label: format!("{}{}", section.letter, niche),
                    number: niche,
                    levels: (1..=section.levels)
                        .rev()
                        .map(|level| {
                            let is_tray = level == 1 && section.tray_count(niche).is_some();
                            let slots = (1..=section.slots_at(niche, level))
                                .map(|slot| {
                                    let location = Location::Slot {
                                        section: section.letter,
                                        niche,
                                        level,
                                        slot,
                                    }
                                    .to_string();
                                    GridSlot {
                                        label: format!("{}{}", if is_tray { 'B' } else { 'P' }, slot),
                                        pallet: occupant(&location),
                                        location,
                                    }
                                })
                                .collect();
                            GridLevel {
                                number: level,
                                is_tray,
                                slots,
                            }
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let floor = GridFloor {
        letter: layout.floor.letter,
        spots: (1..=layout.floor.count)
            .map(|spot| {
                let location = Location::Floor {
                    section: layout.floor.letter,
                    spot,
                }
                .to_string();
                GridSlot {
                    label: location.clone(),
                    pallet: occupant(&location),
                    location,
                }
            })
            .collect(),
    };

    WarehouseGrid { sections, floor }
}

impl WarehouseGrid {
    /// All slots, racked sections first, in drawing order
    pub fn slots(&self) -> impl Iterator<Item = &GridSlot> {
        self.sections
            .iter()
            .flat_map(|s| s.niches.iter())
            .flat_map(|n| n.levels.iter())
            .flat_map(|l| l.slots.iter())
            .chain(self.floor.spots.iter())
    }

    /// Records whose location has no slot in the grid
    pub fn orphans<'a>(&self, records: &'a [Pallet]) -> Vec<&'a Pallet> {
        let drawn: HashSet<&str> = self.slots().map(|s| s.location.as_str()).collect();
        records
            .iter()
            .filter(|p| !drawn.contains(p.location.as_str()))
            .collect()
    }

    pub fn occupied(&self) -> usize {
        self.slots().filter(|s| s.pallet.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::location::{enumerate_locations, is_valid_location};

    fn pallet(scan: &str, loc: &str) -> Pallet {
        Pallet::new(scan.into(), "Cajas".into(), 1, loc.into())
    }

    #[test]
    fn slot_set_equals_enumeration() {
        let layout = WarehouseLayout::default();
        let grid = build_grid(&layout, &[]);
        let mut drawn: Vec<String> = grid.slots().map(|s| s.location.clone()).collect();
        let mut all = enumerate_locations(&layout);
        drawn.sort();
        all.sort();
        assert_eq!(drawn, all);
        assert!(grid.slots().all(|s| is_valid_location(&layout, &s.location)));
    }

    #[test]
    fn levels_are_descending_and_trays_labelled() {
        let grid = build_grid(&WarehouseLayout::default(), &[]);
        let b3 = &grid.sections[1].niches[1];
        assert_eq!(b3.label, "B3");
        let numbers: Vec<u32> = b3.levels.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![4, 3, 2, 1]);

        let bottom = b3.levels.last().unwrap();
        assert!(bottom.is_tray);
        assert_eq!(bottom.slots.len(), 5);
        assert_eq!(bottom.slots[4].label, "B5");
        assert_eq!(b3.levels[0].slots[0].label, "P1");
        assert_eq!(grid.floor.spots[4].label, "D5");
    }

    #[test]
    fn occupied_slots_carry_their_pallet() {
        let records = vec![pallet("S1", "A2-3-1"), pallet("S2", "D5")];
        let grid = build_grid(&WarehouseLayout::default(), &records);
        assert_eq!(grid.occupied(), 2);

        let a2 = &grid.sections[0].niches[1];
        let level3 = a2.levels.iter().find(|l| l.number == 3).unwrap();
        assert_eq!(level3.slots[0].pallet.as_ref().map(|p| p.scan_code.as_str()), Some("S1"));
        assert_eq!(
            grid.floor.spots[4].pallet.as_ref().map(|p| p.scan_code.as_str()),
            Some("S2")
        );
    }

    #[test]
    fn orphans_are_reported() {
        let records = vec![pallet("S1", "A2-3-1"), pallet("S2", "A2-9-1")];
        let grid = build_grid(&WarehouseLayout::default(), &records);
        let orphans = grid.orphans(&records);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].scan_code, "S2");
    }
}
