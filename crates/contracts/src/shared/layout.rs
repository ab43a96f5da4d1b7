//! Warehouse layout: the configuration that drives location validation,
//! enumeration, capacity and the occupancy grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Level 1 of `niche` holds `count` trays instead of the regular slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayNiche {
    pub niche: u32,
    pub count: u32,
}

/// One racked section (A, B, C ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub letter: char,
    pub niche_min: u32,
    pub niche_max: u32,
    pub levels: u32,
    pub slots_per_level: u32,
    #[serde(default)]
    pub trays: Vec<TrayNiche>,
}

impl SectionLayout {
    pub fn niches(&self) -> RangeInclusive<u32> {
        self.niche_min..=self.niche_max
    }

    pub fn has_niche(&self, niche: u32) -> bool {
        self.niches().contains(&niche)
    }

    /// Tray count of level 1, when `niche` is a tray niche
    pub fn tray_count(&self, niche: u32) -> Option<u32> {
        self.trays
            .iter()
            .find(|t| t.niche == niche)
            .map(|t| t.count)
    }

    /// Number of drawn slots on a level of a niche
    pub fn slots_at(&self, niche: u32, level: u32) -> u32 {
        match self.tray_count(niche) {
            Some(count) if level == 1 => count,
            _ => self.slots_per_level,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.niches()
            .map(|niche| (1..=self.levels).map(|level| self.slots_at(niche, level)).sum::<u32>())
            .sum()
    }
}

/// Floor section, addressed by spot number only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub letter: char,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseLayout {
    pub sections: Vec<SectionLayout>,
    pub floor: FloorLayout,
    /// When false the level component is only checked to be a number.
    #[serde(default)]
    pub enforce_levels: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no racked sections")]
    NoSections,
    #[error("section letter '{0}' must be an ASCII uppercase letter")]
    BadLetter(char),
    #[error("section letter '{0}' is used more than once")]
    DuplicateSection(char),
    #[error("floor letter '{0}' collides with a racked section")]
    FloorCollision(char),
    #[error("section {letter}: niche range {min}..={max} is invalid")]
    BadNicheRange { letter: char, min: u32, max: u32 },
    #[error("section {0}: at least one level is required")]
    NoLevels(char),
    #[error("section {0}: at least one slot per level is required")]
    NoSlots(char),
    #[error("section {letter}: tray niche {niche} is outside the niche range")]
    TrayOutOfRange { letter: char, niche: u32 },
    #[error("section {letter}: tray niche {niche} has no trays")]
    EmptyTray { letter: char, niche: u32 },
    #[error("section {letter}: tray niche {niche} is declared twice")]
    DuplicateTray { letter: char, niche: u32 },
    #[error("floor section must have at least one spot")]
    EmptyFloor,
}

impl WarehouseLayout {
    pub fn section(&self, letter: char) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.letter == letter)
    }

    /// Racked letters in configured order, followed by the floor letter
    pub fn letters(&self) -> Vec<char> {
        self.sections
            .iter()
            .map(|s| s.letter)
            .chain(std::iter::once(self.floor.letter))
            .collect()
    }

    /// Total number of valid locations. Always equals the enumeration length.
    pub fn capacity(&self) -> u32 {
        self.sections.iter().map(SectionLayout::capacity).sum::<u32>() + self.floor.count
    }

    /// Structural check performed when the layout is loaded
    pub fn check(&self) -> Result<(), LayoutError> {
        if self.sections.is_empty() {
            return Err(LayoutError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            let letter = section.letter;
            if !letter.is_ascii_uppercase() {
                return Err(LayoutError::BadLetter(letter));
            }
            if !seen.insert(letter) {
                return Err(LayoutError::DuplicateSection(letter));
            }
            if section.niche_min < 1 || section.niche_min > section.niche_max {
                return Err(LayoutError::BadNicheRange {
                    letter,
                    min: section.niche_min,
                    max: section.niche_max,
                });
            }
            if section.levels < 1 {
                return Err(LayoutError::NoLevels(letter));
            }
            if section.slots_per_level < 1 {
                return Err(LayoutError::NoSlots(letter));
            }

            let mut tray_niches = HashSet::new();
            for tray in &section.trays {
                if !section.has_niche(tray.niche) {
                    return Err(LayoutError::TrayOutOfRange { letter, niche: tray.niche });
                }
                if tray.count < 1 {
                    return Err(LayoutError::EmptyTray { letter, niche: tray.niche });
                }
                if !tray_niches.insert(tray.niche) {
                    return Err(LayoutError::DuplicateTray { letter, niche: tray.niche });
                }
            }
        }

        if !self.floor.letter.is_ascii_uppercase() {
            return Err(LayoutError::BadLetter(self.floor.letter));
        }
        if seen.contains(&self.floor.letter) {
            return Err(LayoutError::FloorCollision(self.floor.letter));
        }
        if self.floor.count < 1 {
            return Err(LayoutError::EmptyFloor);
        }
        Ok(())
    }
}

impl Default for WarehouseLayout {
    /// A 1-3, B 2-3 (B3 level 1: 5 trays), C 1-5 (level 1: 4 trays), floor D 1-28
    fn default() -> Self {
        Self {
            sections: vec![
                SectionLayout {
                    letter: 'A',
                    niche_min: 1,
                    niche_max: 3,
                    levels: 4,
                    slots_per_level: 3,
                    trays: vec![],
                },
                SectionLayout {
                    letter: 'B',
                    niche_min: 2,
                    niche_max: 3,
                    levels: 4,
                    slots_per_level: 3,
                    trays: vec![TrayNiche { niche: 3, count: 5 }],
                },
                SectionLayout {
                    letter: 'C',
                    niche_min: 1,
                    niche_max: 5,
                    levels: 4,
                    slots_per_level: 3,
                    trays: (1..=5).map(|niche| TrayNiche { niche, count: 4 }).collect(),
                },
            ],
            floor: FloorLayout { letter: 'D', count: 28 },
            enforce_levels: false,
        }
    }
}
