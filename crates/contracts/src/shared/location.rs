//! Location coding scheme.
//!
//! Racked slots are written `{section}{niche}-{level}-{slot}` (`A2-3-1`),
//! floor spots `{floor}{spot}` (`D5`). Validation and enumeration are both
//! driven by a [`WarehouseLayout`] and agree with each other: everything
//! enumerated validates, and with `enforce_levels` set nothing else does.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::layout::WarehouseLayout;
use super::reason::ReasonCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Slot {
        section: char,
        niche: u32,
        level: u32,
        slot: u32,
    },
    Floor {
        section: char,
        spot: u32,
    },
}

impl Location {
    pub fn section(&self) -> char {
        match self {
            Location::Slot { section, .. } | Location::Floor { section, .. } => *section,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Slot {
                section,
                niche,
                level,
                slot,
            } => write!(f, "{}{}-{}-{}", section, niche, level, slot),
            Location::Floor { section, spot } => write!(f, "{}{}", section, spot),
        }
    }
}

/// Every valid location of the layout in deterministic order:
/// racked sections as configured, niches and levels ascending, then the floor.
pub fn enumerate_locations(layout: &WarehouseLayout) -> Vec<String> {
    all_locations(layout).iter().map(Location::to_string).collect()
}

/// Same as [`enumerate_locations`] but keeps the parsed form.
pub fn all_locations(layout: &WarehouseLayout) -> Vec<Location> {
    let mut out = Vec::with_capacity(layout.capacity() as usize);
    for section in &layout.sections {
        for niche in section.niches() {
            for level in 1..=section.levels {
                for slot in 1..=section.slots_at(niche, level) {
                    out.push(Location::Slot {
                        section: section.letter,
                        niche,
                        level,
                        slot,
                    });
                }
            }
        }
    }
    let floor = layout.floor;
    out.extend((1..=floor.count).map(|spot| Location::Floor {
        section: floor.letter,
        spot,
    }));
    out
}

/// Checks `raw` against the layout. Pure and total: any string gets either
/// the parsed location or the first failing reason.
pub fn validate_location(layout: &WarehouseLayout, raw: &str) -> Result<Location, ReasonCode> {
    let floor = layout.floor;
    if let Some(rest) = raw.strip_prefix(floor.letter) {
        if !rest.contains('-') {
            return match parse_number(rest) {
                Some(spot) if (1..=floor.count).contains(&spot) => Ok(Location::Floor {
                    section: floor.letter,
                    spot,
                }),
                _ => Err(ReasonCode::InvalidFloorRange),
            };
        }
    }

    let parts: Vec<&str> = raw.split('-').collect();
    let [head, level, slot] = parts.as_slice() else {
        return Err(ReasonCode::BadFormat);
    };

    let mut chars = head.chars();
    let Some(letter) = chars.next() else {
        return Err(ReasonCode::BadFormat);
    };
    let section = layout.section(letter).ok_or(ReasonCode::InvalidSection)?;

    let niche = parse_number(chars.as_str())
        .filter(|n| section.has_niche(*n))
        .ok_or(ReasonCode::InvalidNiche)?;

    let level = parse_number(level).ok_or(ReasonCode::BadFormat)?;
    if layout.enforce_levels && !(1..=section.levels).contains(&level) {
        return Err(ReasonCode::InvalidLevel);
    }

    let (max, reason) = match section.tray_count(niche) {
        Some(count) if level == 1 => (count, ReasonCode::InvalidTraySlot),
        _ => (section.slots_per_level, ReasonCode::InvalidSlot),
    };
    let slot = parse_number(slot)
        .filter(|s| (1..=max).contains(s))
        .ok_or(reason)?;

    Ok(Location::Slot {
        section: letter,
        niche,
        level,
        slot,
    })
}

pub fn is_valid_location(layout: &WarehouseLayout, raw: &str) -> bool {
    validate_location(layout, raw).is_ok()
}

/// ASCII digits only, no sign, no leading zeros ("0" itself is allowed).
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

// ============================================================================
// DTO
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateLocationRequest {
    pub location: String,
}

/// Answer of `POST /api/warehouse/locations/validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
}

impl From<Result<Location, ReasonCode>> for LocationCheck {
    fn from(result: Result<Location, ReasonCode>) -> Self {
        match result {
            Ok(location) => Self {
                valid: true,
                canonical: Some(location.to_string()),
                reason: None,
            },
            Err(reason) => Self {
                valid: false,
                canonical: None,
                reason: Some(reason),
            },
        }
    }
}
