//! Тексты причин отказа для пользователя (на испанском, как в интерфейсе склада).
//!
//! Сервер отдаёт только `ReasonCode`; диапазоны ниш, уровней и мест берутся
//! из текущей раскладки склада.

use contracts::shared::layout::{SectionLayout, WarehouseLayout};
use contracts::shared::reason::ReasonCode;

/// Human text for a rejected location or registration.
///
/// `location` is the normalized input the code refers to. Falls back to the
/// layout-independent summary when the input cannot be matched to a section.
pub fn reason_text(reason: ReasonCode, location: &str, layout: &WarehouseLayout) -> String {
    let floor = layout.floor;
    match reason {
        ReasonCode::BadFormat => format!(
            "El formato de la ubicación es incorrecto. Debe ser \"Sección-Nicho-Nivel-Palet\" (Ej: A2-3-1) o {}1 a {}{}.",
            floor.letter, floor.letter, floor.count
        ),
        ReasonCode::InvalidSection => format!(
            "El formato de la ubicación es incorrecto. La sección debe ser {}.",
            join_es(layout.sections.iter().map(|s| s.letter.to_string()).collect())
        ),
        ReasonCode::InvalidFloorRange => format!(
            "El formato de la ubicación es incorrecto. La Sección {} debe ir seguida de un número del 1 al {}.",
            floor.letter, floor.count
        ),
        ReasonCode::InvalidNiche => match section_of(location, layout) {
            Some(section) => format!(
                "Para la Sección {}, el nicho debe ser un número del {} al {}.",
                section.letter, section.niche_min, section.niche_max
            ),
            None => reason.summary().to_string(),
        },
        ReasonCode::InvalidLevel => match section_of(location, layout) {
            Some(section) => format!(
                "Para la Sección {}, el nivel debe ser un número del 1 al {}.",
                section.letter, section.levels
            ),
            None => reason.summary().to_string(),
        },
        ReasonCode::InvalidTraySlot => {
            let tray = section_of(location, layout).and_then(|section| {
                let niche = niche_of(location)?;
                section.tray_count(niche).map(|count| (section.letter, niche, count))
            });
            match tray {
                Some((letter, niche, count)) => format!(
                    "Para la Sección {}, Nicho {}, Nivel 1, el palet debe ser un subnivel entre 1 y {}.",
                    letter, niche, count
                ),
                None => reason.summary().to_string(),
            }
        }
        ReasonCode::InvalidSlot => match section_of(location, layout) {
            Some(section) => format!(
                "Para las ubicaciones de palets, el número debe ser {}.",
                join_es((1..=section.slots_per_level).map(|n| n.to_string()).collect())
            ),
            None => reason.summary().to_string(),
        },
        ReasonCode::DuplicateScanCode => "Ya existe un palet con este código QR.".to_string(),
        ReasonCode::DuplicateLocation => {
            format!("La ubicación {} ya está ocupada por otro palet.", location)
        }
        ReasonCode::InvalidQuantity | ReasonCode::MissingField => reason.summary().to_string(),
    }
}

fn section_of<'a>(location: &str, layout: &'a WarehouseLayout) -> Option<&'a SectionLayout> {
    location.chars().next().and_then(|letter| layout.section(letter))
}

/// Niche number of a `<Section><Niche>-...` string
fn niche_of(location: &str) -> Option<u32> {
    let head = location.split('-').next()?;
    let mut chars = head.chars();
    chars.next()?;
    chars.as_str().parse().ok()
}

/// "A", "A o B", "A, B o C"
fn join_es(items: Vec<String>) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} o {}", rest.join(", "), last),
    }
}
