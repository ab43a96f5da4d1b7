use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable rejection reason shared by validation, registration and the HTTP API.
///
/// The core only carries codes; user-facing text is produced by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    BadFormat,
    InvalidSection,
    InvalidNiche,
    InvalidLevel,
    InvalidTraySlot,
    InvalidSlot,
    InvalidFloorRange,
    InvalidQuantity,
    MissingField,
    DuplicateScanCode,
    DuplicateLocation,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 11] = [
        ReasonCode::BadFormat,
        ReasonCode::InvalidSection,
        ReasonCode::InvalidNiche,
        ReasonCode::InvalidLevel,
        ReasonCode::InvalidTraySlot,
        ReasonCode::InvalidSlot,
        ReasonCode::InvalidFloorRange,
        ReasonCode::InvalidQuantity,
        ReasonCode::MissingField,
        ReasonCode::DuplicateScanCode,
        ReasonCode::DuplicateLocation,
    ];

    /// Wire form, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::BadFormat => "BAD_FORMAT",
            ReasonCode::InvalidSection => "INVALID_SECTION",
            ReasonCode::InvalidNiche => "INVALID_NICHE",
            ReasonCode::InvalidLevel => "INVALID_LEVEL",
            ReasonCode::InvalidTraySlot => "INVALID_TRAY_SLOT",
            ReasonCode::InvalidSlot => "INVALID_SLOT",
            ReasonCode::InvalidFloorRange => "INVALID_FLOOR_RANGE",
            ReasonCode::InvalidQuantity => "INVALID_QUANTITY",
            ReasonCode::MissingField => "MISSING_FIELD",
            ReasonCode::DuplicateScanCode => "DUPLICATE_SCAN_CODE",
            ReasonCode::DuplicateLocation => "DUPLICATE_LOCATION",
        }
    }

    /// True for codes produced by the location grammar itself.
    pub fn is_location_error(&self) -> bool {
        matches!(
            self,
            ReasonCode::BadFormat
                | ReasonCode::InvalidSection
                | ReasonCode::InvalidNiche
                | ReasonCode::InvalidLevel
                | ReasonCode::InvalidTraySlot
                | ReasonCode::InvalidSlot
                | ReasonCode::InvalidFloorRange
        )
    }

    /// Short layout-independent description, used as the `message` of API rejections.
    pub fn summary(&self) -> &'static str {
        match self {
            ReasonCode::BadFormat => "Formato de ubicación inválido.",
            ReasonCode::InvalidSection => "Sección inválida.",
            ReasonCode::InvalidNiche => "Nicho inválido para esta sección.",
            ReasonCode::InvalidLevel => "Nivel inválido para esta sección.",
            ReasonCode::InvalidTraySlot => "Bandeja inválida para este nicho.",
            ReasonCode::InvalidSlot => "Espacio inválido para este nivel.",
            ReasonCode::InvalidFloorRange => "Ubicación de suelo fuera de rango.",
            ReasonCode::InvalidQuantity => "La cantidad debe ser un número entero mayor que cero.",
            ReasonCode::MissingField => "Todos los campos son obligatorios.",
            ReasonCode::DuplicateScanCode => "Este código de palet ya ha sido registrado.",
            ReasonCode::DuplicateLocation => "Esta ubicación ya está ocupada por otro palet.",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a 422 answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: ReasonCode,
    pub message: String,
}

impl From<ReasonCode> for Rejection {
    fn from(reason: ReasonCode) -> Self {
        Self {
            reason,
            message: reason.summary().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_form() {
        for code in ReasonCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn rejection_carries_code_and_summary() {
        let rejection = Rejection::from(ReasonCode::DuplicateLocation);
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["reason"], "DUPLICATE_LOCATION");
        assert!(!rejection.message.is_empty());
    }

    #[test]
    fn only_grammar_codes_are_location_errors() {
        assert!(ReasonCode::InvalidTraySlot.is_location_error());
        assert!(!ReasonCode::DuplicateLocation.is_location_error());
        assert!(!ReasonCode::MissingField.is_location_error());
    }
}
