use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;
use crate::shared::location::Location;
use crate::shared::qr::location_payload;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор QR-кода ячейки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationQrId(pub Uuid);

impl LocationQrId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for LocationQrId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LocationQrId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// QR-код ячейки склада (`LOC:<ячейка>`), одна запись на ячейку
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQr {
    pub id: LocationQrId,
    pub location: String,
    pub payload: String,
    pub section: char,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl LocationQr {
    pub fn new(location: &Location) -> Self {
        let location_str = location.to_string();
        Self {
            id: LocationQrId::new_v4(),
            payload: location_payload(&location_str),
            location: location_str,
            section: location.section(),
            created_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Без `locations` генерируются коды для всех ячеек склада
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateLocationQrRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateLocationQrResponse {
    pub created: usize,
    pub existing: usize,
}

/// Выбор для печати: все коды, одна секция или явный список ячеек
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintLocationQrRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_location_qr_derives_payload_and_section() {
        let qr = LocationQr::new(&Location::Floor { section: 'D', spot: 7 });
        assert_eq!(qr.location, "D7");
        assert_eq!(qr.payload, "LOC:D7");
        assert_eq!(qr.section, 'D');
    }

    #[test]
    fn empty_generate_request_means_everything() {
        let req: GenerateLocationQrRequest = serde_json::from_str("{}").unwrap();
        assert!(req.locations.is_none());
    }
}
