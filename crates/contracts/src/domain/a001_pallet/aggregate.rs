use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};
use crate::shared::layout::WarehouseLayout;
use crate::shared::location::{validate_location, Location};
use crate::shared::reason::ReasonCode;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор палета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalletId(pub Uuid);

impl PalletId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for PalletId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PalletId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Палет, размещённый в ячейке склада.
///
/// Создаётся регистрацией и больше не изменяется; удаление освобождает ячейку.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pallet {
    pub id: PalletId,

    /// Код сканирования (содержимое QR), уникален
    #[serde(rename = "scanCode")]
    pub scan_code: String,

    pub description: String,
    pub quantity: i64,

    /// Каноническая ячейка (`A2-3-1`, `D5`), уникальна
    pub location: String,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Pallet {
    /// Создать новый палет для вставки в хранилище
    pub fn new(scan_code: String, description: String, quantity: i64, location: String) -> Self {
        Self {
            id: PalletId::new_v4(),
            scan_code,
            description,
            quantity,
            location,
            metadata: EntityMetadata::new(),
        }
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Форма регистрации палета
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPalletDto {
    #[serde(rename = "scanCode")]
    pub scan_code: String,
    pub description: String,
    pub quantity: i64,
    pub location: String,
}

impl RegisterPalletDto {
    /// Нормализация ввода: обрезка пробелов, ячейка в верхнем регистре.
    /// Отсканированный QR ячейки (`LOC:A2-3-1`) принимается как сама ячейка.
    pub fn normalized(&self) -> Self {
        let location = self.location.trim().to_uppercase();
        let location = match crate::shared::qr::parse_payload(&location) {
            Some(crate::shared::qr::QrPayload::Location(loc)) => loc,
            _ => location,
        };
        Self {
            scan_code: self.scan_code.trim().to_string(),
            description: self.description.trim().to_string(),
            quantity: self.quantity,
            location,
        }
    }

    /// Проверка полей и ячейки. Ожидает уже нормализованный DTO.
    pub fn validate(&self, layout: &WarehouseLayout) -> Result<Location, ReasonCode> {
        if self.scan_code.is_empty() || self.description.is_empty() || self.location.is_empty() {
            return Err(ReasonCode::MissingField);
        }
        if self.quantity < 1 {
            return Err(ReasonCode::InvalidQuantity);
        }
        validate_location(layout, &self.location)
    }

    /// Палет для вставки: ячейка хранится в канонической форме
    pub fn into_pallet(self, location: &Location) -> Pallet {
        Pallet::new(self.scan_code, self.description, self.quantity, location.to_string())
    }
}

/// Тело `POST /api/a001/pallet` в том виде, в каком оно пришло.
///
/// Поля читаются как произвольный JSON, так что любой ввод получает код
/// причины отказа, а не ошибку десериализации.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterPalletRequest {
    #[serde(default, rename = "scanCode")]
    pub scan_code: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

impl RegisterPalletRequest {
    /// Отсутствующее поле даёт `MissingField`, нецелое количество `InvalidQuantity`.
    /// Пустые строки и количество меньше 1 ловит `RegisterPalletDto::validate`.
    pub fn into_dto(self) -> Result<RegisterPalletDto, ReasonCode> {
        let scan_code = text_field(self.scan_code)?;
        let description = text_field(self.description)?;
        let location = text_field(self.location)?;
        let quantity = match self.quantity {
            None => return Err(ReasonCode::MissingField),
            Some(value) => value.as_i64().ok_or(ReasonCode::InvalidQuantity)?,
        };
        Ok(RegisterPalletDto {
            scan_code,
            description,
            quantity,
            location,
        })
    }
}

/// Строка как есть; числовой код сканера принимается в десятичной записи
fn text_field(value: Option<serde_json::Value>) -> Result<String, ReasonCode> {
    match value {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ReasonCode::MissingField),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(scan: &str, desc: &str, qty: i64, loc: &str) -> RegisterPalletDto {
        RegisterPalletDto {
            scan_code: scan.into(),
            description: desc.into(),
            quantity: qty,
            location: loc.into(),
        }
    }

    #[test]
    fn pallet_id_parses_its_own_string_form() {
        let id = PalletId::new_v4();
        assert_eq!(PalletId::from_string(&id.as_string()), Ok(id));
        assert!(PalletId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn normalization_trims_and_uppercases() {
        let n = dto("  PALLET:1 ", " Tornillos ", 5, " a2-3-1 ").normalized();
        assert_eq!(n.scan_code, "PALLET:1");
        assert_eq!(n.description, "Tornillos");
        assert_eq!(n.location, "A2-3-1");
    }

    #[test]
    fn scanned_location_qr_is_unwrapped() {
        let n = dto("X", "Y", 1, "loc:d5").normalized();
        assert_eq!(n.location, "D5");
    }

    #[test]
    fn validation_order() {
        let layout = WarehouseLayout::default();
        assert_eq!(dto("", "d", 1, "A1-1-1").validate(&layout), Err(ReasonCode::MissingField));
        assert_eq!(dto("s", "d", 1, "").validate(&layout), Err(ReasonCode::MissingField));
        assert_eq!(dto("s", "d", 0, "A1-1-1").validate(&layout), Err(ReasonCode::InvalidQuantity));
        assert_eq!(dto("s", "d", -4, "nope").validate(&layout), Err(ReasonCode::InvalidQuantity));
        assert_eq!(dto("s", "d", 1, "A9-1-1").validate(&layout), Err(ReasonCode::InvalidNiche));
        assert!(dto("s", "d", 1, "D28").validate(&layout).is_ok());
    }

    fn request(json: serde_json::Value) -> Result<RegisterPalletDto, ReasonCode> {
        serde_json::from_value::<RegisterPalletRequest>(json).unwrap().into_dto()
    }

    #[test]
    fn wire_request_maps_bad_input_to_reasons() {
        let ok = request(serde_json::json!({
            "scanCode": "S1", "description": "Cajas", "quantity": 4, "location": "d5"
        }));
        assert_eq!(ok, Ok(dto("S1", "Cajas", 4, "d5")));

        let non_integer = request(serde_json::json!({
            "scanCode": "S1", "description": "Cajas", "quantity": 2.5, "location": "D5"
        }));
        assert_eq!(non_integer, Err(ReasonCode::InvalidQuantity));

        let quoted = request(serde_json::json!({
            "scanCode": "S1", "description": "Cajas", "quantity": "5", "location": "D5"
        }));
        assert_eq!(quoted, Err(ReasonCode::InvalidQuantity));

        let no_scan_code = request(serde_json::json!({
            "description": "Cajas", "quantity": 5, "location": "D5"
        }));
        assert_eq!(no_scan_code, Err(ReasonCode::MissingField));

        let null_quantity = request(serde_json::json!({
            "scanCode": "S1", "description": "Cajas", "quantity": null, "location": "D5"
        }));
        assert_eq!(null_quantity, Err(ReasonCode::MissingField));
    }

    #[test]
    fn numeric_scan_code_is_read_as_text() {
        let dto = request(serde_json::json!({
            "scanCode": 7501234, "description": "Cajas", "quantity": 1, "location": "D5"
        }))
        .unwrap();
        assert_eq!(dto.scan_code, "7501234");
    }

    #[test]
    fn pallet_serializes_camel_case() {
        let pallet = dto("S1", "Cajas", 3, "A1-1-1").into_pallet(&Location::Slot {
            section: 'A',
            niche: 1,
            level: 1,
            slot: 1,
        });
        let json = serde_json::to_value(&pallet).unwrap();
        assert_eq!(json["scanCode"], "S1");
        assert_eq!(json["location"], "A1-1-1");
        assert!(json.get("createdAt").is_some());
        let back: Pallet = serde_json::from_value(json).unwrap();
        assert_eq!(back, pallet);
    }
}
