use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;
use crate::shared::qr::pallet_payload;

/// Уникальный идентификатор QR-кода палета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalletQrId(pub Uuid);

impl PalletQrId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for PalletQrId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PalletQrId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Заранее напечатанный QR-код палета (`PALLET:<uuid>`).
/// `is_used` выставляется, когда палет с этим кодом зарегистрирован.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletQr {
    pub id: PalletQrId,
    pub payload: String,
    #[serde(rename = "isUsed")]
    pub is_used: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PalletQr {
    /// Новый неиспользованный код со случайным UUID
    pub fn new_random() -> Self {
        Self {
            id: PalletQrId::new_v4(),
            payload: pallet_payload(Uuid::new_v4()),
            is_used: false,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::qr::{parse_payload, QrPayload};

    #[test]
    fn random_codes_are_unique_and_prefixed() {
        let a = PalletQr::new_random();
        let b = PalletQr::new_random();
        assert_ne!(a.payload, b.payload);
        assert!(!a.is_used);
        assert!(matches!(parse_payload(&a.payload), Some(QrPayload::Pallet(_))));
    }
}
