use crate::shared::api_utils::post_json;
use contracts::domain::a001_pallet::aggregate::{Pallet, RegisterPalletDto};
use contracts::shared::layout::WarehouseLayout;
use contracts::shared::location::validate_location;
use contracts::shared::reason::{ReasonCode, Rejection};

/// Ответ сервера на регистрацию
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Registered(Pallet),
    Rejected(Rejection),
}

/// POST /api/a001/pallet
pub async fn register(dto: &RegisterPalletDto) -> Result<RegisterOutcome, String> {
    let resp = post_json("/api/a001/pallet", dto).await?;
    match resp.status {
        200 | 201 => Ok(RegisterOutcome::Registered(resp.json()?)),
        422 => Ok(RegisterOutcome::Rejected(resp.json()?)),
        status => Err(format!("HTTP {}", status)),
    }
}

/// Поля формы как их ввёл пользователь
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub scan_code: String,
    pub description: String,
    pub quantity: String,
    pub location: String,
}

impl RegistrationForm {
    /// Все поля заполнены
    pub fn is_complete(&self) -> bool {
        [&self.scan_code, &self.description, &self.quantity, &self.location]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    /// Нормализованный DTO. Количество должно быть целым числом.
    pub fn to_dto(&self) -> Result<RegisterPalletDto, ReasonCode> {
        if !self.is_complete() {
            return Err(ReasonCode::MissingField);
        }
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| ReasonCode::InvalidQuantity)?;
        Ok(RegisterPalletDto {
            scan_code: self.scan_code.clone(),
            description: self.description.clone(),
            quantity,
            location: self.location.clone(),
        }
        .normalized())
    }
}

/// Подсказка под полем ячейки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationHint {
    Free(String),
    Occupied { location: String, scan_code: String },
    /// `location` уже нормализована, чтобы текст причины нашёл секцию
    Invalid { location: String, reason: ReasonCode },
}

pub fn location_hint(layout: &WarehouseLayout, pallets: &[Pallet], raw: &str) -> Option<LocationHint> {
    let normalized = RegisterPalletDto {
        scan_code: String::new(),
        description: String::new(),
        quantity: 0,
        location: raw.to_string(),
    }
    .normalized()
    .location;
    if normalized.is_empty() {
        return None;
    }
    let hint = match validate_location(layout, &normalized) {
        Err(reason) => LocationHint::Invalid {
            location: normalized,
            reason,
        },
        Ok(location) => {
            let location = location.to_string();
            match pallets.iter().find(|p| p.location == location) {
                Some(p) => LocationHint::Occupied {
                    location,
                    scan_code: p.scan_code.clone(),
                },
                None => LocationHint::Free(location),
            }
        }
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(qty: &str) -> RegistrationForm {
        RegistrationForm {
            scan_code: " PALLET:abc ".into(),
            description: "Ladrillos".into(),
            quantity: qty.into(),
            location: "b3-1-5".into(),
        }
    }

    #[test]
    fn builds_normalized_dto() {
        let dto = form(" 40 ").to_dto().unwrap();
        assert_eq!(dto.scan_code, "PALLET:abc");
        assert_eq!(dto.quantity, 40);
        assert_eq!(dto.location, "B3-1-5");
    }

    #[test]
    fn quantity_must_be_an_integer() {
        assert_eq!(form("2.5").to_dto(), Err(ReasonCode::InvalidQuantity));
        assert_eq!(form("diez").to_dto(), Err(ReasonCode::InvalidQuantity));
    }

    #[test]
    fn blank_fields_are_missing() {
        let mut f = form("1");
        f.description = "   ".into();
        assert!(!f.is_complete());
        assert_eq!(f.to_dto(), Err(ReasonCode::MissingField));
    }

    #[test]
    fn hint_follows_layout_and_occupancy() {
        let layout = WarehouseLayout::default();
        let taken = Pallet::new("S1".into(), "Cemento".into(), 3, "A1-1-1".into());
        let pallets = vec![taken];

        assert_eq!(location_hint(&layout, &pallets, "  "), None);
        assert_eq!(
            location_hint(&layout, &pallets, "d7"),
            Some(LocationHint::Free("D7".into()))
        );
        assert_eq!(
            location_hint(&layout, &pallets, "LOC:A1-1-1"),
            Some(LocationHint::Occupied {
                location: "A1-1-1".into(),
                scan_code: "S1".into()
            })
        );
        assert_eq!(
            location_hint(&layout, &pallets, "C2-1-5"),
            Some(LocationHint::Invalid {
                location: "C2-1-5".into(),
                reason: ReasonCode::InvalidTraySlot
            })
        );
    }

    #[test]
    fn invalid_hint_carries_normalized_location() {
        let layout = WarehouseLayout::default();
        let hint = location_hint(&layout, &[], " a4-1-1 ");
        assert_eq!(
            hint,
            Some(LocationHint::Invalid {
                location: "A4-1-1".into(),
                reason: ReasonCode::InvalidNiche
            })
        );
        let Some(LocationHint::Invalid { location, reason }) = hint else {
            unreachable!()
        };
        assert_eq!(
            crate::shared::reason_text::reason_text(reason, &location, &layout),
            "Para la Sección A, el nicho debe ser un número del 1 al 3."
        );
    }
}
