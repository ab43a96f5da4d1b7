//! Scan-code payloads encoded into printed QR labels.

use uuid::Uuid;

pub const LOCATION_PREFIX: &str = "LOC:";
pub const PALLET_PREFIX: &str = "PALLET:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    Location(String),
    Pallet(String),
}

pub fn location_payload(location: &str) -> String {
    format!("{}{}", LOCATION_PREFIX, location)
}

pub fn pallet_payload(id: Uuid) -> String {
    format!("{}{}", PALLET_PREFIX, id)
}

/// Recognises a prefixed payload. Anything else (including an empty body) is `None`.
pub fn parse_payload(raw: &str) -> Option<QrPayload> {
    if let Some(rest) = raw.strip_prefix(LOCATION_PREFIX) {
        return (!rest.is_empty()).then(|| QrPayload::Location(rest.to_string()));
    }
    if let Some(rest) = raw.strip_prefix(PALLET_PREFIX) {
        return (!rest.is_empty()).then(|| QrPayload::Pallet(rest.to_string()));
    }
    None
}

/// Caption printed under the code
pub fn payload_label(raw: &str) -> &str {
    raw.strip_prefix(LOCATION_PREFIX)
        .or_else(|| raw.strip_prefix(PALLET_PREFIX))
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_are_prefixed() {
        assert_eq!(location_payload("A2-3-1"), "LOC:A2-3-1");
        let id = Uuid::new_v4();
        assert_eq!(pallet_payload(id), format!("PALLET:{}", id));
    }

    #[test]
    fn parse_recognises_both_kinds() {
        assert_eq!(parse_payload("LOC:D5"), Some(QrPayload::Location("D5".into())));
        assert_eq!(parse_payload("PALLET:abc"), Some(QrPayload::Pallet("abc".into())));
        assert_eq!(parse_payload("LOC:"), None);
        assert_eq!(parse_payload("loc:D5"), None);
        assert_eq!(parse_payload("1234"), None);
    }

    #[test]
    fn label_strips_prefix() {
        assert_eq!(payload_label("LOC:A1-1-1"), "A1-1-1");
        assert_eq!(payload_label("PALLET:xyz"), "xyz");
        assert_eq!(payload_label("plain"), "plain");
    }
}
