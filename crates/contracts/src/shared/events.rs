use serde::{Deserialize, Serialize};

/// Change notification published by the pallet store.
///
/// Every event means "the record set changed, re-fetch"; `Resync` is sent to
/// subscribers that fell behind and missed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreEvent {
    Inserted {
        #[serde(rename = "scanCode")]
        scan_code: String,
        location: String,
    },
    Removed {
        #[serde(rename = "scanCode")]
        scan_code: String,
        location: String,
    },
    Resync,
}

impl StoreEvent {
    /// SSE event names, one per variant
    pub const KINDS: [&'static str; 3] = ["inserted", "removed", "resync"];

    pub fn kind(&self) -> &'static str {
        match self {
            StoreEvent::Inserted { .. } => "inserted",
            StoreEvent::Removed { .. } => "removed",
            StoreEvent::Resync => "resync",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_shape() {
        let event = StoreEvent::Inserted {
            scan_code: "S1".into(),
            location: "A1-1-1".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "inserted");
        assert_eq!(json["scanCode"], "S1");
        assert_eq!(json["location"], "A1-1-1");

        let resync = serde_json::to_string(&StoreEvent::Resync).unwrap();
        assert_eq!(resync, r#"{"kind":"resync"}"#);
        assert_eq!(StoreEvent::Resync.kind(), "resync");
    }

    #[test]
    fn kinds_cover_every_variant() {
        let events = [
            StoreEvent::Inserted { scan_code: "S".into(), location: "D1".into() },
            StoreEvent::Removed { scan_code: "S".into(), location: "D1".into() },
            StoreEvent::Resync,
        ];
        let kinds: Vec<&str> = events.iter().map(StoreEvent::kind).collect();
        assert_eq!(kinds, StoreEvent::KINDS);
    }
}
