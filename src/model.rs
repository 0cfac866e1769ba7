//! Session state held by the dashboard.
//!
//! The server publishes partial updates: each payload may carry the
//! participant list, the level list, or both. [`DashboardSnapshot`] keeps the
//! latest value of each and replaces them wholesale.

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

/// Highest level reading the server reports.
pub const MAX_LEVEL: i64 = 8;

/// A volume-intensity sample in `0..=MAX_LEVEL`.
///
/// Positionally tied to the participant at the same index.
pub type LevelReading = i64;

/// One connected session member as published by the server.
///
/// Every field defaults when missing so that a sparse record still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Participant {
    /// Display name, at most 16 characters. May carry surrounding whitespace.
    pub name: String,
    /// Free-text city.
    pub city: String,
    /// Country identifier.
    #[serde(rename = "country")]
    pub country_code: i64,
    /// 0 = unspecified, 1 = beginner, 2 = intermediate, 3 = expert.
    #[serde(rename = "skillLevel")]
    pub skill_level: i64,
    /// Index into the instrument table.
    #[serde(rename = "instrument")]
    pub instrument_id: i64,
}

impl Participant {
    /// Name with surrounding whitespace removed, or `None` if nothing is left.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// One inbound payload. Absent fields leave the snapshot untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotUpdate {
    /// Replacement participant list.
    #[serde(rename = "clients")]
    pub participants: Option<Vec<Participant>>,
    /// Replacement level list.
    pub levels: Option<Vec<LevelReading>>,
}

impl SnapshotUpdate {
    /// Decodes a JSON payload.
    ///
    /// The payload and every client record must be JSON objects. serde would
    /// otherwise accept arrays and fill fields by position.
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(payload)?;
        let Some(fields) = value.as_object() else {
            return Err(serde_json::Error::custom("update must be a JSON object"));
        };
        if let Some(Value::Array(clients)) = fields.get("clients") {
            if clients.iter().any(|client| !client.is_object()) {
                return Err(serde_json::Error::custom("each client must be a JSON object"));
            }
        }
        serde_json::from_value(value)
    }
}

/// Latest known participants and levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    participants: Vec<Participant>,
    levels: Vec<LevelReading>,
}

impl DashboardSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces each field present in `update`; absent fields are kept.
    pub fn apply_update(&mut self, update: SnapshotUpdate) {
        if let Some(participants) = update.participants {
            self.participants = participants;
        }
        if let Some(levels) = update.levels {
            self.levels = levels;
        }
    }

    /// Participants in server order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Raw level list in server order.
    pub fn levels(&self) -> &[LevelReading] {
        &self.levels
    }

    /// Level for the participant at `index`, or 0 if the list is shorter.
    pub fn level_for(&self, index: usize) -> LevelReading {
        self.levels.get(index).copied().unwrap_or(0)
    }

    /// Participants that have a non-blank name, paired with their original index.
    pub fn visible_participants(&self) -> impl Iterator<Item = (usize, &Participant)> {
        self.participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.display_name().is_some())
    }

    /// True when no participant would produce a row.
    pub fn has_no_visible_participants(&self) -> bool {
        self.visible_participants().next().is_none()
    }
}
