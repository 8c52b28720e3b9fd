//! Activity event types: the queue message produced at mutation time.

use serde::{Deserialize, Serialize};

/// Entity kinds that produce activity entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Member,
    Hot,
    Sermon,
    Event,
    Announcement,
    PrayerRequest,
    Testimony,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Member => "MEMBER",
            ActivityKind::Hot => "HOT",
            ActivityKind::Sermon => "SERMON",
            ActivityKind::Event => "EVENT",
            ActivityKind::Announcement => "ANNOUNCEMENT",
            ActivityKind::PrayerRequest => "PRAYER_REQUEST",
            ActivityKind::Testimony => "TESTIMONY",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMBER" => Ok(ActivityKind::Member),
            "HOT" => Ok(ActivityKind::Hot),
            "SERMON" => Ok(ActivityKind::Sermon),
            "EVENT" => Ok(ActivityKind::Event),
            "ANNOUNCEMENT" => Ok(ActivityKind::Announcement),
            "PRAYER_REQUEST" => Ok(ActivityKind::PrayerRequest),
            "TESTIMONY" => Ok(ActivityKind::Testimony),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}

/// What happened to the entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    New,
    Updated,
    Deleted,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::New => "NEW",
            ActivityAction::Updated => "UPDATED",
            ActivityAction::Deleted => "DELETED",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(ActivityAction::New),
            "UPDATED" => Ok(ActivityAction::Updated),
            "DELETED" => Ok(ActivityAction::Deleted),
            _ => Err(format!("Unknown activity action: {}", s)),
        }
    }
}

/// Snapshot of the mutated entity, reduced to the fields message rendering
/// needs. A closed record with explicit optionals rather than a free-form
/// map; unknown fields from foreign producers are ignored on decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMeta {
    /// Person name (members, prayer requests, testimonies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Account display name (HoT records).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Content title (sermons, events, announcements).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When set, rendering must not reveal any name from this snapshot.
    #[serde(default)]
    pub anonymous: bool,
}

impl ActivityMeta {
    pub fn with_full_name(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }
}

/// A mutation notification in flight towards the activity log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub action: ActivityAction,
    #[serde(default)]
    pub meta: ActivityMeta,
}

impl ActivityEvent {
    pub fn new(kind: ActivityKind, action: ActivityAction, meta: ActivityMeta) -> Self {
        Self { kind, action, meta }
    }
}
