use potluck_domain::Money;
use serde::{Deserialize, Serialize};

/// Event record as stored by the event API, with the host's auth id in
/// `creator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_type: EventType,
    pub creator: String,
    pub host_name: String,
    #[serde(default)]
    pub host_contact: Option<String>,
    #[serde(default)]
    pub invitees: Vec<Invitee>,
    #[serde(default)]
    pub needs: Vec<Need>,
    #[serde(default, rename = "languagePreference")]
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Eatery,
    Trip,
    Bizmeet,
    Protest,
}

impl EventType {
    /// Business meetings carry an agenda instead of a needs list.
    pub fn tracks_costs(self) -> bool {
        !matches!(self, EventType::Bizmeet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitee {
    pub name: String,
    pub email_or_phone: String,
    #[serde(default)]
    pub invitation: InvitationStatus,
    #[serde(default)]
    pub reminder_preference: Option<ReminderChannel>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Sent,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Email,
    Sms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Need {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub item: String,
    #[serde(default)]
    pub cost: Option<Money>,
    #[serde(default)]
    pub status: NeedStatus,
    #[serde(default)]
    pub claimed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedStatus {
    #[default]
    Open,
    Claimed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}
