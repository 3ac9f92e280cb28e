use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw Copper lead. Only the fields the shaper needs are typed; everything
/// else Copper sends is kept in `extra` so `/raw-leads` round-trips the full
/// record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: u64,
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub email: Option<LeadEmail>,
    pub date_created: i64,
    pub date_modified: i64,
    pub date_last_contacted: Option<i64>,
    pub interaction_count: Option<u64>,
    pub converted_at: Option<i64>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadEmail {
    pub email: String,
    pub category: Option<String>,
}

/// Key-value custom field as Copper stores it on a lead. The same shape is
/// used as a search predicate in lead queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub custom_field_definition_id: u64,
    pub value: Value,
}

/// Filter body for Copper's `leads/search`.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSearchFilter {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: &'static str,
    pub sort_direction: &'static str,
    pub minimum_interaction_date: i64,
    pub include_converted_leads: bool,
    pub custom_fields: Vec<CustomField>,
}

/// A raw Copper activity on a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub activity_type: ActivityTypeRef,
    pub activity_date: i64,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTypeRef {
    pub id: u64,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    User,
    System,
}

/// Activity type known to this application. The table below is fixed for the
/// Copper account this relay targets and is what `leads/{id}/activities`
/// requests and what activity labels resolve against.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KnownActivityType {
    pub id: u64,
    pub category: ActivityCategory,
    pub name: &'static str,
}

pub const ACTIVITY_TYPES: [KnownActivityType; 4] = [
    KnownActivityType {
        id: 0,
        category: ActivityCategory::User,
        name: "Note",
    },
    KnownActivityType {
        id: 54578,
        category: ActivityCategory::User,
        name: "Meeting",
    },
    KnownActivityType {
        id: 6,
        category: ActivityCategory::System,
        name: "Email",
    },
    KnownActivityType {
        id: 1977146,
        category: ActivityCategory::User,
        name: "Status Updated",
    },
];

pub fn activity_type_name(id: u64) -> Option<&'static str> {
    ACTIVITY_TYPES.iter().find(|t| t.id == id).map(|t| t.name)
}

/// Lead status as Copper's live catalog reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadStatus {
    pub id: u64,
    pub name: String,
}

/// A Unix timestamp paired with its human-readable rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStamp {
    #[serde(rename = "unixTimestamp")]
    pub unix_timestamp: i64,
    #[serde(rename = "niceDate")]
    pub nice_date: String,
}

impl DateStamp {
    /// Renders like JavaScript's `Date.toDateString()`, e.g. "Thu Jan 01 1970".
    pub fn from_unix(ts: i64) -> Self {
        let nice_date = DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.format("%a %b %d %Y").to_string())
            .unwrap_or_else(|| "Invalid Date".to_string());
        Self {
            unix_timestamp: ts,
            nice_date,
        }
    }
}

/// The reduced lead shape served to the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrettyLead {
    pub id: u64,
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "copperDateCreated")]
    pub date_created: DateStamp,
    #[serde(rename = "copperDateModified")]
    pub date_modified: DateStamp,
    #[serde(rename = "copperDateLastContacted")]
    pub date_last_contacted: Option<DateStamp>,
    #[serde(rename = "interactionCount")]
    pub interaction_count: Option<u64>,
    pub converted_at: Option<DateStamp>,
    pub funnel: Value,
}

/// A shaped activity attached to a lead, type resolved to its label.
#[derive(Debug, Clone, Serialize)]
pub struct ShapedActivity {
    pub id: u64,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub date: DateStamp,
    pub details: Option<String>,
}

/// A raw lead enriched with its shaped activities.
#[derive(Debug, Clone, Serialize)]
pub struct LeadWithActivities {
    #[serde(flatten)]
    pub lead: Lead,
    pub activities: Vec<ShapedActivity>,
}
