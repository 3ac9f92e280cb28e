use chrono::Utc;
use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::copper::client::{CopperClient, CopperError, Result};
use crate::models::{
    activity_type_name, Activity, CustomField, DateStamp, Lead, LeadSearchFilter,
    LeadWithActivities, PrettyLead, ShapedActivity,
};

/// Leads count as "recently interacted" when contacted within the last 60 days.
const RECENT_WINDOW_SECS: i64 = 60 * 24 * 60 * 60;

const PAGE_SIZE: u32 = 100;

/// Searches Copper for tracked leads interacted with inside the recency
/// window, least-inactive first, converted leads included.
pub async fn recently_interacted_leads(
    client: &CopperClient,
    config: &Config,
) -> Result<Vec<Lead>> {
    let interaction_floor = Utc::now().timestamp() - RECENT_WINDOW_SECS;

    let filter = LeadSearchFilter {
        page_number: 1,
        page_size: PAGE_SIZE,
        sort_by: "inactive_days",
        sort_direction: "asc",
        minimum_interaction_date: interaction_floor,
        include_converted_leads: true,
        custom_fields: vec![CustomField {
            custom_field_definition_id: config.lead_tracking_field_id,
            value: Value::Bool(true),
        }],
    };

    let leads = client.list_leads(&filter).await?;
    debug!("Found {} recently interacted leads", leads.len());

    Ok(leads)
}

/// Reduces one raw lead to the client-facing shape. Pure so the mapping is
/// testable without a Copper account.
pub fn pretty_lead(lead: &Lead, marketing_source_field_id: u64) -> PrettyLead {
    let funnel = lead
        .custom_fields
        .iter()
        .find(|field| field.custom_field_definition_id == marketing_source_field_id)
        .map(|field| field.value.clone())
        .filter(|value| !value.is_null())
        .unwrap_or_else(|| Value::String("N/A".to_string()));

    PrettyLead {
        id: lead.id,
        name: lead.name.clone(),
        company: lead.company_name.clone(),
        title: lead.title.clone(),
        status: lead.status.clone(),
        email: lead.email.as_ref().map(|e| e.email.clone()),
        date_created: DateStamp::from_unix(lead.date_created),
        date_modified: DateStamp::from_unix(lead.date_modified),
        date_last_contacted: lead.date_last_contacted.map(DateStamp::from_unix),
        interaction_count: lead.interaction_count,
        converted_at: lead.converted_at.map(DateStamp::from_unix),
        funnel,
    }
}

pub async fn pretty_recently_interacted_leads(
    client: &CopperClient,
    config: &Config,
) -> Result<Vec<PrettyLead>> {
    let leads = recently_interacted_leads(client, config).await?;

    Ok(leads
        .iter()
        .map(|lead| pretty_lead(lead, config.marketing_source_field_id))
        .collect())
}

/// Resolves activity labels against the fixed type table. An id outside the
/// table is a hard error; partial lead enrichment is never served.
pub fn shape_activities(activities: &[Activity]) -> Result<Vec<ShapedActivity>> {
    activities
        .iter()
        .map(|activity| {
            let type_name = activity_type_name(activity.activity_type.id)
                .ok_or(CopperError::UnknownActivityType(activity.activity_type.id))?;

            Ok(ShapedActivity {
                id: activity.id,
                type_name,
                date: DateStamp::from_unix(activity.activity_date),
                details: activity.details.clone(),
            })
        })
        .collect()
}

/// Pairs each lead with its fetched activities, shaped. The i-th activity
/// batch belongs to the i-th lead; output order is input order.
pub fn attach_activities(
    leads: Vec<Lead>,
    activities_per_lead: Vec<Vec<Activity>>,
) -> Result<Vec<LeadWithActivities>> {
    leads
        .into_iter()
        .zip(activities_per_lead)
        .map(|(lead, activities)| {
            Ok(LeadWithActivities {
                activities: shape_activities(&activities)?,
                lead,
            })
        })
        .collect()
}

/// Fetches each lead's activities concurrently and attaches them in shaped
/// form. Lead ordering is preserved; any single failed fetch fails the whole
/// aggregate.
pub async fn recently_interacted_leads_with_activities(
    client: &CopperClient,
    config: &Config,
) -> Result<Vec<LeadWithActivities>> {
    let leads = recently_interacted_leads(client, config).await?;

    let fetches = leads.iter().map(|lead| client.list_lead_activities(lead.id));
    let activities_per_lead = try_join_all(fetches).await?;

    attach_activities(leads, activities_per_lead)
}
