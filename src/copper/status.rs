use crate::copper::client::{CopperError, Result};
use crate::models::LeadStatus;

/// Maps the web client's status codes (0-6) onto the status names configured
/// in this Copper account. Adjacent codes share a target on purpose: the
/// client distinguishes finer funnel stages than Copper does.
pub fn target_status_name(status_code: u8) -> Option<&'static str> {
    match status_code {
        0 | 1 => Some("4. New Lead"),
        2 | 3 => Some("3. Warm - Marketing Qualified Lead"),
        4 | 5 => Some("2. Hot - Sales Ready Lead"),
        6 => Some("1. Piping Hot - Sales Qualified Lead"),
        _ => None,
    }
}

/// Looks a target status name up in the live catalog. Status ids are
/// account-specific, so only the names are fixed in code.
pub fn resolve_status_id(target_name: &'static str, statuses: &[LeadStatus]) -> Result<u64> {
    statuses
        .iter()
        .find(|status| status.name == target_name)
        .map(|status| status.id)
        .ok_or(CopperError::UnknownStatusName(target_name))
}
