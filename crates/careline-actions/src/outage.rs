// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outage reporting.

use careline_core::{CarelineError, DomainStore, NewLogEntry, NewOutage};
use tracing::info;

use crate::context::{ActionContext, ActionOutcome, filled};

pub const EMPTY_DESCRIPTION: &str = "no description provided";

/// Resolves a free-text description: the slot value, else the lowercased
/// latest utterance, else a placeholder.
pub(crate) fn describe(slot_value: &Option<String>, ctx: &ActionContext) -> String {
    match filled(slot_value) {
        Some(text) => text.to_string(),
        None => {
            let latest = ctx.latest_text_lower();
            if latest.is_empty() {
                EMPTY_DESCRIPTION.to_string()
            } else {
                latest
            }
        }
    }
}

/// Records an open-ended outage and confirms it back to the user.
pub async fn report_outage(
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    let outage = NewOutage::starting_now(&describe(&ctx.slots.outage_description, ctx));
    let audit = NewLogEntry::info(format!("Outage reported: {}", outage.description))
        .with_service("report_outage");

    let created = store.report_outage(&outage, &audit).await?;
    info!(sender = %ctx.sender_id, outage_id = created.id, "outage reported");

    Ok(ActionOutcome::reply(format!(
        "Outage reported: {}. We'll investigate soon!",
        created.description
    )))
}
