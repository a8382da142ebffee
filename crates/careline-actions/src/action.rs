// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of dialogue actions and their dispatcher.

use std::str::FromStr;

use careline_core::{CarelineError, DomainStore};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::context::{ActionContext, ActionOutcome};
use crate::{billing, info, outage, signup, support};

/// A custom action the dialogue engine can ask us to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum DialogueAction {
    #[strum(serialize = "action_list_commands")]
    ListCommands,
    #[strum(serialize = "action_check_bill")]
    CheckBill,
    #[strum(serialize = "action_report_outage")]
    ReportOutage,
    #[strum(serialize = "action_signup")]
    Signup,
    #[strum(serialize = "action_payment_status")]
    PaymentStatus,
    #[strum(serialize = "action_support_ticket")]
    SupportTicket,
    #[strum(serialize = "action_service_plans")]
    ServicePlans,
    #[strum(serialize = "action_about")]
    About,
}

impl DialogueAction {
    /// Resolves an engine action name, failing with `NotFound` for names we
    /// do not implement.
    pub fn from_name(name: &str) -> Result<Self, CarelineError> {
        Self::from_str(name).map_err(|_| CarelineError::NotFound {
            entity: "action".to_string(),
            key: name.to_string(),
        })
    }

    /// The engine-facing action name.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Runs one action to completion.
pub async fn run(
    action: DialogueAction,
    ctx: &ActionContext,
    store: &dyn DomainStore,
) -> Result<ActionOutcome, CarelineError> {
    debug!(action = %action, sender = %ctx.sender_id, "running dialogue action");
    match action {
        DialogueAction::ListCommands => Ok(info::list_commands()),
        DialogueAction::CheckBill => billing::check_bill(ctx, store).await,
        DialogueAction::ReportOutage => outage::report_outage(ctx, store).await,
        DialogueAction::Signup => signup::signup(ctx, store).await,
        DialogueAction::PaymentStatus => billing::payment_status(ctx, store).await,
        DialogueAction::SupportTicket => support::support_ticket(ctx, store).await,
        DialogueAction::ServicePlans => Ok(info::service_plans()),
        DialogueAction::About => Ok(info::about()),
    }
}
