// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static informational replies.

use crate::context::ActionOutcome;

pub const COMMANDS_MESSAGE: &str = "Please select an option:\n\
1. Check My Bill\n\
2. Report Outage\n\
3. Sign Up\n\
4. Payment Status\n\
5. Support Ticket\n\
6. Service Plans\n\
7. About\n\
8. Goodbye\n\
(Or type the number/command, e.g., '1' or 'check my bill')";

pub const SERVICE_PLANS_MESSAGE: &str = "Bayzinet Service Plans:\n\
1. Basic - 500 KES/mo (5 Mbps)\n\
2. Pro - 1000 KES/mo (10 Mbps)\n\
3. Premium - 2000 KES/mo (20 Mbps)\n\
Reply with plan number to proceed!";

pub const ABOUT_MESSAGE: &str = "About Bayzinet Customer Care Chatbot:\n\
- Available on WhatsApp and web chat.\n\
- Contact: 0741091661\n\
Happy to assist!";

pub fn list_commands() -> ActionOutcome {
    ActionOutcome::reply(COMMANDS_MESSAGE)
}

pub fn service_plans() -> ActionOutcome {
    ActionOutcome::reply(SERVICE_PLANS_MESSAGE)
}

pub fn about() -> ActionOutcome {
    ActionOutcome::reply(ABOUT_MESSAGE)
}
