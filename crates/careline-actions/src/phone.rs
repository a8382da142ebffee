// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kenyan mobile number validation.

use std::sync::LazyLock;

use regex::Regex;

/// Ten ASCII digits starting with `07`.
pub const KENYAN_MOBILE_PATTERN: &str = r"^07[0-9]{8}$";

/// Reply sent whenever a phone slot fails validation.
pub const INVALID_PHONE_MESSAGE: &str =
    "Please enter a valid Kenyan phone number (e.g., 0712345678).";

static KENYAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KENYAN_MOBILE_PATTERN).unwrap());

/// Returns true when `phone` is an accepted mobile number.
pub fn is_valid_phone(phone: &str) -> bool {
    KENYAN_MOBILE.is_match(phone)
}
