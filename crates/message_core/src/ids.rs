//! Identifier and clock helpers
//!
//! Message and branch ids are opaque strings backed by UUID v4. Branch ids
//! carry a `branch-` prefix so the two never collide in logs or snapshots.

use chrono::Utc;
use uuid::Uuid;

/// The implicit root timeline present from construction.
pub const MAIN_BRANCH_ID: &str = "main";

/// Generate a fresh message id.
pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a fresh branch id.
pub fn new_branch_id() -> String {
    format!("branch-{}", Uuid::new_v4())
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
