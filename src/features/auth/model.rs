use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ANONYMOUS_REPORTER_ID, ANONYMOUS_REPORTER_NAME};

/// Identity of the signed-in user, resolved from the bearer token on every
/// request and passed explicitly to the services that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Name recorded on a report when the form leaves it blank
    pub fn reporter_name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_REPORTER_NAME)
            .to_string()
    }

    pub fn reporter_email(&self) -> String {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(ANONYMOUS_REPORTER_ID)
            .to_string()
    }

    pub fn reporter_id(&self) -> String {
        if self.user_id.is_empty() {
            ANONYMOUS_REPORTER_ID.to_string()
        } else {
            self.user_id.clone()
        }
    }
}
