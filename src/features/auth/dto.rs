use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::Session;

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseDto {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<Session> for MeResponseDto {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.user_id,
            display_name: session.display_name,
            email: session.email,
        }
    }
}
