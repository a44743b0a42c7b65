use reqwest::multipart::Form;
use serde::Serialize;
use shelf::{User, UserStatus};

use crate::client::{json_part, ApiClient};
use crate::error::ApiError;
use crate::request::{NewUser, PasswordChange, ProfileUpdate};

pub const USER_LIST: &str = "/api/admin/userList";
pub const CHANGE_USER_STATUS: &str = "/api/admin/changeStatus";
pub const GET_USER: &str = "/api/admin/getUserById";
pub const ADD_USER: &str = "/api/admin/addUser";
pub const CURRENT_USER: &str = "/api/user/getCurrentUser";
pub const UPDATE_INFO: &str = "/api/user/updateInfo";

/// Name of the JSON part carrying profile changes.
const UPDATE_DATA: &str = "updateData";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserStatusForm<'a> {
    user_id: &'a str,
    status: &'a UserStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdForm<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
struct Empty {}

impl ApiClient {
    pub async fn change_user_status(
        &self,
        user_id: &str,
        status: &UserStatus,
    ) -> Result<Option<String>, ApiError> {
        tracing::info!("Setting user {user_id} to {}", status.as_str());
        self.ack_form(CHANGE_USER_STATUS, &UserStatusForm { user_id, status })
            .await
    }

    pub async fn user_by_id(&self, user_id: &str) -> Result<User, ApiError> {
        self.post_form(GET_USER, &UserIdForm { user_id }).await
    }

    /// Create an account (administrators).
    pub async fn add_user(&self, user: &NewUser) -> Result<Option<String>, ApiError> {
        user.validate()?;
        tracing::info!("Adding user {:?}", user.username);
        self.ack_json(ADD_USER, user).await
    }

    /// The signed-in account.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.post_json(CURRENT_USER, &Empty {}).await
    }

    pub async fn update_profile(&self, profile: &ProfileUpdate) -> Result<Option<String>, ApiError> {
        profile.validate()?;
        let form = Form::new().part(UPDATE_DATA, json_part(profile)?);
        self.ack_multipart(UPDATE_INFO, form).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>, ApiError> {
        change.validate()?;
        let form = Form::new().part(UPDATE_DATA, json_part(change)?);
        self.ack_multipart(UPDATE_INFO, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_form_fields() {
        let status = UserStatus::Locked;
        let form = UserStatusForm {
            user_id: "3",
            status: &status,
        };
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            json!({ "userId": "3", "status": "LOCKED" })
        );
    }
}
