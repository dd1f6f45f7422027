use itaudit_model::{
    AuthUserPatch, ComputerPatch, Credentials, NetworkDevicePatch, NewAuthUser, NewComputer,
    NewNetworkDevice, NewUser, RecordId, SiteContentUpdate, UserPatch,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DispatchError;

/// One request to the dispatcher endpoint.
///
/// The wire shape is `{action, data?, id?, comment?}`; `action` selects the
/// variant and the remaining keys become its fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    AddComputer { data: NewComputer },
    GetComputers,
    GetComputer { id: RecordId },
    UpdateComputer { data: ComputerPatch },
    DeleteComputer { id: RecordId },

    AddComment { id: RecordId, comment: String },
    GetComments { id: RecordId },
    DeleteComment { id: RecordId },

    AddNetworkDevice { data: NewNetworkDevice },
    GetNetworkDevices,
    GetNetworkDevice { id: RecordId },
    UpdateNetworkDevice { data: NetworkDevicePatch },
    DeleteNetworkDevice { id: RecordId },

    AddNetworkDeviceComment { id: RecordId, comment: String },
    GetNetworkDeviceComments { id: RecordId },
    DeleteNetworkDeviceComment { id: RecordId },

    GetLatestComputersWithComments,
    GetLatestNetworkDevicesWithComments,

    GetTotalComputers,
    GetTotalNetworkDevices,
    GetTotalUsers,

    AddUser { data: NewUser },
    GetUsers,
    UpdateUser { data: UserPatch },
    DeleteUser { id: RecordId },

    GetSiteContent,
    UpdateSiteContent { data: SiteContentUpdate },

    GetAuthUsers,
    AddAuthUser { data: NewAuthUser },
    UpdateAuthUser { data: AuthUserPatch },
    DeleteAuthUser { id: RecordId },

    VerifyUser { data: Credentials },
}

impl Action {
    /// Every action name the endpoint understands.
    pub const NAMES: &'static [&'static str] = &[
        "addComputer",
        "getComputers",
        "getComputer",
        "updateComputer",
        "deleteComputer",
        "addComment",
        "getComments",
        "deleteComment",
        "addNetworkDevice",
        "getNetworkDevices",
        "getNetworkDevice",
        "updateNetworkDevice",
        "deleteNetworkDevice",
        "addNetworkDeviceComment",
        "getNetworkDeviceComments",
        "deleteNetworkDeviceComment",
        "getLatestComputersWithComments",
        "getLatestNetworkDevicesWithComments",
        "getTotalComputers",
        "getTotalNetworkDevices",
        "getTotalUsers",
        "addUser",
        "getUsers",
        "updateUser",
        "deleteUser",
        "getSiteContent",
        "updateSiteContent",
        "getAuthUsers",
        "addAuthUser",
        "updateAuthUser",
        "deleteAuthUser",
        "verifyUser",
    ];

    /// Decodes a request body.
    ///
    /// A missing or unknown `action` is reported as `InvalidAction` before
    /// the payload is looked at, so a typo never surfaces as a payload error.
    pub fn parse(body: Value) -> Result<Self, DispatchError> {
        let known = body
            .get("action")
            .and_then(Value::as_str)
            .is_some_and(|name| Self::NAMES.contains(&name));
        if !known {
            return Err(DispatchError::InvalidAction);
        }

        serde_json::from_value(body).map_err(|e| DispatchError::InvalidPayload(e.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddComputer { .. } => "addComputer",
            Self::GetComputers => "getComputers",
            Self::GetComputer { .. } => "getComputer",
            Self::UpdateComputer { .. } => "updateComputer",
            Self::DeleteComputer { .. } => "deleteComputer",
            Self::AddComment { .. } => "addComment",
            Self::GetComments { .. } => "getComments",
            Self::DeleteComment { .. } => "deleteComment",
            Self::AddNetworkDevice { .. } => "addNetworkDevice",
            Self::GetNetworkDevices => "getNetworkDevices",
            Self::GetNetworkDevice { .. } => "getNetworkDevice",
            Self::UpdateNetworkDevice { .. } => "updateNetworkDevice",
            Self::DeleteNetworkDevice { .. } => "deleteNetworkDevice",
            Self::AddNetworkDeviceComment { .. } => "addNetworkDeviceComment",
            Self::GetNetworkDeviceComments { .. } => "getNetworkDeviceComments",
            Self::DeleteNetworkDeviceComment { .. } => "deleteNetworkDeviceComment",
            Self::GetLatestComputersWithComments => "getLatestComputersWithComments",
            Self::GetLatestNetworkDevicesWithComments => "getLatestNetworkDevicesWithComments",
            Self::GetTotalComputers => "getTotalComputers",
            Self::GetTotalNetworkDevices => "getTotalNetworkDevices",
            Self::GetTotalUsers => "getTotalUsers",
            Self::AddUser { .. } => "addUser",
            Self::GetUsers => "getUsers",
            Self::UpdateUser { .. } => "updateUser",
            Self::DeleteUser { .. } => "deleteUser",
            Self::GetSiteContent => "getSiteContent",
            Self::UpdateSiteContent { .. } => "updateSiteContent",
            Self::GetAuthUsers => "getAuthUsers",
            Self::AddAuthUser { .. } => "addAuthUser",
            Self::UpdateAuthUser { .. } => "updateAuthUser",
            Self::DeleteAuthUser { .. } => "deleteAuthUser",
            Self::VerifyUser { .. } => "verifyUser",
        }
    }

    /// The `message` sent back when the database rejects this action.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::AddComputer { .. } => "Error adding computer",
            Self::GetComputers => "Error getting computers",
            Self::GetComputer { .. } => "Error getting computer",
            Self::UpdateComputer { .. } => "Error updating computer",
            Self::DeleteComputer { .. } => "Error deleting computer",
            Self::AddComment { .. } => "Error adding comment",
            Self::GetComments { .. } => "Error getting comments",
            Self::DeleteComment { .. } => "Error deleting comment",
            Self::AddNetworkDevice { .. } => "Error adding network device",
            Self::GetNetworkDevices => "Error getting network devices",
            Self::GetNetworkDevice { .. } => "Error getting network device",
            Self::UpdateNetworkDevice { .. } => "Error updating network device",
            Self::DeleteNetworkDevice { .. } => "Error deleting network device",
            Self::AddNetworkDeviceComment { .. } => "Error adding network device comment",
            Self::GetNetworkDeviceComments { .. } => "Error getting network device comments",
            Self::DeleteNetworkDeviceComment { .. } => "Error deleting network device comment",
            Self::GetLatestComputersWithComments => "Error getting latest computers with comments",
            Self::GetLatestNetworkDevicesWithComments => {
                "Error getting latest network devices with comments"
            }
            Self::GetTotalComputers => "Error getting total computers",
            Self::GetTotalNetworkDevices => "Error getting total network devices",
            Self::GetTotalUsers => "Error getting total users",
            Self::AddUser { .. } => "Error adding user",
            Self::GetUsers => "Error getting users",
            Self::UpdateUser { .. } => "Error updating user",
            Self::DeleteUser { .. } => "Error deleting user",
            Self::GetSiteContent => "Error getting site content",
            Self::UpdateSiteContent { .. } => "Error updating site content",
            Self::GetAuthUsers => "Error getting auth users",
            Self::AddAuthUser { .. } => "Error adding auth user",
            Self::UpdateAuthUser { .. } => "Error updating auth user",
            Self::DeleteAuthUser { .. } => "Error deleting auth user",
            Self::VerifyUser { .. } => "Error verifying user",
        }
    }

    /// Whether the action writes to the database.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddComputer { .. }
                | Self::UpdateComputer { .. }
                | Self::DeleteComputer { .. }
                | Self::AddComment { .. }
                | Self::DeleteComment { .. }
                | Self::AddNetworkDevice { .. }
                | Self::UpdateNetworkDevice { .. }
                | Self::DeleteNetworkDevice { .. }
                | Self::AddNetworkDeviceComment { .. }
                | Self::DeleteNetworkDeviceComment { .. }
                | Self::AddUser { .. }
                | Self::UpdateUser { .. }
                | Self::DeleteUser { .. }
                | Self::UpdateSiteContent { .. }
                | Self::AddAuthUser { .. }
                | Self::UpdateAuthUser { .. }
                | Self::DeleteAuthUser { .. }
        )
    }

    /// Login accounts are managed by admins only.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::GetAuthUsers
                | Self::AddAuthUser { .. }
                | Self::UpdateAuthUser { .. }
                | Self::DeleteAuthUser { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// A minimal valid body for every action name.
    fn sample(name: &str) -> Value {
        let mut body = json!({ "action": name });
        let obj = body.as_object_mut().unwrap();
        match name {
            "addComputer" | "addNetworkDevice" | "addUser" => {
                obj.insert("data".into(), json!({ "name": "x" }));
            }
            "updateComputer" | "updateNetworkDevice" | "updateUser" => {
                obj.insert("data".into(), json!({ "id": 1, "name": "y" }));
            }
            "updateSiteContent" => {
                obj.insert("data".into(), json!({ "key": "k", "value": "v" }));
            }
            "addAuthUser" => {
                obj.insert("data".into(), json!({ "username": "u", "password": "p" }));
            }
            "updateAuthUser" => {
                obj.insert("data".into(), json!({ "id": 1, "role": "admin" }));
            }
            "verifyUser" => {
                obj.insert("data".into(), json!({ "username": "u", "password": "p" }));
            }
            "addComment" | "addNetworkDeviceComment" => {
                obj.insert("id".into(), json!(1));
                obj.insert("comment".into(), json!("hello"));
            }
            _ => {
                obj.insert("id".into(), json!(1));
            }
        }
        body
    }

    #[test]
    fn every_listed_name_round_trips_to_its_variant() {
        for name in Action::NAMES {
            let action = Action::parse(sample(name))
                .unwrap_or_else(|e| panic!("{name} failed to parse: {e}"));
            assert_eq!(action.name(), *name);
        }
    }

    #[test]
    fn unknown_or_missing_action_is_invalid_action() {
        for body in [
            json!({ "action": "dropTables" }),
            json!({ "action": 42 }),
            json!({ "data": { "name": "x" } }),
            json!([]),
        ] {
            assert!(matches!(
                Action::parse(body),
                Err(DispatchError::InvalidAction)
            ));
        }
    }

    #[test]
    fn known_action_with_bad_payload_is_invalid_payload() {
        let err = Action::parse(json!({ "action": "getComputer" })).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPayload(_)));

        let err = Action::parse(json!({ "action": "deleteUser", "id": "seven" })).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPayload(_)));
    }

    #[test]
    fn string_ids_from_detail_pages_are_accepted() {
        let action = Action::parse(json!({ "action": "getComputer", "id": "12" })).unwrap();
        assert!(matches!(action, Action::GetComputer { id: RecordId(12) }));
    }

    #[test]
    fn reads_are_not_mutations() {
        assert!(!Action::GetComputers.is_mutation());
        assert!(!Action::GetLatestComputersWithComments.is_mutation());
        assert!(Action::DeleteAuthUser { id: RecordId(1) }.is_mutation());
        let verify = Action::parse(sample("verifyUser")).unwrap();
        assert!(!verify.is_mutation());
    }

    #[test]
    fn only_account_management_needs_admin() {
        let admin_only: Vec<_> = Action::NAMES
            .iter()
            .filter(|name| Action::parse(sample(name)).unwrap().requires_admin())
            .copied()
            .collect();
        assert_eq!(
            admin_only,
            ["getAuthUsers", "addAuthUser", "updateAuthUser", "deleteAuthUser"]
        );
    }
}
