use serde::{Deserialize, Serialize};

use crate::id::{RecordId, present};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    pub id: i32,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub printer: Option<String>,
    pub users: Option<String>,
    pub teamviewer_id: Option<String>,
    pub antivirus: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComputer {
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub cpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub printer: Option<String>,
    pub users: Option<String>,
    pub teamviewer_id: Option<String>,
    pub antivirus: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. `None` leaves a column alone, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComputerPatch {
    pub id: RecordId,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ip_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cpu: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ram: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub storage: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub printer: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub users: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub teamviewer_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub antivirus: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerComment {
    pub id: i32,
    pub computer_id: Option<i32>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
}

/// A computer paired with its most recent comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestComputerComment {
    pub id: i32,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub teamviewer_id: Option<String>,
    pub latest_comment: Option<String>,
    pub comment_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    pub id: i32,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub management_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewNetworkDevice {
    pub name: Option<String>,
    pub ip_address: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub management_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NetworkDevicePatch {
    pub id: RecordId,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ip_address: Option<Option<String>>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub device_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub management_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeviceComment {
    pub id: i32,
    pub device_id: Option<i32>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestNetworkDeviceComment {
    pub id: i32,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub latest_comment: Option<String>,
    pub comment_timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_null_from_missing() {
        let p: ComputerPatch =
            serde_json::from_value(serde_json::json!({"id": "3", "ram": null, "cpu": "i7"}))
                .unwrap();
        assert_eq!(p.id, RecordId(3));
        assert_eq!(p.ram, Some(None));
        assert_eq!(p.cpu, Some(Some("i7".to_string())));
        assert_eq!(p.name, None);
    }

    #[test]
    fn patch_rejects_unknown_columns() {
        let err = serde_json::from_value::<ComputerPatch>(
            serde_json::json!({"id": 1, "hostname": "x"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("hostname"));
    }

    #[test]
    fn network_device_uses_type_on_the_wire() {
        let d: NewNetworkDevice =
            serde_json::from_value(serde_json::json!({"name": "sw1", "type": "switch"})).unwrap();
        assert_eq!(d.device_type.as_deref(), Some("switch"));
        assert!(d.management_url.is_none());

        let v = serde_json::to_value(NetworkDevice {
            id: 1,
            name: None,
            ip_address: Some("10.0.0.1".into()),
            device_type: Some("router".into()),
            model: None,
            location: None,
            management_url: None,
            notes: None,
        })
        .unwrap();
        assert_eq!(v["type"], "router");
        assert_eq!(v["ipAddress"], "10.0.0.1");
    }
}
