use itaudit_model::{
    AuthUser, Computer, ComputerComment, LatestComputerComment, LatestNetworkDeviceComment,
    MessageReply, NetworkDevice, NetworkDeviceComment, SiteContentEntry, TotalReply, User,
    VerifyReply,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::action::Action;
use crate::error::{DispatchError, StoreError};
use crate::store::{
    self, accounts, comments, computers, network_devices, site_content, users,
};

/// Successful dispatcher response. Serialized without a tag: each action
/// always produces the same shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Message(MessageReply),
    Total(TotalReply),
    Verified(VerifyReply),
    Computer(Computer),
    Computers(Vec<Computer>),
    ComputerComments(Vec<ComputerComment>),
    LatestComputers(Vec<LatestComputerComment>),
    NetworkDevice(NetworkDevice),
    NetworkDevices(Vec<NetworkDevice>),
    NetworkDeviceComments(Vec<NetworkDeviceComment>),
    LatestNetworkDevices(Vec<LatestNetworkDeviceComment>),
    Users(Vec<User>),
    SiteContent(Vec<SiteContentEntry>),
    AuthUsers(Vec<AuthUser>),
}

fn message(text: &str) -> Reply {
    Reply::Message(MessageReply {
        message: text.to_string(),
        id: None,
    })
}

fn created(text: &str, id: i32) -> Reply {
    Reply::Message(MessageReply {
        message: text.to_string(),
        id: Some(id),
    })
}

/// What the caller is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub read_only: bool,
    pub admin: bool,
}

/// Runs one action against the database.
///
/// Every store failure is reported with the action's own failure message;
/// nothing is retried.
pub async fn dispatch(
    db: &DatabaseConnection,
    action: Action,
    access: Access,
) -> Result<Reply, DispatchError> {
    if access.read_only && action.is_mutation() {
        return Err(DispatchError::ReadOnly);
    }
    if action.requires_admin() && !access.admin {
        return Err(DispatchError::AdminRequired);
    }

    let name = action.name();
    let context = action.failure_message();
    tracing::debug!(action = name, "dispatching");

    let out = execute(db, action).await;
    if let Err(Failure::Store(err)) = &out {
        tracing::error!(action = name, %err, "{context}");
    }
    out.map_err(|f| match f {
        Failure::Store(source) => DispatchError::store(context, source),
        Failure::Reply(e) => e,
    })
}

enum Failure {
    Store(StoreError),
    Reply(DispatchError),
}

impl From<sea_orm::DbErr> for Failure {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Store(e.into())
    }
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

async fn execute(db: &DatabaseConnection, action: Action) -> Result<Reply, Failure> {
    let reply = match action {
        Action::AddComputer { data } => {
            created("Computer added successfully", computers::insert(db, data).await?)
        }
        Action::GetComputers => Reply::Computers(computers::list(db).await?),
        Action::GetComputer { id } => match computers::get(db, id.0).await? {
            Some(c) => Reply::Computer(c),
            None => return Err(Failure::Reply(DispatchError::NotFound("Computer not found"))),
        },
        Action::UpdateComputer { data } => {
            computers::update(db, data).await?;
            message("Computer updated successfully")
        }
        Action::DeleteComputer { id } => {
            computers::delete(db, id.0).await?;
            message("Computer deleted successfully")
        }

        Action::AddComment { id, comment } => {
            let new_id =
                comments::add_computer_comment(db, id.0, comment, store::timestamp_now()).await?;
            created("Comment added successfully", new_id)
        }
        Action::GetComments { id } => {
            Reply::ComputerComments(comments::computer_comments(db, id.0).await?)
        }
        Action::DeleteComment { id } => {
            comments::delete_computer_comment(db, id.0).await?;
            message("Comment deleted successfully")
        }

        Action::AddNetworkDevice { data } => created(
            "Network device added successfully",
            network_devices::insert(db, data).await?,
        ),
        Action::GetNetworkDevices => Reply::NetworkDevices(network_devices::list(db).await?),
        Action::GetNetworkDevice { id } => match network_devices::get(db, id.0).await? {
            Some(d) => Reply::NetworkDevice(d),
            None => {
                return Err(Failure::Reply(DispatchError::NotFound(
                    "Network device not found",
                )));
            }
        },
        Action::UpdateNetworkDevice { data } => {
            network_devices::update(db, data).await?;
            message("Network device updated successfully")
        }
        Action::DeleteNetworkDevice { id } => {
            network_devices::delete(db, id.0).await?;
            message("Network device deleted successfully")
        }

        Action::AddNetworkDeviceComment { id, comment } => {
            let new_id =
                comments::add_network_device_comment(db, id.0, comment, store::timestamp_now())
                    .await?;
            created("Network device comment added successfully", new_id)
        }
        Action::GetNetworkDeviceComments { id } => {
            Reply::NetworkDeviceComments(comments::network_device_comments(db, id.0).await?)
        }
        Action::DeleteNetworkDeviceComment { id } => {
            comments::delete_network_device_comment(db, id.0).await?;
            message("Network device comment deleted successfully")
        }

        Action::GetLatestComputersWithComments => Reply::LatestComputers(
            comments::latest_computer_comments(db, comments::LATEST_LIMIT).await?,
        ),
        Action::GetLatestNetworkDevicesWithComments => Reply::LatestNetworkDevices(
            comments::latest_network_device_comments(db, comments::LATEST_LIMIT).await?,
        ),

        Action::GetTotalComputers => Reply::Total(TotalReply {
            total: computers::count(db).await?,
        }),
        Action::GetTotalNetworkDevices => Reply::Total(TotalReply {
            total: network_devices::count(db).await?,
        }),
        Action::GetTotalUsers => Reply::Total(TotalReply {
            total: users::count(db).await?,
        }),

        Action::AddUser { data } => created("User added successfully", users::insert(db, data).await?),
        Action::GetUsers => Reply::Users(users::list(db).await?),
        Action::UpdateUser { data } => {
            users::update(db, data).await?;
            message("User updated successfully")
        }
        Action::DeleteUser { id } => {
            users::delete(db, id.0).await?;
            message("User deleted successfully")
        }

        Action::GetSiteContent => Reply::SiteContent(site_content::list(db).await?),
        Action::UpdateSiteContent { data } => {
            site_content::update(db, data).await?;
            message("Site content updated successfully")
        }

        Action::GetAuthUsers => Reply::AuthUsers(accounts::list(db).await?),
        Action::AddAuthUser { data } => created(
            "Auth user added successfully",
            accounts::insert(db, data).await?,
        ),
        Action::UpdateAuthUser { data } => {
            accounts::update(db, data).await?;
            message("Auth user updated successfully")
        }
        Action::DeleteAuthUser { id } => {
            accounts::delete(db, id.0).await?;
            message("Auth user deleted successfully")
        }

        Action::VerifyUser { data } => {
            match accounts::verify(db, &data.username, &data.password).await? {
                Some(account) => Reply::Verified(VerifyReply {
                    success: true,
                    role: account.role,
                }),
                None => return Err(Failure::Reply(DispatchError::InvalidCredentials)),
            }
        }
    };
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::memory_db;

    const ADMIN: Access = Access {
        read_only: false,
        admin: true,
    };

    async fn run(db: &DatabaseConnection, body: Value) -> Result<Value, DispatchError> {
        let action = Action::parse(body)?;
        let reply = dispatch(db, action, ADMIN).await?;
        Ok(serde_json::to_value(reply).unwrap())
    }

    #[tokio::test]
    async fn add_computer_then_read_it_back() {
        let db = memory_db().await;
        let data = json!({
            "name": "PC1",
            "ipAddress": "10.0.0.5",
            "cpu": "i5",
            "ram": "8GB",
            "storage": "256GB SSD",
            "printer": "HP LaserJet",
            "users": "Ann",
            "teamviewerId": "111 222 333",
            "antivirus": "Defender",
            "notes": "front desk",
        });

        let added = run(&db, json!({ "action": "addComputer", "data": data.clone() }))
            .await
            .unwrap();
        assert_eq!(
            added,
            json!({ "message": "Computer added successfully", "id": 1 })
        );

        let got = run(&db, json!({ "action": "getComputer", "id": 1 }))
            .await
            .unwrap();
        let mut expected = data;
        expected["id"] = json!(1);
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let db = memory_db().await;
        let err = run(&db, json!({ "action": "getComputer", "id": "42" }))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound("Computer not found")));

        let err = run(&db, json!({ "action": "getNetworkDevice", "id": 42 }))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound("Network device not found")));
    }

    #[tokio::test]
    async fn invalid_action_touches_nothing() {
        let db = memory_db().await;
        run(&db, json!({ "action": "addUser", "data": { "name": "Ann" } }))
            .await
            .unwrap();

        let err = run(
            &db,
            json!({ "action": "addUsers", "data": { "name": "Bob" } }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidAction));

        let total = run(&db, json!({ "action": "getTotalUsers" })).await.unwrap();
        assert_eq!(total, json!({ "total": 1 }));
    }

    #[tokio::test]
    async fn deleting_missing_rows_succeeds() {
        let db = memory_db().await;
        for action in [
            "deleteComputer",
            "deleteNetworkDevice",
            "deleteUser",
            "deleteComment",
            "deleteNetworkDeviceComment",
            "deleteAuthUser",
        ] {
            let reply = run(&db, json!({ "action": action, "id": 999 }))
                .await
                .unwrap();
            assert!(reply["message"].as_str().unwrap().ends_with("deleted successfully"));
        }
    }

    #[tokio::test]
    async fn comments_are_listed_newest_first_with_ids() {
        let db = memory_db().await;
        run(&db, json!({ "action": "addComputer", "data": { "name": "PC1" } }))
            .await
            .unwrap();

        for n in 0..4 {
            let reply = run(
                &db,
                json!({ "action": "addComment", "id": 1, "comment": format!("note {n}") }),
            )
            .await
            .unwrap();
            assert_eq!(reply["message"], "Comment added successfully");
            assert_eq!(reply["id"], n + 1);
        }

        let list = run(&db, json!({ "action": "getComments", "id": 1 }))
            .await
            .unwrap();
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 4);
        let stamps: Vec<&str> = list
            .iter()
            .map(|c| c["timestamp"].as_str().unwrap())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
        assert!(list.iter().all(|c| c["computerId"] == 1));
    }

    #[tokio::test]
    async fn verify_user_checks_password_and_username() {
        let db = memory_db().await;
        run(
            &db,
            json!({
                "action": "addAuthUser",
                "data": { "username": "erin", "password": "pw", "role": "auditor" }
            }),
        )
        .await
        .unwrap();

        let ok = run(
            &db,
            json!({ "action": "verifyUser", "data": { "username": "erin", "password": "pw" } }),
        )
        .await
        .unwrap();
        assert_eq!(ok, json!({ "success": true, "role": "auditor" }));

        for (user, pass) in [("erin", "nope"), ("nobody", "pw")] {
            let err = run(
                &db,
                json!({ "action": "verifyUser", "data": { "username": user, "password": pass } }),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, DispatchError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn auth_user_list_hides_passwords() {
        let db = memory_db().await;
        run(
            &db,
            json!({
                "action": "addAuthUser",
                "data": { "username": "frank", "password": "pw", "role": "user" }
            }),
        )
        .await
        .unwrap();

        let list = run(&db, json!({ "action": "getAuthUsers" })).await.unwrap();
        assert_eq!(list, json!([{ "id": 1, "username": "frank", "role": "user" }]));
    }

    #[tokio::test]
    async fn read_only_blocks_writes_but_not_reads() {
        let db = memory_db().await;
        let read_only = Access {
            read_only: true,
            ..ADMIN
        };
        let add = Action::parse(json!({ "action": "addUser", "data": { "name": "Ann" } })).unwrap();
        assert!(matches!(
            dispatch(&db, add, read_only).await,
            Err(DispatchError::ReadOnly)
        ));

        let count = dispatch(&db, Action::GetTotalUsers, read_only).await.unwrap();
        assert_eq!(serde_json::to_value(count).unwrap(), json!({ "total": 0 }));
    }

    #[tokio::test]
    async fn account_management_is_refused_without_admin() {
        let db = memory_db().await;
        let auditor = Access {
            read_only: false,
            admin: false,
        };

        let add = Action::parse(json!({
            "action": "addAuthUser",
            "data": { "username": "eve", "password": "pw", "role": "admin" }
        }))
        .unwrap();
        assert!(matches!(
            dispatch(&db, add, auditor).await,
            Err(DispatchError::AdminRequired)
        ));
        assert!(matches!(
            dispatch(&db, Action::GetAuthUsers, auditor).await,
            Err(DispatchError::AdminRequired)
        ));
        assert!(accounts::list(&db).await.unwrap().is_empty());

        let add = Action::parse(json!({ "action": "addComputer", "data": { "name": "PC1" } }))
            .unwrap();
        assert!(dispatch(&db, add, auditor).await.is_ok());
    }

    #[tokio::test]
    async fn database_failures_carry_the_action_message() {
        let db = memory_db().await;
        let add = json!({
            "action": "addAuthUser",
            "data": { "username": "gina", "password": "pw" }
        });
        run(&db, add.clone()).await.unwrap();

        let err = run(&db, add).await.unwrap_err();
        match err {
            DispatchError::Store { context, .. } => assert_eq!(context, "Error adding auth user"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn site_content_update_reports_success_for_unknown_keys() {
        let db = memory_db().await;
        store::site_content::seed_defaults(&db).await.unwrap();
        let reply = run(
            &db,
            json!({ "action": "updateSiteContent", "data": { "key": "nope", "value": "x" } }),
        )
        .await
        .unwrap();
        assert_eq!(reply["message"], "Site content updated successfully");

        let rows = run(&db, json!({ "action": "getSiteContent" })).await.unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 3);
    }
}
