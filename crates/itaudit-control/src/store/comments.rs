use itaudit_db::entities::{comments, network_device_comments};
use itaudit_model::{
    ComputerComment, LatestComputerComment, LatestNetworkDeviceComment, NetworkDeviceComment,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement,
};

/// How many assets the home page shows in its "recent activity" lists.
pub const LATEST_LIMIT: u64 = 3;

// One row per computer: its newest comment (ties go to the higher comment
// id), joined back to the computer. Comments whose computer is gone drop out
// of the inner join.
const LATEST_COMPUTERS_SQL: &str = r#"
SELECT c.id AS id,
       c.name AS name,
       c."ipAddress" AS ip_address,
       c."teamviewerId" AS teamviewer_id,
       cm.content AS latest_comment,
       cm.timestamp AS comment_timestamp
FROM (
    SELECT "computerId" AS parent_id,
           content,
           timestamp,
           ROW_NUMBER() OVER (
               PARTITION BY "computerId"
               ORDER BY timestamp DESC, id DESC
           ) AS rn
    FROM comments
) cm
INNER JOIN computers c ON c.id = cm.parent_id
WHERE cm.rn = 1
ORDER BY cm.timestamp DESC
LIMIT ?
"#;

const LATEST_NETWORK_DEVICES_SQL: &str = r#"
SELECT d.id AS id,
       d.name AS name,
       d."ipAddress" AS ip_address,
       d."type" AS device_type,
       cm.content AS latest_comment,
       cm.timestamp AS comment_timestamp
FROM (
    SELECT "deviceId" AS parent_id,
           content,
           timestamp,
           ROW_NUMBER() OVER (
               PARTITION BY "deviceId"
               ORDER BY timestamp DESC, id DESC
           ) AS rn
    FROM network_device_comments
) cm
INNER JOIN network_devices d ON d.id = cm.parent_id
WHERE cm.rn = 1
ORDER BY cm.timestamp DESC
LIMIT ?
"#;

#[derive(Debug, FromQueryResult)]
struct LatestComputerRow {
    id: i32,
    name: Option<String>,
    ip_address: Option<String>,
    teamviewer_id: Option<String>,
    latest_comment: Option<String>,
    comment_timestamp: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct LatestNetworkDeviceRow {
    id: i32,
    name: Option<String>,
    ip_address: Option<String>,
    device_type: Option<String>,
    latest_comment: Option<String>,
    comment_timestamp: Option<String>,
}

fn latest_statement(db: &DatabaseConnection, sql: &str, limit: u64) -> Statement {
    Statement::from_sql_and_values(
        db.get_database_backend(),
        sql,
        [i64::try_from(limit).unwrap_or(i64::MAX).into()],
    )
}

pub async fn add_computer_comment(
    db: &DatabaseConnection,
    computer_id: i32,
    content: String,
    timestamp: String,
) -> Result<i32, DbErr> {
    let model = comments::ActiveModel {
        computer_id: Set(Some(computer_id)),
        content: Set(Some(content)),
        timestamp: Set(Some(timestamp)),
        ..Default::default()
    };
    let res = comments::Entity::insert(model).exec(db).await?;
    Ok(res.last_insert_id)
}

/// Newest first.
pub async fn computer_comments(
    db: &DatabaseConnection,
    computer_id: i32,
) -> Result<Vec<ComputerComment>, DbErr> {
    let rows = comments::Entity::find()
        .filter(comments::Column::ComputerId.eq(computer_id))
        .order_by_desc(comments::Column::Timestamp)
        .order_by_desc(comments::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|c| ComputerComment {
            id: c.id,
            computer_id: c.computer_id,
            content: c.content,
            timestamp: c.timestamp,
        })
        .collect())
}

pub async fn delete_computer_comment(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    let res = comments::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

pub async fn latest_computer_comments(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<LatestComputerComment>, DbErr> {
    let rows = LatestComputerRow::find_by_statement(latest_statement(db, LATEST_COMPUTERS_SQL, limit))
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| LatestComputerComment {
            id: r.id,
            name: r.name,
            ip_address: r.ip_address,
            teamviewer_id: r.teamviewer_id,
            latest_comment: r.latest_comment,
            comment_timestamp: r.comment_timestamp,
        })
        .collect())
}

pub async fn add_network_device_comment(
    db: &DatabaseConnection,
    device_id: i32,
    content: String,
    timestamp: String,
) -> Result<i32, DbErr> {
    let model = network_device_comments::ActiveModel {
        device_id: Set(Some(device_id)),
        content: Set(Some(content)),
        timestamp: Set(Some(timestamp)),
        ..Default::default()
    };
    let res = network_device_comments::Entity::insert(model)
        .exec(db)
        .await?;
    Ok(res.last_insert_id)
}

pub async fn network_device_comments(
    db: &DatabaseConnection,
    device_id: i32,
) -> Result<Vec<NetworkDeviceComment>, DbErr> {
    let rows = network_device_comments::Entity::find()
        .filter(network_device_comments::Column::DeviceId.eq(device_id))
        .order_by_desc(network_device_comments::Column::Timestamp)
        .order_by_desc(network_device_comments::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|c| NetworkDeviceComment {
            id: c.id,
            device_id: c.device_id,
            content: c.content,
            timestamp: c.timestamp,
        })
        .collect())
}

pub async fn delete_network_device_comment(
    db: &DatabaseConnection,
    id: i32,
) -> Result<u64, DbErr> {
    let res = network_device_comments::Entity::delete_by_id(id)
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn latest_network_device_comments(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<LatestNetworkDeviceComment>, DbErr> {
    let rows = LatestNetworkDeviceRow::find_by_statement(latest_statement(
        db,
        LATEST_NETWORK_DEVICES_SQL,
        limit,
    ))
    .all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| LatestNetworkDeviceComment {
            id: r.id,
            name: r.name,
            ip_address: r.ip_address,
            device_type: r.device_type,
            latest_comment: r.latest_comment,
            comment_timestamp: r.comment_timestamp,
        })
        .collect())
}
