use itaudit_db::entities::network_devices;
use itaudit_model::{NetworkDevice, NetworkDevicePatch, NewNetworkDevice};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

fn to_dto(m: network_devices::Model) -> NetworkDevice {
    NetworkDevice {
        id: m.id,
        name: m.name,
        ip_address: m.ip_address,
        device_type: m.device_type,
        model: m.model,
        location: m.location,
        management_url: m.management_url,
        notes: m.notes,
    }
}

pub async fn insert(db: &DatabaseConnection, input: NewNetworkDevice) -> Result<i32, DbErr> {
    let model = network_devices::ActiveModel {
        name: Set(input.name),
        ip_address: Set(input.ip_address),
        device_type: Set(input.device_type),
        model: Set(input.model),
        location: Set(input.location),
        management_url: Set(input.management_url),
        notes: Set(input.notes),
        ..Default::default()
    };
    let res = network_devices::Entity::insert(model).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<NetworkDevice>, DbErr> {
    let rows = network_devices::Entity::find()
        .order_by_asc(network_devices::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<NetworkDevice>, DbErr> {
    Ok(network_devices::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(to_dto))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    network_devices::Entity::find().count(db).await
}

pub async fn update(db: &DatabaseConnection, patch: NetworkDevicePatch) -> Result<u64, DbErr> {
    let mut active = network_devices::ActiveModel {
        ..Default::default()
    };
    if let Some(v) = patch.name {
        active.name = Set(v);
    }
    if let Some(v) = patch.ip_address {
        active.ip_address = Set(v);
    }
    if let Some(v) = patch.device_type {
        active.device_type = Set(v);
    }
    if let Some(v) = patch.model {
        active.model = Set(v);
    }
    if let Some(v) = patch.location {
        active.location = Set(v);
    }
    if let Some(v) = patch.management_url {
        active.management_url = Set(v);
    }
    if let Some(v) = patch.notes {
        active.notes = Set(v);
    }
    if !active.is_changed() {
        return Ok(0);
    }

    let res = network_devices::Entity::update_many()
        .set(active)
        .filter(network_devices::Column::Id.eq(patch.id.0))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    let res = network_devices::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
