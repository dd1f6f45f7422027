use itaudit_db::entities::computers;
use itaudit_model::{Computer, ComputerPatch, NewComputer};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

fn to_dto(m: computers::Model) -> Computer {
    Computer {
        id: m.id,
        name: m.name,
        ip_address: m.ip_address,
        cpu: m.cpu,
        ram: m.ram,
        storage: m.storage,
        printer: m.printer,
        users: m.users,
        teamviewer_id: m.teamviewer_id,
        antivirus: m.antivirus,
        notes: m.notes,
    }
}

pub async fn insert(db: &DatabaseConnection, input: NewComputer) -> Result<i32, DbErr> {
    let model = computers::ActiveModel {
        name: Set(input.name),
        ip_address: Set(input.ip_address),
        cpu: Set(input.cpu),
        ram: Set(input.ram),
        storage: Set(input.storage),
        printer: Set(input.printer),
        users: Set(input.users),
        teamviewer_id: Set(input.teamviewer_id),
        antivirus: Set(input.antivirus),
        notes: Set(input.notes),
        ..Default::default()
    };
    let res = computers::Entity::insert(model).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Computer>, DbErr> {
    let rows = computers::Entity::find()
        .order_by_asc(computers::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<Computer>, DbErr> {
    Ok(computers::Entity::find_by_id(id).one(db).await?.map(to_dto))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    computers::Entity::find().count(db).await
}

/// Writes only the columns present in `patch`.
pub async fn update(db: &DatabaseConnection, patch: ComputerPatch) -> Result<u64, DbErr> {
    let mut active = computers::ActiveModel {
        ..Default::default()
    };
    if let Some(v) = patch.name {
        active.name = Set(v);
    }
    if let Some(v) = patch.ip_address {
        active.ip_address = Set(v);
    }
    if let Some(v) = patch.cpu {
        active.cpu = Set(v);
    }
    if let Some(v) = patch.ram {
        active.ram = Set(v);
    }
    if let Some(v) = patch.storage {
        active.storage = Set(v);
    }
    if let Some(v) = patch.printer {
        active.printer = Set(v);
    }
    if let Some(v) = patch.users {
        active.users = Set(v);
    }
    if let Some(v) = patch.teamviewer_id {
        active.teamviewer_id = Set(v);
    }
    if let Some(v) = patch.antivirus {
        active.antivirus = Set(v);
    }
    if let Some(v) = patch.notes {
        active.notes = Set(v);
    }
    if !active.is_changed() {
        return Ok(0);
    }

    let res = computers::Entity::update_many()
        .set(active)
        .filter(computers::Column::Id.eq(patch.id.0))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Comments attached to the computer are left in place.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    let res = computers::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
