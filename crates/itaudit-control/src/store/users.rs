use itaudit_db::entities::users;
use itaudit_model::{NewUser, User, UserPatch};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

fn to_dto(m: users::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        workstation_name: m.workstation_name,
    }
}

pub async fn insert(db: &DatabaseConnection, input: NewUser) -> Result<i32, DbErr> {
    let model = users::ActiveModel {
        name: Set(input.name),
        email: Set(input.email),
        phone: Set(input.phone),
        workstation_name: Set(input.workstation_name),
        ..Default::default()
    };
    let res = users::Entity::insert(model).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<User>, DbErr> {
    let rows = users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    users::Entity::find().count(db).await
}

pub async fn update(db: &DatabaseConnection, patch: UserPatch) -> Result<u64, DbErr> {
    let mut active = users::ActiveModel {
        ..Default::default()
    };
    if let Some(v) = patch.name {
        active.name = Set(v);
    }
    if let Some(v) = patch.email {
        active.email = Set(v);
    }
    if let Some(v) = patch.phone {
        active.phone = Set(v);
    }
    if let Some(v) = patch.workstation_name {
        active.workstation_name = Set(v);
    }
    if !active.is_changed() {
        return Ok(0);
    }

    let res = users::Entity::update_many()
        .set(active)
        .filter(users::Column::Id.eq(patch.id.0))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, DbErr> {
    let res = users::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_db;

    #[tokio::test]
    async fn list_is_in_insertion_order_and_count_matches() {
        let db = memory_db().await;
        for name in ["Ann", "Bob", "Cy"] {
            insert(
                &db,
                NewUser {
                    name: Some(name.to_string()),
                    workstation_name: Some(format!("WS-{name}")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let rows = list(&db).await.unwrap();
        let names: Vec<_> = rows.iter().filter_map(|u| u.name.as_deref()).collect();
        assert_eq!(names, ["Ann", "Bob", "Cy"]);
        assert_eq!(rows[1].workstation_name.as_deref(), Some("WS-Bob"));
        assert_eq!(count(&db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_changes_one_user_only() {
        let db = memory_db().await;
        let a = insert(&db, NewUser { name: Some("Ann".into()), ..Default::default() })
            .await
            .unwrap();
        let b = insert(&db, NewUser { name: Some("Bob".into()), ..Default::default() })
            .await
            .unwrap();

        let patch: UserPatch =
            serde_json::from_value(serde_json::json!({ "id": a, "email": "ann@example.com" }))
                .unwrap();
        assert_eq!(update(&db, patch).await.unwrap(), 1);

        let rows = list(&db).await.unwrap();
        assert_eq!(rows[0].email.as_deref(), Some("ann@example.com"));
        assert_eq!(rows[1].id, b);
        assert_eq!(rows[1].email, None);
    }
}
