use itaudit_db::entities::site_content;
use itaudit_model::{SiteContentEntry, SiteContentUpdate};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

/// Strings shown on the home page until an admin edits them.
pub const DEFAULTS: &[(&str, &str)] = &[
    ("welcome_message", "Welcome to IT Audit"),
    ("audit_start_date", "9/28/2024"),
    ("audit_company", "Medstuff"),
];

/// Inserts any default key that is missing; existing values are kept.
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<(), DbErr> {
    let rows = DEFAULTS.iter().map(|(key, value)| site_content::ActiveModel {
        key: Set(Some(key.to_string())),
        value: Set(Some(value.to_string())),
        ..Default::default()
    });

    let res = site_content::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::column(site_content::Column::Key)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match res {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<SiteContentEntry>, DbErr> {
    let rows = site_content::Entity::find()
        .order_by_asc(site_content::Column::Id)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| SiteContentEntry {
            id: r.id,
            key: r.key,
            value: r.value,
        })
        .collect())
}

/// Only the value of an existing key changes; unknown keys are ignored.
pub async fn update(db: &DatabaseConnection, input: SiteContentUpdate) -> Result<u64, DbErr> {
    let res = site_content::Entity::update_many()
        .col_expr(site_content::Column::Value, Expr::value(input.value))
        .filter(site_content::Column::Key.eq(input.key))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_db;

    fn value_of<'a>(rows: &'a [SiteContentEntry], key: &str) -> Option<&'a str> {
        rows.iter()
            .find(|r| r.key.as_deref() == Some(key))
            .and_then(|r| r.value.as_deref())
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_keeps_edits() {
        let db = memory_db().await;
        seed_defaults(&db).await.unwrap();
        update(
            &db,
            SiteContentUpdate {
                key: "audit_company".into(),
                value: Some("Acme".into()),
            },
        )
        .await
        .unwrap();

        seed_defaults(&db).await.unwrap();

        let rows = list(&db).await.unwrap();
        assert_eq!(rows.len(), DEFAULTS.len());
        assert_eq!(value_of(&rows, "audit_company"), Some("Acme"));
        assert_eq!(value_of(&rows, "welcome_message"), Some("Welcome to IT Audit"));
    }

    #[tokio::test]
    async fn update_changes_only_the_named_key() {
        let db = memory_db().await;
        seed_defaults(&db).await.unwrap();
        let before = list(&db).await.unwrap();

        let n = update(
            &db,
            SiteContentUpdate {
                key: "welcome_message".into(),
                value: Some("Hello auditors".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(n, 1);

        let after = list(&db).await.unwrap();
        assert_eq!(value_of(&after, "welcome_message"), Some("Hello auditors"));
        for key in ["audit_start_date", "audit_company"] {
            assert_eq!(value_of(&after, key), value_of(&before, key));
        }
    }

    #[tokio::test]
    async fn unknown_key_is_a_noop() {
        let db = memory_db().await;
        seed_defaults(&db).await.unwrap();
        let before = list(&db).await.unwrap();

        let n = update(
            &db,
            SiteContentUpdate {
                key: "no_such_key".into(),
                value: Some("x".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(n, 0);
        assert_eq!(list(&db).await.unwrap(), before);
    }
}
