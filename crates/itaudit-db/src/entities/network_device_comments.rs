use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "network_device_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "deviceId")]
    pub device_id: Option<i32>,
    pub content: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::network_devices::Entity",
        from = "Column::DeviceId",
        to = "super::network_devices::Column::Id"
    )]
    NetworkDevices,
}

impl Related<super::network_devices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkDevices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
