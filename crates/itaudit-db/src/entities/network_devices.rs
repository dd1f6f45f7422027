use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "network_devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[sea_orm(column_name = "ipAddress")]
    pub ip_address: Option<String>,
    #[sea_orm(column_name = "type")]
    pub device_type: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    #[sea_orm(column_name = "managementUrl")]
    pub management_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::network_device_comments::Entity")]
    NetworkDeviceComments,
}

impl Related<super::network_device_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkDeviceComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
