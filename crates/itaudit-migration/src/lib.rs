use sea_orm_migration::prelude::*;

mod m0001_create_computers;
mod m0002_create_comments;
mod m0003_create_network_devices;
mod m0004_create_network_device_comments;
mod m0005_create_users;
mod m0006_create_site_content;
mod m0007_create_auth_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0001_create_computers::Migration),
            Box::new(m0002_create_comments::Migration),
            Box::new(m0003_create_network_devices::Migration),
            Box::new(m0004_create_network_device_comments::Migration),
            Box::new(m0005_create_users::Migration),
            Box::new(m0006_create_site_content::Migration),
            Box::new(m0007_create_auth_users::Migration),
        ]
    }
}
