use sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::ControlConfig;

/// Tables as the earlier deployment created them: nullable columns and
/// unenforced `FOREIGN KEY` clauses.
const LEGACY_SCHEMA: &[&str] = &[
    "CREATE TABLE computers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT, ipAddress TEXT, cpu TEXT, ram TEXT, storage TEXT,
        printer TEXT, users TEXT, teamviewerId TEXT, antivirus TEXT, notes TEXT
    )",
    "CREATE TABLE comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        computerId INTEGER,
        content TEXT,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (computerId) REFERENCES computers(id)
    )",
    "CREATE TABLE network_devices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT, ipAddress TEXT, type TEXT, model TEXT, location TEXT,
        managementUrl TEXT, notes TEXT
    )",
    "CREATE TABLE network_device_comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        deviceId INTEGER,
        content TEXT,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (deviceId) REFERENCES network_devices(id)
    )",
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT, email TEXT, phone TEXT, workstationName TEXT
    )",
    "CREATE TABLE site_content (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT UNIQUE,
        value TEXT
    )",
    "CREATE TABLE auth_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE,
        password TEXT,
        role TEXT
    )",
];

/// A fresh, migrated in-memory database. The pool holds exactly one
/// connection so every query sees the same memory database.
pub async fn memory_db() -> DatabaseConnection {
    let db = itaudit_db::connect("sqlite::memory:", 1).await.unwrap();
    itaudit_migration::Migrator::up(&db, None).await.unwrap();
    db
}

/// An in-memory database laid out by the earlier deployment, then migrated
/// the way startup would.
pub async fn legacy_db() -> DatabaseConnection {
    let db = itaudit_db::connect("sqlite::memory:", 1).await.unwrap();
    for stmt in LEGACY_SCHEMA {
        db.execute_unprepared(stmt).await.unwrap();
    }
    itaudit_migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub fn test_config() -> ControlConfig {
    let mut cfg = ControlConfig::from_lookup(|_| None);
    cfg.database_url = "sqlite::memory:".to_string();
    cfg.session_secret = b"test-secret".to_vec();
    cfg
}
