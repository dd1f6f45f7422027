pub mod auth_users;
pub mod comments;
pub mod computers;
pub mod network_device_comments;
pub mod network_devices;
pub mod site_content;
pub mod users;
