pub mod app_config;
pub mod database_utils;
pub mod startup_utils;
