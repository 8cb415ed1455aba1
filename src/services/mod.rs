pub mod activity_controller;
pub mod bored_client;
pub mod database;
pub mod memory_store;
