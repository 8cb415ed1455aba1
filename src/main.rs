use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::utils::startup_utils;

mod error;
mod api;
mod services;
mod models;
mod utils;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = startup_utils::get_app_config();
    let store = startup_utils::get_store(&config)
        .await
        .expect("Error: could not initialise the activity store");
    let random_source = startup_utils::get_random_source(&config);

    let activity_controller = Arc::new(startup_utils::get_activity_controller(
        store,
        random_source
    ));

    startup_utils::create_server(&config, activity_controller)
        .await
        .expect("Error: server failed.");
}
