//! Bootstrap binary: loads configuration, opens the database and makes sure
//! every table of the schema registry exists.

use std::env;

use config::Config;
use dotenvy::dotenv;

use institute_crm::db;
use institute_crm::models::config::ServerConfig;
use institute_crm::registry::{ENTITIES, EntityKind};

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // `APP_ENV` picks the override file, `local` when unset.
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // APP_DATABASE_URL and friends win over both files.
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = db::initialize(
        &server_config.database_url,
        server_config.connection_options(),
    ) {
        log::error!("Failed to initialize database: {err}");
        std::process::exit(1);
    }

    for entity in ENTITIES {
        let kind = match entity.kind {
            EntityKind::Entity => "entity",
            EntityKind::JoinTable => "join table",
        };
        log::info!("Registered {kind} {} -> {}", entity.name, entity.table);
    }

    log::info!(
        "Database {} ready with {} tables",
        server_config.database_url,
        ENTITIES.len()
    );
}
