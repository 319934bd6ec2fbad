use std::string::ToString;

use ::config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::form::validate::Contains;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// knobs for the typeahead search endpoints
#[derive(Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(rename = "resultlimit")]
    pub result_limit: u32,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct BookServerConfig {
    pub database: DbConfig,
    pub search: SearchConfig,
}

/// Parses the config file located at ./BookServer.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> BookServerConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./BookServer.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return BOOK_SERVER_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(BOOK_SERVER_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static BOOK_SERVER_CONFIG: Lazy<BookServerConfig> = Lazy::new(parse_config);
static BOOK_SERVER_CONFIG_DEFAULT: Lazy<BookServerConfig> = Lazy::new(|| BookServerConfig {
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
    search: SearchConfig { result_limit: 6 },
});
