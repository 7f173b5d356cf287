use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, Posts, Server, Uploads};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3010".to_string())
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let posts = Posts {
        default_timezone: std::env::var("DEFAULT_TIMEZONE")
            .unwrap_or_else(|_| "America/Sao_Paulo".to_string()),
    };

    let uploads = Uploads {
        dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        posts,
        uploads,
    })
}
