#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub posts: Posts,
    pub uploads: Uploads,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Posts {
    pub default_timezone: String,
}

#[derive(Debug, Clone)]
pub struct Uploads {
    pub dir: String,
}
