use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub s3_bucket: Option<String>,
    pub s3_account_id: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    /// Public read base for uploaded image paths (e.g. the R2 public bucket URL)
    pub public_storage_url: String,
    /// How often the orphaned-listing sweep runs, in seconds
    pub sweep_interval_secs: u64,
    /// Minimum age before a pending listing without images is considered orphaned
    pub sweep_min_age_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "50051".to_string())
                .parse()
                .unwrap_or(50051),
            jwt_secret: env::var("JWT_SECRET")?,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_account_id: env::var("S3_ACCOUNT_ID").unwrap_or_default(),
            s3_access_key: env::var("S3_ACCESS_KEY").unwrap_or_default(),
            s3_secret_key: env::var("S3_SECRET_KEY").unwrap_or_default(),
            public_storage_url: env::var("PUBLIC_STORAGE_URL").unwrap_or_default(),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap_or(600),
            sweep_min_age_secs: env::var("SWEEP_MIN_AGE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            database_url: "postgres://localhost/market".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 50051,
            jwt_secret: "secret".to_string(),
            s3_bucket: None,
            s3_account_id: String::new(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
            public_storage_url: String::new(),
            sweep_interval_secs: 600,
            sweep_min_age_secs: 3600,
        };
        assert_eq!(config.server_addr(), "127.0.0.1:50051");
    }
}
