use std::path::PathBuf;
use data::validation::ValidationRules;
use serde::{Deserialize, Serialize};
use crate::lib_constants::{DEFAULT_CORS_ALLOWED_ORIGIN, DEFAULT_MAX_DESCRIPTION_LEN, DEFAULT_MAX_TITLE_LEN};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_max_title_len")]
    pub max_title_len: usize,

    #[serde(default = "app_config_default_max_description_len")]
    pub max_description_len: usize,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default = "app_config_default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

/// Where the note list lives between requests
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    #[default]
    Memory,

    File {
        path: PathBuf,
    },
}

impl AppConfig {
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::server(self.max_title_len, self.max_description_len)
    }
}

pub fn app_config_default_max_title_len() -> usize {
    DEFAULT_MAX_TITLE_LEN
}

pub fn app_config_default_max_description_len() -> usize {
    DEFAULT_MAX_DESCRIPTION_LEN
}

pub fn app_config_default_cors_allowed_origins() -> Vec<String> {
    vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_owned()]
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            max_title_len: DEFAULT_MAX_TITLE_LEN,
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            storage: StorageConfig::default(),
            cors_allowed_origins: app_config_default_cors_allowed_origins(),
        }
    }
}
