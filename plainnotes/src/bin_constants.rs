pub const DEFAULT_CONFIG_FILE: &str = "/etc/plainnotes/plainnotes.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "PLAINNOTES_";
pub const DEFAULT_PORT: u16 = 5025;
