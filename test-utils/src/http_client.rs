use std::sync::LazyLock;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub static RQ: LazyLock<reqwest::blocking::Client> = LazyLock::new(||
    reqwest::blocking::Client::new()
);

pub trait ResponseJsonExt {
    fn status_and_json<T: DeserializeOwned>(self) -> Result<(StatusCode, T), reqwest::Error>;
}

impl ResponseJsonExt for reqwest::blocking::Response {
    fn status_and_json<T: DeserializeOwned>(self) -> Result<(StatusCode, T), reqwest::Error> {
        let status = self.status();
        Ok((status, self.json()?))
    }
}

pub fn api_url(port: u16, endpoint: &str) -> String {
    format!("http://127.0.0.1:{port}/api/{endpoint}")
}
