use async_trait::async_trait;
use log::trace;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{options, routes, Request, Response, Route};
use crate::app_constants::{CORS_ALLOWED_HEADERS, CORS_ALLOWED_METHODS};

const ANY_ORIGIN: &str = "*";

/// Adds CORS headers to responses for requests from an allowed origin
pub struct CorsFairing {
    allowed_origins: Vec<String>,
}

impl CorsFairing {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        CorsFairing { allowed_origins }
    }

    fn allow_origin_value(&self, origin: &str) -> Option<String> {
        if self.allowed_origins.iter().any(|o| o == ANY_ORIGIN) {
            Some(ANY_ORIGIN.to_owned())
        } else if self.allowed_origins.iter().any(|o| o == origin) {
            Some(origin.to_owned())
        } else {
            None
        }
    }
}

#[async_trait]
impl Fairing for CorsFairing {
    fn info(&self) -> Info {
        Info {
            name: "cors",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(
        &self,
        request: &'r Request<'_>,
        response: &mut Response<'r>,
    ) {
        let Some(origin) = request.headers().get_one("Origin") else {
            return
        };
        let Some(allowed) = self.allow_origin_value(origin) else {
            trace!("origin {origin} is not allowed");
            return
        };
        response.set_header(Header::new("Access-Control-Allow-Origin", allowed));
        response.set_header(Header::new("Access-Control-Allow-Methods", CORS_ALLOWED_METHODS));
        response.set_header(Header::new("Access-Control-Allow-Headers", CORS_ALLOWED_HEADERS));
        response.set_header(Header::new("Vary", "Origin"));
    }
}

#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

pub fn preflight_routes() -> Vec<Route> {
    routes![preflight]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_origins_are_echoed() {
        let fairing = CorsFairing::new(vec!["http://localhost:3000".into()]);
        assert_eq!(
            fairing.allow_origin_value("http://localhost:3000").as_deref(),
            Some("http://localhost:3000"),
        );
        assert_eq!(fairing.allow_origin_value("http://evil.example"), None);
    }

    #[test]
    fn wildcard_allows_everyone() {
        let fairing = CorsFairing::new(vec![ANY_ORIGIN.into()]);
        assert_eq!(fairing.allow_origin_value("http://anything.example").as_deref(), Some("*"));
    }
}
