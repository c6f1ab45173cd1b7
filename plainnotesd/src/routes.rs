mod api;
mod cors;

pub use api::ApiRocketBuildExt;
pub use cors::CorsFairing;
