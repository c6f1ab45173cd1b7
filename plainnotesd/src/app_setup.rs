use async_trait::async_trait;
use log::{error, info};
use plainnotes::config::app_config::AppConfig;
use plainnotes::storage::NoteStore;
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Orbit, Rocket};
use crate::routes::{ApiRocketBuildExt, CorsFairing};

/// Reads the app config, opens the note store and installs the API
pub struct AppSetupFairing;

impl AppSetupFairing {
    pub fn new() -> Self {
        AppSetupFairing
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite | Kind::Liftoff,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let extracted = rocket.figment().extract::<AppConfig>();
        let app_config = ok_or_bail!(
            rocket,
            extracted,
            |e| error!("failed to read the app configuration: {e}")
        );

        let storage = ok_or_bail!(
            rocket,
            NoteStore::new(&app_config).await,
            |e| error!("note storage initialization failed: {e}")
        );

        Ok(
            rocket
                .manage(storage)
                .attach(CorsFairing::new(app_config.cors_allowed_origins))
                .install_plainnotes_api()
        )
    }

    async fn on_liftoff(
        &self,
        rocket: &Rocket<Orbit>,
    ) {
        if let Some(storage) = rocket.state::<NoteStore>() {
            info!("serving {} notes", storage.count().await);
        }
    }
}
