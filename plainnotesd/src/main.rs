mod app_constants;
mod app_setup;
mod cli;
mod routes;

use app_setup::AppSetupFairing;
use clap::{crate_name, Parser};
use figment::Figment;
use log::info;
use plainnotes::config::figment::FigmentExt;
use plainnotes::error_exit;
use plainnotes::logging::init_daemon_logging;
use crate::cli::CliConfig;

fn main() {
    let cli_config = CliConfig::parse();
    init_daemon_logging(cli_config.syslog.into());

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);

    let result = rocket::execute(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing::new())
            .launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {e}");
    }
}
