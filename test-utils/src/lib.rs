mod build_bin;
mod daemon;
mod mock;
mod background_reader;
mod constants;
mod http_client;
mod ports;
mod signal;
#[doc(hidden)] pub mod json;

pub use build_bin::{build_bin, new_configured_command, BuildBinError, DAEMON_BIN_PATH};
pub use daemon::{new_daemon_command, RunningDaemon, ROCKET_STARTED_STRING};
pub use mock::{setup_config, setup_config_with_file_storage, CONFIG_FILE_PATH, NOTES_FILE_PATH};
pub use background_reader::{BackgroundReader, BackgroundReaderError};
pub use http_client::*;
pub use ports::LOCAL_PORT;
pub use signal::{ChildKillTermExt, FdNonblockExt};
