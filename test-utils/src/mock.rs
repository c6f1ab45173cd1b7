use assert_fs::prelude::*;
use assert_fs::TempDir;

pub const CONFIG_FILE_PATH: &str = "etc/plainnotes/plainnotes.toml";
pub const NOTES_FILE_PATH: &str = "var/plainnotes/notes.json";

/// Lays out a config for a daemon on `port` keeping its notes in memory
pub fn setup_config(port: u16) -> TempDir {
    setup_config_impl(port, false)
}

/// Same as [`setup_config`], with notes persisted to [`NOTES_FILE_PATH`]
pub fn setup_config_with_file_storage(port: u16) -> TempDir {
    setup_config_impl(port, true)
}

fn setup_config_impl(port: u16, is_file_storage: bool) -> TempDir {
    let root = TempDir::new().unwrap();
    root.child("etc/plainnotes").create_dir_all().unwrap();

    let storage = if is_file_storage {
        root.child("var/plainnotes").create_dir_all().unwrap();
        let notes_file = root.child(NOTES_FILE_PATH);
        format!(
            "[storage]\nbackend = \"file\"\npath = \"{}\"\n",
            notes_file.to_str().unwrap(),
        )
    } else {
        "[storage]\nbackend = \"memory\"\n".to_owned()
    };
    let config = format!(
        "address = \"127.0.0.1\"\nport = {port}\n\n{storage}"
    );
    root.child(CONFIG_FILE_PATH)
        .write_str(&config)
        .unwrap();
    root
}
