//! Log file writer

use crate::logger::config::FileConfig;
use std::fs::{File, OpenOptions};
use std::sync::Mutex;

/// Opens the configured log file, creating parent directories as needed.
///
/// The returned `Mutex<File>` implements `MakeWriter`, so it can be handed
/// straight to a `fmt` layer.
pub fn open_log_writer(config: &FileConfig) -> anyhow::Result<Mutex<File>> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    let file = options.open(&config.path)?;
    Ok(Mutex::new(file))
}
