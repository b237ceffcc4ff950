//! File writer for the logger

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::logger::config::FileConfig;

/// Opens the configured log file, creating parent directories as needed.
///
/// `Mutex<File>` implements `MakeWriter`, so the result plugs straight into
/// a `fmt` layer.
pub(crate) fn open_file_writer(config: &FileConfig) -> io::Result<Mutex<File>> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    open_log_file(&config.path, config.append).map(Mutex::new)
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);

    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options.open(path)
}
