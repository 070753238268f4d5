use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes every record to the log file; warnings and errors also go to stderr so the
/// person running an export sees what was skipped. Without a file everything goes to
/// stderr.
struct ExportLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl ExportLogger {
    fn with_file(file_path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;

        Ok(ExportLogger {
            file: Some(Mutex::new(file)),
        })
    }

    fn stderr_only() -> Self {
        ExportLogger { file: None }
    }

    fn echoes_to_stderr(&self, level: Level) -> bool {
        self.file.is_none() || level <= Level::Warn
    }
}

impl Log for ExportLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if self.echoes_to_stderr(record.level()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
        let Some(file) = &self.file else {
            return;
        };
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(
                file,
                "[{}] [{}] [{}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        if let Some(Ok(mut file)) = self.file.as_ref().map(|file| file.lock()) {
            let _ = file.flush();
        }
    }
}

/// Get the platform-specific log file path
pub fn get_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir()
        .ok_or("Could not determine local data directory")?;

    Ok(data_dir.join("VariableExport").join("variable_export.log"))
}

fn file_logger() -> Result<ExportLogger, Box<dyn std::error::Error>> {
    Ok(ExportLogger::with_file(get_log_file_path()?)?)
}

/// Initialize the logger to write to a single file in local app data, overwriting
/// previous logs. When the file cannot be opened, records go to stderr only.
/// `verbose` lowers the level from info to debug.
pub fn init_logger(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let logger = match file_logger() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to open log file ({}), logging to stderr only", e);
            ExportLogger::stderr_only()
        }
    };
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(ExportLogger::with_file(blocker.join("variable_export.log")).is_err());
    }

    #[test]
    fn test_stderr_only_logger_echoes_every_level() {
        let logger = ExportLogger::stderr_only();
        assert!(logger.echoes_to_stderr(Level::Warn));
        assert!(logger.echoes_to_stderr(Level::Debug));
    }

    #[test]
    fn test_file_logger_echoes_only_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let logger = ExportLogger::with_file(dir.path().join("logs").join("export.log")).unwrap();
        assert!(logger.echoes_to_stderr(Level::Error));
        assert!(logger.echoes_to_stderr(Level::Warn));
        assert!(!logger.echoes_to_stderr(Level::Info));

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("written"))
                .build(),
        );
        let content = fs::read_to_string(dir.path().join("logs").join("export.log")).unwrap();
        assert!(content.contains("[INFO]") && content.contains("written"));
    }
}
