use std::{
    fs::{self, File, OpenOptions},
    io::Write as _,
    path::{Path, PathBuf},
    process,
};

use coffee_ledger::Host;
use fs4::FileExt;

use crate::{
    cli::LedgerOptions,
    config::{self, Config},
    error::{CliError, Result},
    ui,
};

/// An exclusive advisory lock on the `.lock` file next to a state file, released
/// when dropped.
///
/// The lock lives on a separate file because saving renames a new state file
/// over the old one, and a lock on the replaced inode would protect nothing.
#[derive(Debug)]
struct Lock(File);

impl Lock {
    fn acquire(state_path: &Path) -> Result<Self> {
        let path = lock_path(state_path);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        FileExt::lock_exclusive(&file).map_err(|source| CliError::Lock {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "acquired ledger lock");

        Ok(Self(file))
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        if let Err(error) = FileExt::unlock(&self.0) {
            tracing::warn!("failed to unlock ledger: {error}");
        }
    }
}

/// A host loaded from its state file, written back with [`LedgerFile::save`].
///
/// The ledger lock is held from [`LedgerFile::open`] until the value is
/// dropped, so concurrent invocations read, execute and save one at a time.
#[derive(Debug)]
pub struct LedgerFile {
    pub config: Config,
    pub path: PathBuf,
    pub host: Host,
    _lock: Lock,
}

impl LedgerFile {
    pub fn open(options: &LedgerOptions) -> Result<Self> {
        let config = config::load(&options.config)?;
        let path = options
            .state
            .clone()
            .unwrap_or_else(|| config.state.clone());

        ensure_parent_dir(&path)?;
        let lock = Lock::acquire(&path)?;
        let host = load_host(&path)?;

        Ok(Self {
            config,
            path,
            host,
            _lock: lock,
        })
    }

    /// Writes the host to a staging file owned by this process, then renames
    /// it into place so an interrupted save never leaves a truncated file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.host)?;
        let staging = staging_path(&self.path);

        let written = File::create(&staging).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(error) = written {
            let _ = fs::remove_file(&staging);
            return Err(error.into());
        }
        fs::rename(&staging, &self.path)?;

        tracing::debug!(path = %self.path.display(), height = self.host.height(), "saved ledger");
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn lock_path(state_path: &Path) -> PathBuf {
    let mut name = state_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn staging_path(state_path: &Path) -> PathBuf {
    let mut name = state_path.as_os_str().to_owned();
    name.push(format!(".{}.tmp", process::id()));
    PathBuf::from(name)
}

fn load_host(path: &Path) -> Result<Host> {
    if !path.exists() {
        ui::status(format!("Starting a new ledger at {}", path.display()));
        return Ok(Host::new());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::CorruptState {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_files_sit_next_to_the_state_file() {
        let state = Path::new("ledger/state.json");

        assert_eq!(lock_path(state), PathBuf::from("ledger/state.json.lock"));
        assert_eq!(
            staging_path(state),
            PathBuf::from(format!("ledger/state.json.{}.tmp", process::id()))
        );
    }
}
