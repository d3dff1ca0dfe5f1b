// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The session descriptor file: the one piece of state a session persists to
//! disk (see spec §3.1, §6.1). It lets a second CLI invocation find the
//! daemon that already has a capture open, without the daemon keeping any
//! other durable state.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Eid;

#[derive(Debug, Error)]
pub enum SessionDescriptorError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed descriptor at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The on-disk record of an open capture session.
///
/// Written atomically (write to a temp file, then rename) so a reader never
/// observes a half-written descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDescriptor {
    pub pid: u32,
    pub host: String,
    pub port: u16,
    pub token: String,
    pub capture: PathBuf,
    pub opened_at: String,
    /// The replay head's user-visible position; `0` until the first `goto`.
    pub current_eid: Eid,
}

impl SessionDescriptor {
    /// The directory all session descriptors live under: `$RDC_HOME/sessions`
    /// if `RDC_HOME` is set, otherwise `$HOME/.rdc/sessions`.
    pub fn sessions_dir() -> io::Result<PathBuf> {
        if let Ok(dir) = std::env::var("RDC_HOME") {
            return Ok(PathBuf::from(dir).join("sessions"));
        }
        let home = dirs_home()?;
        Ok(home.join(".rdc").join("sessions"))
    }

    /// Path to the descriptor file for a named session.
    pub fn path_for(name: &str) -> io::Result<PathBuf> {
        Ok(Self::sessions_dir()?.join(format!("{name}.json")))
    }

    /// Create the sessions directory (mode 0700) and write this descriptor
    /// (mode 0600) for `name`, atomically.
    ///
    /// Permissions are set explicitly with `set_permissions` rather than
    /// relied on from `create_dir`/`File::create`, so the result doesn't
    /// depend on the caller's umask.
    pub fn create(&self, name: &str) -> Result<(), SessionDescriptorError> {
        let dir = Self::sessions_dir()?;
        std::fs::create_dir_all(&dir)?;
        set_mode(&dir, 0o700)?;

        let path = dir.join(format!("{name}.json"));
        let tmp_path = dir.join(format!(".{name}.json.tmp"));
        let body = serde_json::to_vec_pretty(self).map_err(|source| {
            SessionDescriptorError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&tmp_path, body)?;
        set_mode(&tmp_path, 0o600)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load the descriptor for a named session.
    pub fn load(name: &str) -> Result<Self, SessionDescriptorError> {
        let path = Self::path_for(name)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, SessionDescriptorError> {
        let body = std::fs::read(path)?;
        serde_json::from_slice(&body).map_err(|source| SessionDescriptorError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist an updated `current_eid` back to the descriptor file, atomically.
    pub fn persist_current_eid(&mut self, name: &str, eid: Eid) -> Result<(), SessionDescriptorError> {
        self.current_eid = eid;
        self.create(name)
    }

    /// Remove the descriptor file for a named session, if present.
    pub fn remove(name: &str) -> io::Result<()> {
        let path = Self::path_for(name)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether the process recorded in `pid` is still alive.
    ///
    /// A descriptor whose daemon has died (crashed, killed, machine
    /// rebooted) is "stale" — callers should treat it as absent and clean
    /// it up rather than trying to connect.
    pub fn is_stale(&self) -> bool {
        !pid_is_running(self.pid)
    }

    /// List the names of all session descriptors currently on disk,
    /// pruning any that are stale as a side effect.
    pub fn list_live(sessions_dir: Option<&Path>) -> io::Result<Vec<String>> {
        let dir = match sessions_dir {
            Some(d) => d.to_path_buf(),
            None => Self::sessions_dir()?,
        };
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if stem.starts_with('.') {
                continue;
            }
            match Self::load_from(&path) {
                Ok(desc) if desc.is_stale() => {
                    let _ = std::fs::remove_file(&path);
                }
                Ok(_) => names.push(stem.to_string()),
                Err(_) => {
                    // Unreadable descriptor; leave it for manual inspection.
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn dirs_home() -> io::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| io::Error::other("HOME directory could not be determined"))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

fn pid_is_running(pid: u32) -> bool {
    use sysinfo::{Pid, System};
    let mut system = System::new();
    system.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    system.process(Pid::from_u32(pid)).is_some()
}

#[cfg(test)]
#[path = "session_descriptor_tests.rs"]
mod tests;
