//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services as an `Arc<CoreConfig>`. Request handlers never read
//! process-wide environment variables, which keeps behaviour consistent in
//! multi-threaded runtimes and test harnesses.

use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    doctor_password: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `doctor_password` is the shared secret every doctor logs in with. It
    /// must be non-empty; a process with no doctor secret would lock every
    /// doctor out silently.
    pub fn new(data_dir: PathBuf, doctor_password: String) -> CoreResult<Self> {
        if doctor_password.trim().is_empty() {
            return Err(CoreError::Validation(
                "doctor_password cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            doctor_password,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn doctor_password(&self) -> &str {
        &self.doctor_password
    }
}
