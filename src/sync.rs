//! Optimistic persistence of settings edits.
//!
//! `ConfigSynchronizer` owns the only authoritative copy of the settings
//! document. Every edit goes through `request_update`, which validates it,
//! locks the whole panel, asks the host to store the candidate document and
//! only then adopts it. Whatever the host answers, inputs come back after a
//! fixed settle delay.
//!
//! All methods take `&self`: the document and the lock live in `RefCell` /
//! `Cell` and are never borrowed across an `.await`, so the shell can share
//! one synchronizer through an `Rc` on the single browser thread.

use crate::config::SETTLE_DELAY_MS;
use crate::{Configuration, FieldEdit, HostError, SettingKey, SettingValue};
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::fmt;

/// Request/response calls into the host process.
#[allow(async_fn_in_trait)]
pub trait SettingsHost {
    async fn load_config(&self) -> Result<Configuration, HostError>;
    /// `Ok(false)` means the host refused to store the candidate.
    async fn save_config(&self, candidate: &Configuration) -> Result<bool, HostError>;
    async fn load_port(&self) -> Result<Option<u16>, HostError>;
    async fn load_version(&self) -> Result<String, HostError>;
    async fn load_presets(&self) -> Result<Vec<String>, HostError>;
    async fn close_window(&self);
    async fn open_external(&self, site: &str);
}

/// What the synchronizer tells the UI shell.
pub trait Presentation {
    fn disable_all(&self);
    fn enable_all(&self);
    fn reflect(&self, committed: &Configuration, cause: Reflect);
}

#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, ms: u32);
}

/// Why `Presentation::reflect` was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflect {
    Loaded,
    Committed(SettingKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Idle,
    Saving,
}

/// Side data fetched from the host next to the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostInfo {
    pub port: Option<u16>,
    pub version: String,
    pub presets: Vec<String>,
}

#[derive(Debug)]
pub enum SyncError {
    /// The host could not deliver the startup data.
    Load(HostError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Load(err) => write!(f, "Failed to load settings from the host: {}", err),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Load(err) => Some(err),
        }
    }
}

pub struct ConfigSynchronizer<H, P, T> {
    host: H,
    presentation: P,
    timer: T,
    document: RefCell<Configuration>,
    info: HostInfo,
    state: Cell<LockState>,
}

impl<H, P, T> ConfigSynchronizer<H, P, T>
where
    H: SettingsHost,
    P: Presentation,
    T: Timer,
{
    /// Load the document and side data, then unlock the panel.
    ///
    /// A synchronizer only exists once loading succeeded, so no edit can be
    /// accepted against default values.
    pub async fn initialize(host: H, presentation: P, timer: T) -> Result<Self, SyncError> {
        let presets = host.load_presets().await.map_err(SyncError::Load)?;
        let document = host.load_config().await.map_err(SyncError::Load)?;
        let port = match host.load_port().await {
            Ok(port) => port,
            Err(err) => {
                warn!("Input server port unavailable: {}", err);
                None
            }
        };
        let version = host.load_version().await.map_err(SyncError::Load)?;

        info!(
            "Loaded settings v{} ({} presets, port {:?})",
            version,
            presets.len(),
            port
        );
        debug!("Initial settings: {:?}", document);

        let synchronizer = Self {
            host,
            presentation,
            timer,
            document: RefCell::new(document),
            info: HostInfo {
                port,
                version,
                presets,
            },
            state: Cell::new(LockState::Idle),
        };
        synchronizer
            .presentation
            .reflect(&synchronizer.snapshot(), Reflect::Loaded);
        synchronizer.presentation.enable_all();
        Ok(synchronizer)
    }

    /// Copy of the last committed document.
    pub fn snapshot(&self) -> Configuration {
        self.document.borrow().clone()
    }

    pub fn lock_state(&self) -> LockState {
        self.state.get()
    }

    pub fn info(&self) -> &HostInfo {
        &self.info
    }

    /// Resolve `key` by name and persist it; `false` for unknown keys or
    /// mismatched value types, without touching the lock.
    pub async fn request_update_by_name(&self, key: &str, value: SettingValue) -> bool {
        match FieldEdit::from_parts(key, value) {
            Ok(edit) => self.request_update(edit).await,
            Err(err) => {
                warn!("Rejected settings edit: {}", err);
                false
            }
        }
    }

    /// Persist one edit. Returns whether it was committed.
    ///
    /// On `false` the caller restores whatever it displayed before the edit.
    pub async fn request_update(&self, edit: FieldEdit) -> bool {
        let key = edit.key();
        if let Err(err) = edit.validate(&self.info.presets) {
            warn!("Rejected settings edit: {}", err);
            return false;
        }
        if self.state.get() == LockState::Saving {
            warn!("Edit of '{}' requested while another save is in flight", key);
        }

        self.state.set(LockState::Saving);
        self.presentation.disable_all();

        let candidate = edit.apply_to(&self.document.borrow());
        debug!("Saving '{}': {:?}", key, candidate);

        let saved = match self.host.save_config(&candidate).await {
            Ok(saved) => saved,
            Err(err) => {
                warn!("Saving '{}' failed: {}", key, err);
                false
            }
        };

        if saved {
            *self.document.borrow_mut() = candidate.clone();
            info!("Committed '{}'", key);
            self.presentation.reflect(&candidate, Reflect::Committed(key));
        } else {
            info!("Host refused '{}', keeping the previous value", key);
        }

        self.timer.sleep(SETTLE_DELAY_MS).await;
        self.state.set(LockState::Idle);
        self.presentation.enable_all();
        saved
    }
}
