//! Core of the Input Portal settings panel.
//!
//! Holds the settings document shared with the host process, the optimistic
//! synchronizer that persists edits, and the per-slider interpolation state.
//! Nothing in this crate root touches the DOM, so all of it runs in native
//! tests.

use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod hover;
pub mod range;
pub mod reveal;
pub mod sync;
pub mod utils;

pub use range::InterpolatedRange;
pub use sync::{
    ConfigSynchronizer, HostInfo, LockState, Presentation, Reflect, SettingsHost, SyncError, Timer,
};

use config::{
    MAX_KEY_DOWN_MS, MAX_KEY_UP_MS, MAX_MOUSE_MOVE_MS, MAX_MOUSE_RADIUS_PX, MIN_KEY_DOWN_MS,
    MIN_KEY_UP_MS, MIN_MOUSE_MOVE_MS, MIN_MOUSE_RADIUS_PX,
};

/// The settings document, field-for-field identical to the host's JSON.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Configuration {
    pub preset: Option<String>,
    pub enable: bool,
    pub key_down_transition_duration: u32,
    pub key_up_transition_duration: u32,
    pub mouse_move_enable: bool,
    pub mouse_move_radius_px: u32,
    pub mouse_move_transition_duration: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            preset: None,
            enable: true,
            key_down_transition_duration: 0,
            key_up_transition_duration: 100,
            mouse_move_enable: false,
            mouse_move_radius_px: 50,
            mouse_move_transition_duration: 100,
        }
    }
}

/// The closed set of keys the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Preset,
    Enable,
    MouseMoveEnable,
    KeyDownTransitionDuration,
    KeyUpTransitionDuration,
    MouseMoveRadiusPx,
    MouseMoveTransitionDuration,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::Preset,
        SettingKey::Enable,
        SettingKey::MouseMoveEnable,
        SettingKey::KeyDownTransitionDuration,
        SettingKey::KeyUpTransitionDuration,
        SettingKey::MouseMoveRadiusPx,
        SettingKey::MouseMoveTransitionDuration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Preset => "preset",
            SettingKey::Enable => "enable",
            SettingKey::MouseMoveEnable => "mouse_move_enable",
            SettingKey::KeyDownTransitionDuration => "key_down_transition_duration",
            SettingKey::KeyUpTransitionDuration => "key_up_transition_duration",
            SettingKey::MouseMoveRadiusPx => "mouse_move_radius_px",
            SettingKey::MouseMoveTransitionDuration => "mouse_move_transition_duration",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            SettingKey::Preset => ValueKind::Text,
            SettingKey::Enable | SettingKey::MouseMoveEnable => ValueKind::Flag,
            _ => ValueKind::Number,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EditError::UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
    Number,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "optional string"),
            ValueKind::Flag => write!(f, "boolean"),
            ValueKind::Number => write!(f, "non-negative integer"),
        }
    }
}

/// Untyped value for edits that arrive by key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Text(Option<String>),
    Flag(bool),
    Number(u32),
}

/// One edit of one field. Every key has exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Preset(Option<String>),
    Enable(bool),
    MouseMoveEnable(bool),
    KeyDownTransitionDuration(u32),
    KeyUpTransitionDuration(u32),
    MouseMoveRadiusPx(u32),
    MouseMoveTransitionDuration(u32),
}

impl FieldEdit {
    /// Resolve a key name and an untyped value into a typed edit.
    pub fn from_parts(key: &str, value: SettingValue) -> Result<Self, EditError> {
        let key: SettingKey = key.parse()?;
        let edit = match (key, value) {
            (SettingKey::Preset, SettingValue::Text(name)) => FieldEdit::Preset(name),
            (SettingKey::Enable, SettingValue::Flag(on)) => FieldEdit::Enable(on),
            (SettingKey::MouseMoveEnable, SettingValue::Flag(on)) => FieldEdit::MouseMoveEnable(on),
            (SettingKey::KeyDownTransitionDuration, SettingValue::Number(v)) => {
                FieldEdit::KeyDownTransitionDuration(v)
            }
            (SettingKey::KeyUpTransitionDuration, SettingValue::Number(v)) => {
                FieldEdit::KeyUpTransitionDuration(v)
            }
            (SettingKey::MouseMoveRadiusPx, SettingValue::Number(v)) => FieldEdit::MouseMoveRadiusPx(v),
            (SettingKey::MouseMoveTransitionDuration, SettingValue::Number(v)) => {
                FieldEdit::MouseMoveTransitionDuration(v)
            }
            (key, _) => {
                return Err(EditError::TypeMismatch {
                    key,
                    expected: key.kind(),
                })
            }
        };
        Ok(edit)
    }

    pub fn key(&self) -> SettingKey {
        match self {
            FieldEdit::Preset(_) => SettingKey::Preset,
            FieldEdit::Enable(_) => SettingKey::Enable,
            FieldEdit::MouseMoveEnable(_) => SettingKey::MouseMoveEnable,
            FieldEdit::KeyDownTransitionDuration(_) => SettingKey::KeyDownTransitionDuration,
            FieldEdit::KeyUpTransitionDuration(_) => SettingKey::KeyUpTransitionDuration,
            FieldEdit::MouseMoveRadiusPx(_) => SettingKey::MouseMoveRadiusPx,
            FieldEdit::MouseMoveTransitionDuration(_) => SettingKey::MouseMoveTransitionDuration,
        }
    }

    /// Check the edit against slider bounds and the host's preset list.
    pub fn validate(&self, presets: &[String]) -> Result<(), EditError> {
        match self {
            FieldEdit::Preset(Some(name)) if !presets.iter().any(|p| p == name) => {
                Err(EditError::UnknownPreset(name.clone()))
            }
            FieldEdit::Preset(_) | FieldEdit::Enable(_) | FieldEdit::MouseMoveEnable(_) => Ok(()),
            FieldEdit::KeyDownTransitionDuration(v)
            | FieldEdit::KeyUpTransitionDuration(v)
            | FieldEdit::MouseMoveRadiusPx(v)
            | FieldEdit::MouseMoveTransitionDuration(v) => {
                let field = NumericField::for_key(self.key()).ok_or(EditError::TypeMismatch {
                    key: self.key(),
                    expected: ValueKind::Number,
                })?;
                let (min, max) = field.bounds();
                if (min..=max).contains(v) {
                    Ok(())
                } else {
                    Err(EditError::OutOfBounds {
                        key: self.key(),
                        value: *v,
                        min,
                        max,
                    })
                }
            }
        }
    }

    /// Copy of `doc` with this edit applied.
    pub fn apply_to(&self, doc: &Configuration) -> Configuration {
        let mut next = doc.clone();
        match self {
            FieldEdit::Preset(name) => next.preset = name.clone(),
            FieldEdit::Enable(on) => next.enable = *on,
            FieldEdit::MouseMoveEnable(on) => next.mouse_move_enable = *on,
            FieldEdit::KeyDownTransitionDuration(v) => next.key_down_transition_duration = *v,
            FieldEdit::KeyUpTransitionDuration(v) => next.key_up_transition_duration = *v,
            FieldEdit::MouseMoveRadiusPx(v) => next.mouse_move_radius_px = *v,
            FieldEdit::MouseMoveTransitionDuration(v) => next.mouse_move_transition_duration = *v,
        }
        next
    }
}

/// The four slider-backed settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    KeyDownTransition,
    KeyUpTransition,
    MouseMoveRadius,
    MouseMoveTransition,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::KeyDownTransition,
        NumericField::KeyUpTransition,
        NumericField::MouseMoveRadius,
        NumericField::MouseMoveTransition,
    ];

    pub fn for_key(key: SettingKey) -> Option<Self> {
        match key {
            SettingKey::KeyDownTransitionDuration => Some(NumericField::KeyDownTransition),
            SettingKey::KeyUpTransitionDuration => Some(NumericField::KeyUpTransition),
            SettingKey::MouseMoveRadiusPx => Some(NumericField::MouseMoveRadius),
            SettingKey::MouseMoveTransitionDuration => Some(NumericField::MouseMoveTransition),
            _ => None,
        }
    }

    pub fn key(self) -> SettingKey {
        match self {
            NumericField::KeyDownTransition => SettingKey::KeyDownTransitionDuration,
            NumericField::KeyUpTransition => SettingKey::KeyUpTransitionDuration,
            NumericField::MouseMoveRadius => SettingKey::MouseMoveRadiusPx,
            NumericField::MouseMoveTransition => SettingKey::MouseMoveTransitionDuration,
        }
    }

    /// Inclusive (min, max) of the slider backing this field.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            NumericField::KeyDownTransition => (MIN_KEY_DOWN_MS, MAX_KEY_DOWN_MS),
            NumericField::KeyUpTransition => (MIN_KEY_UP_MS, MAX_KEY_UP_MS),
            NumericField::MouseMoveRadius => (MIN_MOUSE_RADIUS_PX, MAX_MOUSE_RADIUS_PX),
            NumericField::MouseMoveTransition => (MIN_MOUSE_MOVE_MS, MAX_MOUSE_MOVE_MS),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::KeyDownTransition => "Key down transition",
            NumericField::KeyUpTransition => "Key up transition",
            NumericField::MouseMoveRadius => "Mouse move radius",
            NumericField::MouseMoveTransition => "Mouse move transition",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            NumericField::MouseMoveRadius => "px",
            _ => "ms",
        }
    }

    pub fn read(self, doc: &Configuration) -> u32 {
        match self {
            NumericField::KeyDownTransition => doc.key_down_transition_duration,
            NumericField::KeyUpTransition => doc.key_up_transition_duration,
            NumericField::MouseMoveRadius => doc.mouse_move_radius_px,
            NumericField::MouseMoveTransition => doc.mouse_move_transition_duration,
        }
    }

    pub fn edit(self, value: u32) -> FieldEdit {
        match self {
            NumericField::KeyDownTransition => FieldEdit::KeyDownTransitionDuration(value),
            NumericField::KeyUpTransition => FieldEdit::KeyUpTransitionDuration(value),
            NumericField::MouseMoveRadius => FieldEdit::MouseMoveRadiusPx(value),
            NumericField::MouseMoveTransition => FieldEdit::MouseMoveTransitionDuration(value),
        }
    }
}

// Edits rejected before any host call is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    UnknownKey(String),
    TypeMismatch {
        key: SettingKey,
        expected: ValueKind,
    },
    OutOfBounds {
        key: SettingKey,
        value: u32,
        min: u32,
        max: u32,
    },
    UnknownPreset(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownKey(key) => write!(f, "Unknown setting key '{}'", key),
            EditError::TypeMismatch { key, expected } => {
                write!(f, "Setting '{}' expects a {} value", key, expected)
            }
            EditError::OutOfBounds {
                key,
                value,
                min,
                max,
            } => write!(
                f,
                "Value {} for '{}' is outside the allowed range [{} to {}]",
                value, key, min, max
            ),
            EditError::UnknownPreset(name) => write!(f, "Preset '{}' is not installed", name),
        }
    }
}

impl std::error::Error for EditError {}

/// Failures talking to the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    Call { command: String, message: String },
    Encode(String),
    Decode { command: String, message: String },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Call { command, message } => {
                write!(f, "Host command '{}' failed: {}", command, message)
            }
            HostError::Encode(message) => write!(f, "Failed to encode host arguments: {}", message),
            HostError::Decode { command, message } => write!(
                f,
                "Failed to decode the reply of host command '{}': {}",
                command, message
            ),
        }
    }
}

impl std::error::Error for HostError {}
