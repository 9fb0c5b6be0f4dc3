//! Calibration session configuration.
//!
//! A session document is TOML with one `cam_{port}` table per camera and one
//! `stereo_{a}_{b}` table per calibrated pair. Parsing is all-or-nothing:
//! any malformed or missing field fails with a [`ConfigError`] naming the
//! offending key, and no partial configuration is returned.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use camrig_core::{is_rotation, CameraData, Distortion, Mat3, Port, Real, StereoPair, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for the orthonormality check on configured rotations.
const ROTATION_TOLERANCE: Real = 1e-6;

/// Errors raised while reading a session document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config key `{key}`: expected `cam_{{port}}` or `stereo_{{a}}_{{b}}`")]
    MalformedKey { key: String },
    #[error("config key `{key}`: {reason}")]
    Record { key: String, reason: String },
    #[error("config key `{key}`: port field {port} does not match the key")]
    PortMismatch { key: String, port: Port },
    #[error("config key `{key}`: camera port {port} already defined")]
    DuplicatePort { key: String, port: Port },
    #[error("config key `{key}`: rotation is not orthonormal")]
    BadRotation { key: String },
}

/// One `cam_{port}` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraRecord {
    pub port: Port,
    pub size: (u32, u32),
    pub rotation_count: u8,
    pub error: Real,
    pub matrix: [[Real; 3]; 3],
    pub distortions: [Real; 5],
    pub exposure: i32,
    pub grid_count: u32,
    pub ignore: bool,
    pub verified_resolutions: Vec<(u32, u32)>,
}

impl CameraRecord {
    /// Build the camera data this record describes, posed at the world
    /// origin. The frame resolver assigns the real pose.
    pub fn build(&self) -> CameraData {
        CameraData {
            port: self.port,
            size: self.size,
            rotation_count: self.rotation_count,
            error: self.error,
            matrix: mat3_from_rows(&self.matrix),
            distortion: Distortion::from_coeffs(self.distortions),
            exposure: self.exposure,
            grid_count: self.grid_count,
            ignore: self.ignore,
            verified_resolutions: self.verified_resolutions.clone(),
            rotation: Mat3::identity(),
            translation: Vec3::zeros(),
        }
    }
}

/// One `stereo_{a}_{b}` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StereoRecord {
    pub rotation: [[Real; 3]; 3],
    pub translation: [Real; 3],
    #[serde(rename = "RMSE")]
    pub rmse: Real,
}

/// Parsed session document: camera records keyed by port plus the stereo
/// edge table.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    pub cameras: BTreeMap<Port, CameraRecord>,
    pub stereo: Vec<StereoPair>,
}

impl SessionConfig {
    /// Parse a session document from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = text.parse()?;

        let mut cameras = BTreeMap::new();
        let mut stereo = Vec::new();

        for (key, value) in &table {
            if let Some(suffix) = key.strip_prefix("cam_") {
                let port: Port = suffix
                    .parse()
                    .map_err(|_| ConfigError::MalformedKey { key: key.clone() })?;
                let record: CameraRecord =
                    value.clone().try_into().map_err(|e: toml::de::Error| {
                        ConfigError::Record {
                            key: key.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                if record.port != port {
                    return Err(ConfigError::PortMismatch {
                        key: key.clone(),
                        port: record.port,
                    });
                }
                if cameras.insert(port, record).is_some() {
                    return Err(ConfigError::DuplicatePort {
                        key: key.clone(),
                        port,
                    });
                }
            } else if let Some(suffix) = key.strip_prefix("stereo_") {
                let pair = parse_pair_suffix(suffix)
                    .ok_or_else(|| ConfigError::MalformedKey { key: key.clone() })?;
                let record: StereoRecord =
                    value.clone().try_into().map_err(|e: toml::de::Error| {
                        ConfigError::Record {
                            key: key.clone(),
                            reason: e.to_string(),
                        }
                    })?;

                let rotation = mat3_from_rows(&record.rotation);
                if !is_rotation(&rotation, ROTATION_TOLERANCE) {
                    return Err(ConfigError::BadRotation { key: key.clone() });
                }
                stereo.push(StereoPair::new(
                    pair,
                    rotation,
                    Vec3::from_row_slice(&record.translation),
                    record.rmse,
                ));
            }
            // other sections (session metadata, board definitions, ...) are
            // owned by collaborators and skipped here
        }

        Ok(Self { cameras, stereo })
    }

    /// Parse a session document from a file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Ports of the cameras that participate in the rig, in ascending order.
    pub fn active_ports(&self) -> Vec<Port> {
        self.cameras
            .values()
            .filter(|c| !c.ignore)
            .map(|c| c.port)
            .collect()
    }

    /// Stereo edges whose endpoints are both active cameras.
    pub fn active_stereo(&self) -> Vec<&StereoPair> {
        let active = self.active_ports();
        self.stereo
            .iter()
            .filter(|s| active.contains(&s.primary()) && active.contains(&s.secondary()))
            .collect()
    }
}

fn mat3_from_rows(rows: &[[Real; 3]; 3]) -> Mat3 {
    Mat3::from_row_slice(&[
        rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
        rows[2][1], rows[2][2],
    ])
}

fn parse_pair_suffix(suffix: &str) -> Option<(Port, Port)> {
    let (a, b) = suffix.split_once('_')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}
