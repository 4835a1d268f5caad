use crate::error::{BakeError, Result};
use glam::Vec3;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub type ProbeId = u64;

pub const MIP_BIAS_MIN: f32 = -12.0;
pub const MIP_BIAS_MAX: f32 = 12.0;

/// Bake settings for one reflection probe. A larger mip bias makes the
/// baked cubemap blurrier, making highlights more drastic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    pub position: Vec3,
    /// Highlights are only drawn for markers inside this radius.
    pub radius: f32,
    pub mip_bias: f32,
}

impl ProbeConfig {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            radius: 100.0,
            mip_bias: 0.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mip_bias(mut self, mip_bias: f32) -> Self {
        self.mip_bias = mip_bias;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius >= 0.0) {
            return Err(BakeError::InvalidConfig(format!(
                "radius must be >= 0, got {}",
                self.radius
            )));
        }
        if !(MIP_BIAS_MIN..=MIP_BIAS_MAX).contains(&self.mip_bias) {
            return Err(BakeError::InvalidConfig(format!(
                "mip bias must be in [{MIP_BIAS_MIN}, {MIP_BIAS_MAX}], got {}",
                self.mip_bias
            )));
        }
        Ok(())
    }

    /// Selection volume for debug drawing (wire sphere around the probe).
    pub fn selection_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Handle to a probe asset and its baked-output texture. The underlying
/// asset is owned by the host renderer; this crate only passes the handle
/// to the bake service and the texture importer.
#[derive(Debug, Clone)]
pub struct BakeTarget {
    pub probe: ProbeId,
    pub baked_texture: PathBuf,
}

impl BakeTarget {
    pub fn new(probe: ProbeId, baked_texture: impl Into<PathBuf>) -> Self {
        Self {
            probe,
            baked_texture: baked_texture.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeEntry {
    pub config: ProbeConfig,
    pub target: BakeTarget,
}

pub struct ProbeRegistry {
    probes: Arc<RwLock<HashMap<ProbeId, ProbeEntry>>>,
    next_probe_id: Arc<RwLock<ProbeId>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self {
            probes: Arc::new(RwLock::new(HashMap::new())),
            next_probe_id: Arc::new(RwLock::new(0)),
        }
    }

    pub fn add_probe(&mut self, config: ProbeConfig, baked_texture: impl Into<PathBuf>) -> ProbeId {
        let mut next_id = self.next_probe_id.write();
        let id = *next_id;
        *next_id += 1;

        let entry = ProbeEntry {
            config,
            target: BakeTarget::new(id, baked_texture),
        };
        self.probes.write().insert(id, entry);
        id
    }

    pub fn remove_probe(&mut self, id: ProbeId) -> Option<ProbeEntry> {
        self.probes.write().remove(&id)
    }

    pub fn get_probe(&self, id: ProbeId) -> Option<ProbeEntry> {
        self.probes.read().get(&id).cloned()
    }

    /// Returns false when the probe no longer exists.
    pub fn set_config(&self, id: ProbeId, config: ProbeConfig) -> bool {
        let mut probes = self.probes.write();
        match probes.get_mut(&id) {
            Some(entry) => {
                entry.config = config;
                true
            }
            None => false,
        }
    }

    /// Ids in ascending order, so batch runs visit probes deterministically.
    pub fn probe_ids(&self) -> Vec<ProbeId> {
        let mut ids: Vec<ProbeId> = self.probes.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn probe_count(&self) -> usize {
        self.probes.read().len()
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
