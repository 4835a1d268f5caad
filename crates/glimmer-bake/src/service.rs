//! Seams to the host renderer: showing/hiding highlight geometry,
//! triggering the actual probe bake, and reimporting the baked texture.

use glimmer_core::{BakeTarget, MarkerId, MarkerRegistry, ProbeConfig, Result};
use std::path::Path;

/// Shows and hides the placeholder highlight geometry for a marker.
pub trait HighlightRig {
    fn show(&mut self, id: MarkerId);
    fn hide(&mut self, id: MarkerId);
}

/// External bake service. The one potentially slow, potentially failing
/// step; implementations block until the bake has completed.
pub trait BakeService {
    fn bake(&mut self, target: &BakeTarget, config: &ProbeConfig) -> Result<()>;
}

/// Applies post-bake import settings to the baked texture asset.
pub trait TextureImporter {
    fn apply_mip_bias(&mut self, texture: &Path, bias: f32) -> Result<()>;
}

/// `HighlightRig` that toggles marker visibility in a registry.
pub struct RegistryRig<'a> {
    registry: &'a MarkerRegistry,
}

impl<'a> RegistryRig<'a> {
    pub fn new(registry: &'a MarkerRegistry) -> Self {
        Self { registry }
    }
}

impl HighlightRig for RegistryRig<'_> {
    fn show(&mut self, id: MarkerId) {
        if !self.registry.set_visible(id, true) {
            log::warn!("highlight marker {id} vanished before it could be shown");
        }
    }

    fn hide(&mut self, id: MarkerId) {
        self.registry.set_visible(id, false);
    }
}

/// Bake service that only logs the request. Stands in for a host bake
/// backend in demos and tests.
pub struct NullBakeService;

impl BakeService for NullBakeService {
    fn bake(&mut self, target: &BakeTarget, config: &ProbeConfig) -> Result<()> {
        log::info!(
            "bake requested for probe {} (radius {}) -> {}",
            target.probe,
            config.radius,
            target.baked_texture.display()
        );
        Ok(())
    }
}
