use crate::orchestrator::{BakeOrchestrator, BakeState};
use crate::service::{BakeService, RegistryRig, TextureImporter};
use glimmer_core::{BakeError, MarkerRegistry, ProbeId, ProbeRegistry, Result};

/// What a batch run does when one probe fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the batch at the first failing probe.
    #[default]
    StopOnFirstError,
    /// Log the failure, keep baking the remaining probes, and return the
    /// first error at the end.
    ContinueOnError,
}

/// Owns the marker and probe registries plus the bake collaborators, and
/// exposes the render / render-all / apply-mip-bias surface.
pub struct SpecularProbeRenderer<S, I> {
    markers: MarkerRegistry,
    probes: ProbeRegistry,
    service: S,
    importer: I,
    orchestrator: BakeOrchestrator,
}

impl<S: BakeService, I: TextureImporter> SpecularProbeRenderer<S, I> {
    pub fn new(service: S, importer: I) -> Self {
        Self {
            markers: MarkerRegistry::new(),
            probes: ProbeRegistry::new(),
            service,
            importer,
            orchestrator: BakeOrchestrator::new(),
        }
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerRegistry {
        &mut self.markers
    }

    pub fn probes(&self) -> &ProbeRegistry {
        &self.probes
    }

    pub fn probes_mut(&mut self) -> &mut ProbeRegistry {
        &mut self.probes
    }

    /// Terminal state of the most recent bake run.
    pub fn last_bake_state(&self) -> BakeState {
        self.orchestrator.state()
    }

    /// Bakes one probe: selects markers in its radius, shows them, bakes,
    /// applies the configured mip bias, hides them again.
    pub fn render(&mut self, probe_id: ProbeId) -> Result<()> {
        let entry = self
            .probes
            .get_probe(probe_id)
            .ok_or(BakeError::ProbeNotFound(probe_id))?;

        let selected = self
            .markers
            .markers_within(entry.config.position, entry.config.radius);
        log::info!(
            "baking probe {probe_id}: {} highlight markers in radius {}",
            selected.len(),
            entry.config.radius
        );

        let mut rig = RegistryRig::new(&self.markers);
        self.orchestrator.bake(
            &entry.target,
            &entry.config,
            &selected,
            &mut rig,
            &mut self.service,
            &mut self.importer,
        )
    }

    /// Bakes every registered probe sequentially, in probe-id order.
    pub fn render_all(&mut self, policy: ErrorPolicy) -> Result<()> {
        let mut first_error = None;
        for probe_id in self.probes.probe_ids() {
            if let Err(err) = self.render(probe_id) {
                match policy {
                    ErrorPolicy::StopOnFirstError => return Err(err),
                    ErrorPolicy::ContinueOnError => {
                        log::warn!("continuing past failed probe {probe_id}: {err}");
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Re-applies the probe's configured mip bias without baking.
    pub fn apply_mip_bias(&mut self, probe_id: ProbeId) -> Result<()> {
        let entry = self
            .probes
            .get_probe(probe_id)
            .ok_or(BakeError::ProbeNotFound(probe_id))?;
        entry.config.validate()?;

        self.importer
            .apply_mip_bias(&entry.target.baked_texture, entry.config.mip_bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::NullBakeService;
    use glam::Vec3;
    use glimmer_core::{BakeTarget, HighlightMarker, ProbeConfig};
    use std::path::Path;

    /// Importer that never touches the disk.
    struct MemoryImporter {
        applied: Vec<f32>,
    }

    impl MemoryImporter {
        fn new() -> Self {
            Self { applied: Vec::new() }
        }
    }

    impl TextureImporter for MemoryImporter {
        fn apply_mip_bias(&mut self, _texture: &Path, bias: f32) -> Result<()> {
            self.applied.push(bias);
            Ok(())
        }
    }

    /// Fails every bake for the probes listed.
    struct FailingBake {
        fail_probes: Vec<ProbeId>,
        attempts: Vec<ProbeId>,
    }

    impl BakeService for FailingBake {
        fn bake(&mut self, target: &BakeTarget, _config: &ProbeConfig) -> Result<()> {
            self.attempts.push(target.probe);
            if self.fail_probes.contains(&target.probe) {
                return Err(BakeError::BakeFailed {
                    probe: target.probe,
                    reason: "backend refused".into(),
                });
            }
            Ok(())
        }
    }

    fn renderer_with_probes(
        fail_probes: Vec<ProbeId>,
        probe_count: u64,
    ) -> SpecularProbeRenderer<FailingBake, MemoryImporter> {
        let service = FailingBake {
            fail_probes,
            attempts: Vec::new(),
        };
        let mut renderer = SpecularProbeRenderer::new(service, MemoryImporter::new());
        for i in 0..probe_count {
            let config = ProbeConfig::new(Vec3::new(i as f32 * 100.0, 0.0, 0.0)).with_radius(10.0);
            renderer
                .probes_mut()
                .add_probe(config, format!("probe{i}.exr"));
        }
        renderer
    }

    #[test]
    fn render_unknown_probe_fails() {
        let mut renderer = renderer_with_probes(vec![], 0);
        assert!(matches!(
            renderer.render(7),
            Err(BakeError::ProbeNotFound(7))
        ));
    }

    #[test]
    fn render_hides_markers_even_when_bake_fails() {
        let mut renderer = renderer_with_probes(vec![0], 1);
        let near = renderer
            .markers_mut()
            .add_marker(HighlightMarker::new(Vec3::new(5.0, 0.0, 0.0)));

        let result = renderer.render(0);
        assert!(matches!(result, Err(BakeError::BakeFailed { probe: 0, .. })));
        assert!(!renderer.markers().get_marker(near).unwrap().visible);
        assert_eq!(renderer.last_bake_state(), BakeState::Failed);
    }

    #[test]
    fn render_selects_only_markers_in_radius() {
        let mut renderer = renderer_with_probes(vec![], 1);
        // Probe 0 sits at the origin with radius 10.
        renderer
            .markers_mut()
            .add_marker(HighlightMarker::new(Vec3::new(5.0, 0.0, 0.0)));
        renderer
            .markers_mut()
            .add_marker(HighlightMarker::new(Vec3::new(10.0, 0.0, 0.0)));
        renderer
            .markers_mut()
            .add_marker(HighlightMarker::new(Vec3::new(15.0, 0.0, 0.0)));

        assert_eq!(renderer.markers().markers_within(Vec3::ZERO, 10.0).len(), 1);
        renderer.render(0).unwrap();
        assert_eq!(renderer.last_bake_state(), BakeState::Done);
        // All markers end up hidden after the run.
        assert!(renderer.markers().visible_markers().is_empty());
    }

    #[test]
    fn render_all_stops_on_first_error_by_default() {
        let mut renderer = renderer_with_probes(vec![1], 3);
        let result = renderer.render_all(ErrorPolicy::StopOnFirstError);

        assert!(matches!(result, Err(BakeError::BakeFailed { probe: 1, .. })));
        assert_eq!(renderer.service.attempts, vec![0, 1]);
    }

    #[test]
    fn render_all_continue_on_error_visits_every_probe() {
        let mut renderer = renderer_with_probes(vec![1], 3);
        let result = renderer.render_all(ErrorPolicy::ContinueOnError);

        // First failure is still reported after the batch finishes.
        assert!(matches!(result, Err(BakeError::BakeFailed { probe: 1, .. })));
        assert_eq!(renderer.service.attempts, vec![0, 1, 2]);
    }

    #[test]
    fn apply_mip_bias_uses_probe_config() {
        let mut renderer = renderer_with_probes(vec![], 1);
        let config = ProbeConfig::new(Vec3::ZERO).with_mip_bias(-2.0);
        assert!(renderer.probes().set_config(0, config));

        renderer.apply_mip_bias(0).unwrap();
        renderer.apply_mip_bias(0).unwrap();
        assert_eq!(renderer.importer.applied, vec![-2.0, -2.0]);
    }

    #[test]
    fn apply_mip_bias_rejects_invalid_config() {
        let mut renderer = renderer_with_probes(vec![], 1);
        let config = ProbeConfig::new(Vec3::ZERO).with_mip_bias(99.0);
        renderer.probes().set_config(0, config);

        assert!(matches!(
            renderer.apply_mip_bias(0),
            Err(BakeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn null_service_renders_clean_scene() {
        let mut renderer = SpecularProbeRenderer::new(NullBakeService, MemoryImporter::new());
        renderer
            .probes_mut()
            .add_probe(ProbeConfig::new(Vec3::ZERO).with_radius(10.0), "p.exr");
        renderer.render_all(ErrorPolicy::default()).unwrap();
    }
}
