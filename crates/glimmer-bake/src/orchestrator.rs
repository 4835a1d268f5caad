use crate::service::{BakeService, HighlightRig, TextureImporter};
use glimmer_core::{BakeTarget, MarkerId, ProbeConfig, Result};

/// Phase of a single bake run. Any failure while baking or adjusting
/// still passes through `Hiding` before ending in `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BakeState {
    Idle,
    Showing,
    Baking,
    Adjusting,
    Hiding,
    Done,
    Failed,
}

/// Drives the show -> bake -> adjust -> hide sequence for one probe.
///
/// Markers shown in step one are hidden again on every exit path; a
/// failing bake or adjust propagates only after the scene is clean.
pub struct BakeOrchestrator {
    state: BakeState,
}

impl BakeOrchestrator {
    pub fn new() -> Self {
        Self {
            state: BakeState::Idle,
        }
    }

    /// Terminal state of the most recent run (`Idle` before the first).
    pub fn state(&self) -> BakeState {
        self.state
    }

    pub fn bake(
        &mut self,
        target: &BakeTarget,
        config: &ProbeConfig,
        selected: &[MarkerId],
        rig: &mut dyn HighlightRig,
        service: &mut dyn BakeService,
        importer: &mut dyn TextureImporter,
    ) -> Result<()> {
        // Fail fast before any marker is touched.
        if let Err(err) = config.validate() {
            self.state = BakeState::Failed;
            return Err(err);
        }

        self.state = BakeState::Showing;
        log::debug!(
            "probe {}: showing {} highlight markers",
            target.probe,
            selected.len()
        );
        for &id in selected {
            rig.show(id);
        }

        self.state = BakeState::Baking;
        let mut outcome = service.bake(target, config);

        if outcome.is_ok() {
            self.state = BakeState::Adjusting;
            outcome = importer.apply_mip_bias(&target.baked_texture, config.mip_bias);
        }

        // Cleanup runs whether or not bake/adjust succeeded.
        self.state = BakeState::Hiding;
        for &id in selected {
            rig.hide(id);
        }

        match outcome {
            Ok(()) => {
                log::debug!("probe {}: bake complete", target.probe);
                self.state = BakeState::Done;
                Ok(())
            }
            Err(err) => {
                log::warn!("probe {}: bake failed: {err}", target.probe);
                self.state = BakeState::Failed;
                Err(err)
            }
        }
    }
}

impl Default for BakeOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
