//! Bakes two probes against a handful of highlight markers, then re-bakes
//! them from a bake-completed notification.

use glam::Vec3;
use glimmer_bake::{
    BakeEvents, ErrorPolicy, NullBakeService, SidecarImporter, SpecularProbeRenderer,
};
use glimmer_core::{HighlightMarker, ProbeConfig};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

fn main() {
    env_logger::init();

    let dir = tempfile::tempdir().expect("demo scratch dir");
    let lobby_tex = dir.path().join("lobby_probe.exr");
    let hall_tex = dir.path().join("hall_probe.exr");
    fs::write(&lobby_tex, b"cubemap").expect("demo texture");
    fs::write(&hall_tex, b"cubemap").expect("demo texture");

    let mut renderer = SpecularProbeRenderer::new(NullBakeService, SidecarImporter);

    renderer.probes_mut().add_probe(
        ProbeConfig::new(Vec3::new(0.0, 2.0, 0.0))
            .with_radius(15.0)
            .with_mip_bias(-2.0),
        &lobby_tex,
    );
    renderer.probes_mut().add_probe(
        ProbeConfig::new(Vec3::new(40.0, 2.0, 0.0))
            .with_radius(8.0)
            .with_mip_bias(1.5),
        &hall_tex,
    );

    // Ceiling lamps along the corridor.
    for x in [-4.0, 3.0, 12.0, 38.0, 44.0] {
        renderer
            .markers_mut()
            .add_marker(HighlightMarker::new(Vec3::new(x, 4.0, 0.0)));
    }

    if let Err(err) = renderer.render_all(ErrorPolicy::ContinueOnError) {
        log::error!("initial bake pass failed: {err}");
        return;
    }
    log::info!(
        "initial bake pass done, {} markers left visible",
        renderer.markers().visible_markers().len()
    );

    // Re-bake whenever the host finishes a lightmap pass.
    let renderer = Rc::new(RefCell::new(renderer));
    let events = BakeEvents::new();
    let _subscription = events.subscribe({
        let renderer = Rc::clone(&renderer);
        move || {
            log::info!("lightmap bake completed, re-baking specular highlights");
            if let Err(err) = renderer.borrow_mut().render_all(ErrorPolicy::ContinueOnError) {
                log::error!("re-bake failed: {err}");
            }
        }
    });

    events.emit();
    log::info!("demo finished");
}
