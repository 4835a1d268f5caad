use crate::select::select_within;
use glam::Vec3;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub type MarkerId = u64;

/// Placeholder entity marking where a specular highlight should be
/// rendered while a probe bakes.
#[derive(Debug, Clone)]
pub struct HighlightMarker {
    pub position: Vec3,
    pub visible: bool,
}

impl HighlightMarker {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            visible: false,
        }
    }
}

/// Explicit registry of highlight markers, replacing scene-wide
/// find-all-objects-of-type scans.
pub struct MarkerRegistry {
    markers: Arc<RwLock<HashMap<MarkerId, HighlightMarker>>>,
    next_marker_id: Arc<RwLock<MarkerId>>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            markers: Arc::new(RwLock::new(HashMap::new())),
            next_marker_id: Arc::new(RwLock::new(0)),
        }
    }

    pub fn add_marker(&mut self, marker: HighlightMarker) -> MarkerId {
        let mut next_id = self.next_marker_id.write();
        let id = *next_id;
        *next_id += 1;

        self.markers.write().insert(id, marker);
        id
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Option<HighlightMarker> {
        self.markers.write().remove(&id)
    }

    pub fn get_marker(&self, id: MarkerId) -> Option<HighlightMarker> {
        self.markers.read().get(&id).cloned()
    }

    pub fn get_marker_mut<F, R>(&self, id: MarkerId, f: F) -> Option<R>
    where
        F: FnOnce(&mut HighlightMarker) -> R,
    {
        let mut markers = self.markers.write();
        markers.get_mut(&id).map(f)
    }

    /// Returns false when the marker no longer exists.
    pub fn set_visible(&self, id: MarkerId, visible: bool) -> bool {
        self.get_marker_mut(id, |m| m.visible = visible).is_some()
    }

    pub fn for_each_marker<F>(&self, mut f: F)
    where
        F: FnMut(MarkerId, &HighlightMarker),
    {
        let markers = self.markers.read();
        for (id, marker) in markers.iter() {
            f(*id, marker);
        }
    }

    pub fn visible_markers(&self) -> Vec<MarkerId> {
        self.markers
            .read()
            .iter()
            .filter(|(_, m)| m.visible)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Markers strictly inside the sphere at `center` with `radius`.
    pub fn markers_within(&self, center: Vec3, radius: f32) -> Vec<MarkerId> {
        let markers = self.markers.read();
        select_within(center, radius, markers.iter().map(|(id, m)| (*id, m.position)))
    }

    pub fn marker_count(&self) -> usize {
        self.markers.read().len()
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
