use crate::marker::MarkerId;
use glam::Vec3;

/// Ids of markers strictly inside the sphere at `center` with `radius`.
///
/// Comparison is on squared distance, one multiply instead of a sqrt per
/// candidate. Markers exactly at `radius` are excluded. Result order is
/// unspecified.
pub fn select_within<I>(center: Vec3, radius: f32, markers: I) -> Vec<MarkerId>
where
    I: IntoIterator<Item = (MarkerId, Vec3)>,
{
    let radius_sq = radius * radius;
    markers
        .into_iter()
        .filter(|(_, position)| position.distance_squared(center) < radius_sq)
        .map(|(id, _)| id)
        .collect()
}
