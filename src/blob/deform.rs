//! Audio-driven shape deformation relative to a cached rest pose.

use glam::Vec3;

use super::mesh::{BlobMesh, Transform, Vertex};
use crate::audio::Bands;
use crate::params::DeformMapping;

/// Undeformed vertex positions, captured once per geometry
///
/// Deformation always starts from these positions, never from the previous
/// frame's output, so the shape cannot drift or grow over time.
#[derive(Clone, Debug, PartialEq)]
pub struct RestPose {
    positions: Vec<Vec3>,
}

impl RestPose {
    /// Snapshot the current vertex positions
    pub fn capture(vertices: &[Vertex]) -> Self {
        Self {
            positions: vertices
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .collect(),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Radial multiplier for vertex `index` at `elapsed_s` under mid level `mid`
///
/// Stays within `1 ± mid_to_wobble * mid`.
#[inline]
pub fn wobble_factor(index: usize, elapsed_s: f32, mid: f32, mapping: &DeformMapping) -> f32 {
    let phase = elapsed_s * mapping.wobble_time_rate + index as f32 * mapping.wobble_phase_step;
    1.0 + phase.sin() * mapping.mid_to_wobble * mid
}

/// Spin and scale from the bass level (per-frame increments)
pub fn advance_transform(transform: &mut Transform, bass: f32, mapping: &DeformMapping) {
    transform.rotation.y += mapping.base_yaw_step + bass * mapping.bass_to_yaw_step;
    transform.rotation.x += mapping.pitch_step;
    transform.scale = 1.0 + bass * mapping.bass_to_scale;
}

/// Push every vertex along its rest direction by the wobble factor
pub fn wobble_vertices(
    vertices: &mut [Vertex],
    rest: &RestPose,
    mid: f32,
    elapsed_s: f32,
    mapping: &DeformMapping,
) {
    for (i, (vertex, &base)) in vertices.iter_mut().zip(rest.positions()).enumerate() {
        // A vertex at the origin has no direction; treat its length as 1
        let len = match base.length() {
            l if l > 0.0 => l,
            _ => 1.0,
        };
        let direction = base / len;
        let factor = wobble_factor(i, elapsed_s, mid, mapping);
        vertex.position = (direction * factor).to_array();
    }
}

/// Apply one frame of deformation to `mesh`
///
/// Bass (times intensity) drives scale and spin; mid (times intensity)
/// drives a travelling radial ripple. Normals are recomputed afterwards,
/// which is the per-frame cost center.
pub fn deform(
    mesh: &mut BlobMesh,
    rest: &RestPose,
    bands: &Bands,
    intensity: f32,
    elapsed_s: f32,
    mapping: &DeformMapping,
) {
    let bass = bands.bass * intensity;
    let mid = bands.mid * intensity;

    advance_transform(&mut mesh.transform, bass, mapping);
    wobble_vertices(&mut mesh.vertices, rest, mid, elapsed_s, mapping);
    mesh.recompute_normals();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (BlobMesh, RestPose, DeformMapping) {
        let mesh = BlobMesh::icosphere(2);
        let rest = RestPose::capture(&mesh.vertices);
        (mesh, rest, DeformMapping::default())
    }

    #[test]
    fn test_silence_keeps_unit_shape() {
        let (mut mesh, rest, mapping) = setup();
        deform(&mut mesh, &rest, &Bands::ZERO, 1.0, 3.7, &mapping);

        assert_eq!(mesh.transform.scale, 1.0);
        for (v, r) in mesh.vertices.iter().zip(rest.positions()) {
            assert!(Vec3::from_array(v.position).distance(*r) < 1e-5);
        }
    }

    #[test]
    fn test_bass_scales_and_spins() {
        let (mut mesh, rest, mapping) = setup();
        deform(&mut mesh, &rest, &Bands::new(1.0, 0.0, 0.0), 1.0, 0.0, &mapping);

        assert!((mesh.transform.scale - 1.35).abs() < 1e-6);
        assert!((mesh.transform.rotation.y - 0.013).abs() < 1e-6);
        assert!((mesh.transform.rotation.x - 0.0015).abs() < 1e-6);

        // Silence still rotates, just slower
        let mut quiet = Transform::default();
        advance_transform(&mut quiet, 0.0, &mapping);
        assert!((quiet.rotation.y - 0.003).abs() < 1e-6);
        assert!((quiet.rotation.x - 0.0015).abs() < 1e-6);
    }

    #[test]
    fn test_intensity_scales_bands() {
        let (mut mesh, rest, mapping) = setup();
        deform(&mut mesh, &rest, &Bands::new(0.5, 0.0, 0.0), 2.0, 0.0, &mapping);
        assert!((mesh.transform.scale - 1.35).abs() < 1e-6);
    }

    #[test]
    fn test_wobble_bounded() {
        let mapping = DeformMapping::default();
        for i in 0..2000 {
            for mid in [0.0, 0.25, 1.0, 2.0] {
                let t = i as f32 * 0.037;
                let f = wobble_factor(i, t, mid, &mapping);
                assert!((0.84 - 1e-6..=1.16 + 1e-6).contains(&f), "factor {}", f);
            }
        }
    }

    #[test]
    fn test_wobble_is_travelling_wave() {
        let mapping = DeformMapping::default();
        // Adjacent vertices are out of phase
        let a = wobble_factor(0, 0.4, 1.0, &mapping);
        let b = wobble_factor(1, 0.4, 1.0, &mapping);
        assert!(a != b);

        // Same vertex moves with time
        let later = wobble_factor(0, 0.9, 1.0, &mapping);
        assert!(a != later);
    }

    #[test]
    fn test_rest_pose_untouched_and_no_drift() {
        let (mut mesh, rest, mapping) = setup();
        let captured = rest.clone();

        let mut t = 0.0;
        for frame in 0..200 {
            let v = (frame % 10) as f32 / 10.0;
            deform(&mut mesh, &rest, &Bands::new(v, 1.0 - v, v), 2.0, t, &mapping);
            t += 1.0 / 60.0;
        }
        assert_eq!(rest, captured);

        // Repeating a frame's inputs reproduces that frame's positions exactly
        let mut replay = mesh.clone();
        deform(&mut mesh, &rest, &Bands::new(0.3, 0.6, 0.1), 1.0, 5.0, &mapping);
        deform(&mut replay, &rest, &Bands::new(0.3, 0.6, 0.1), 1.0, 5.0, &mapping);
        assert_eq!(mesh.vertices, replay.vertices);

        // Radii stay inside the wobble envelope whatever came before
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!(r > 0.95 && r < 1.05);
        }
    }

    #[test]
    fn test_degenerate_vertex_at_origin() {
        let mut mesh = BlobMesh::from_triangles(
            &[Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)],
            vec![0, 1, 2],
        );
        let rest = RestPose::capture(&mesh.vertices);
        let mapping = DeformMapping::default();

        deform(&mut mesh, &rest, &Bands::new(1.0, 1.0, 1.0), 2.0, 1.0, &mapping);

        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| c.is_finite()));
        }
        assert_eq!(mesh.vertices[0].position, [0.0; 3]);

        // Non-degenerate vertices are projected onto the (wobbling) unit sphere
        let r = Vec3::from_array(mesh.vertices[1].position).length();
        assert!((r - wobble_factor(1, 1.0, 2.0, &mapping)).abs() < 1e-5);
    }
}
