//! Drawable geometry read from a simulation state
//!
//! Nothing here mutates a system. Renderers or exporters consume:
//! - spring line segments for any system
//! - triangles and smooth vertex normals for the cloth surface
//! - a Wavefront OBJ dump of a cloth frame

use std::io::Write;

use crate::error::SimResult;
use crate::simulation::cloth::ClothSystem;
use crate::simulation::states::{position, NVec3};
use crate::simulation::system::System;

/// One line segment per spring, endpoints taken from `state`
pub fn spring_segments(system: &System, state: &[NVec3]) -> Vec<(NVec3, NVec3)> {
    system
        .base()
        .springs()
        .iter()
        .map(|s| (position(state, s.i), position(state, s.j)))
        .collect()
}

/// Two triangles per grid quad, as row-major particle indices
///
/// Quad corners `a = (r, c)`, `b = (r, c+1)`, `c = (r+1, c+1)`, `d = (r+1, c)`
/// give triangles `(a, b, c)` and `(c, d, a)`.
pub fn cloth_triangles(rows: usize, cols: usize) -> Vec<[usize; 3]> {
    let idx = |r: usize, c: usize| r * cols + c;
    let mut tris = Vec::with_capacity(2 * rows.saturating_sub(1) * cols.saturating_sub(1));
    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols.saturating_sub(1) {
            let a = idx(r, c);
            let b = idx(r, c + 1);
            let cc = idx(r + 1, c + 1);
            let d = idx(r + 1, c);
            tris.push([a, b, cc]);
            tris.push([cc, d, a]);
        }
    }
    tris
}

/// Per-particle normals for the cloth surface in row-major order
///
/// Unnormalized face normals are summed into their corners, so larger
/// faces weigh more, then each sum is normalized. Isolated or degenerate
/// vertices keep a zero normal.
pub fn cloth_vertex_normals(cloth: &ClothSystem, state: &[NVec3]) -> Vec<NVec3> {
    let mut normals = vec![NVec3::zeros(); cloth.rows() * cloth.cols()];
    for [a, b, c] in cloth_triangles(cloth.rows(), cloth.cols()) {
        let (pa, pb, pc) = (position(state, a), position(state, b), position(state, c));
        let n = (pa - pb).cross(&(pc - pb));
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    for n in normals.iter_mut() {
        *n = n.try_normalize(1e-12).unwrap_or_else(NVec3::zeros);
    }
    normals
}

/// Write a triangle mesh as Wavefront OBJ (1-based indices, `f v//vn`)
pub fn write_obj<W: Write>(out: &mut W, positions: &[NVec3], normals: &[NVec3], triangles: &[[usize; 3]]) -> SimResult<()> {
    for p in positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in triangles {
        writeln!(out, "f {0}//{0} {1}//{1} {2}//{2}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// Export the cloth surface of `state` as OBJ
pub fn write_cloth_obj<W: Write>(out: &mut W, cloth: &ClothSystem, state: &[NVec3]) -> SimResult<()> {
    let positions: Vec<NVec3> = (0..cloth.rows() * cloth.cols()).map(|i| position(state, i)).collect();
    let normals = cloth_vertex_normals(cloth, state);
    write_obj(out, &positions, &normals, &cloth_triangles(cloth.rows(), cloth.cols()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendulum_segments_follow_springs() {
        let system = System::from(crate::simulation::pendulum::PendulumSystem::new(3).unwrap());
        let segments = spring_segments(&system, system.state());
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].0, NVec3::zeros());
        assert_eq!(segments[2].1, NVec3::zeros()); // ring closes on the anchor
    }

    #[test]
    fn triangle_count() {
        assert_eq!(cloth_triangles(3, 4).len(), 2 * 2 * 3);
        assert!(cloth_triangles(1, 4).is_empty());
    }

    #[test]
    fn flat_cloth_normals_are_vertical() {
        let cloth = ClothSystem::new(3, 3).unwrap();
        let normals = cloth_vertex_normals(&cloth, cloth.state());
        for n in normals {
            assert!((n.y.abs() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn obj_has_one_line_per_element() {
        let cloth = ClothSystem::new(2, 2).unwrap();
        let mut buf = Vec::new();
        write_cloth_obj(&mut buf, &cloth, cloth.state()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
        assert!(text.contains("f 1//1 2//2 4//4"));
    }
}
