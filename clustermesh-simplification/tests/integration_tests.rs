//! Integration tests for clustermesh-simplification
//!
//! These tests check the guarantees of grid clustering on whole meshes:
//! cardinality bounds, valid and non-degenerate output, determinism, purity
//! and coarsening behaviour.

use approx::assert_relative_eq;
use clustermesh_core::{Point3f, TriangleMesh};
use clustermesh_simplification::*;

/// Unit cube with two triangles per face
fn create_cube() -> TriangleMesh {
    let vertices = vec![
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(1.0, 1.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
        Point3f::new(0.0, 0.0, 1.0),
        Point3f::new(1.0, 0.0, 1.0),
        Point3f::new(1.0, 1.0, 1.0),
        Point3f::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 2, 1], [0, 3, 2], // bottom
        [4, 5, 6], [4, 6, 7], // top
        [0, 1, 5], [0, 5, 4], // front
        [2, 3, 7], [2, 7, 6], // back
        [1, 2, 6], [1, 6, 5], // right
        [0, 4, 7], [0, 7, 3], // left
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// UV sphere with single pole vertices, optionally jittered
fn create_sphere(radius: f32, stacks: usize, slices: usize, jitter: f32) -> TriangleMesh {
    let mut vertices = vec![Point3f::new(0.0, 0.0, radius)];
    for i in 1..stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        for j in 0..slices {
            let theta = std::f32::consts::TAU * j as f32 / slices as f32;
            let wobble = 1.0 + jitter * ((i * 31 + j * 17) as f32).sin();
            let r = radius * wobble;
            vertices.push(Point3f::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ));
        }
    }
    let south = vertices.len();
    vertices.push(Point3f::new(0.0, 0.0, -radius));

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;
    let mut faces = Vec::new();
    for j in 0..slices {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..(stacks - 1) {
        for j in 0..slices {
            let a = ring(i, j);
            let b = ring(i, j + 1);
            let c = ring(i + 1, j);
            let d = ring(i + 1, j + 1);
            faces.push([a, c, b]);
            faces.push([b, c, d]);
        }
    }
    for j in 0..slices {
        faces.push([south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Grid in the y/z plane at a fixed x
fn create_flat_x_mesh(x: f32, size: usize) -> TriangleMesh {
    let mut vertices = Vec::new();
    for row in 0..size {
        for col in 0..size {
            vertices.push(Point3f::new(x, col as f32 * 0.37, row as f32 * 0.21));
        }
    }
    let mut faces = Vec::new();
    for row in 0..(size - 1) {
        for col in 0..(size - 1) {
            let tl = row * size + col;
            let tr = tl + 1;
            let bl = (row + 1) * size + col;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn test_meshes() -> Vec<TriangleMesh> {
    vec![
        create_cube(),
        create_sphere(1.0, 12, 24, 0.0),
        create_sphere(3.0, 20, 40, 0.05),
        create_flat_x_mesh(2.5, 15),
    ]
}

fn simplify(mesh: &TriangleMesh, grid_size: u32) -> TriangleMesh {
    GridClusteringSimplifier::new(grid_size)
        .unwrap()
        .simplify(mesh)
        .unwrap()
}

#[test]
fn test_cardinality_bound() {
    for mesh in test_meshes() {
        for g in 1..=10u32 {
            let result = simplify(&mesh, g);
            let cells = (g as usize).pow(3);
            assert!(result.vertex_count() <= mesh.vertex_count().min(cells));
            assert!(result.vertex_count() >= 1);
            assert!(result.triangle_count() <= mesh.triangle_count());
        }
    }
}

#[test]
fn test_output_triangles_valid_and_non_degenerate() {
    for mesh in test_meshes() {
        for g in [1, 2, 3, 5, 8, 13, 64] {
            let result = simplify(&mesh, g);
            result.validate().unwrap();
            for tri in result.triangles() {
                assert!(!tri.is_degenerate(), "degenerate {:?} at grid {}", tri.indices, g);
            }
        }
    }
}

#[test]
fn test_deterministic() {
    for mesh in test_meshes() {
        let s = GridClusteringSimplifier::new(7).unwrap();
        let first = s.simplify(&mesh).unwrap();
        let second = s.simplify(&mesh).unwrap();
        assert_eq!(first, second);

        let other_instance = GridClusteringSimplifier::new(7).unwrap().simplify(&mesh).unwrap();
        assert_eq!(first, other_instance);
    }
}

#[test]
fn test_input_untouched() {
    for mesh in test_meshes() {
        let mesh = mesh.with_normals();
        let before = mesh.clone();
        for g in [1, 4, 16] {
            simplify(&mesh, g);
        }
        assert_eq!(mesh, before);
    }
}

#[test]
fn test_refining_grid_never_loses_vertices() {
    for mesh in test_meshes() {
        for g in 1..=16u32 {
            let coarse = simplify(&mesh, g);
            let fine = simplify(&mesh, 2 * g);
            assert!(
                coarse.vertex_count() <= fine.vertex_count(),
                "grid {} gave {} vertices, grid {} gave {}",
                g,
                coarse.vertex_count(),
                2 * g,
                fine.vertex_count()
            );
        }
    }
}

#[test]
fn test_single_triangle_grid_one() {
    let mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let result = simplify(&mesh, 1);
    assert_eq!(result.vertex_count(), 1);
    assert_eq!(result.triangle_count(), 0);
}

#[test]
fn test_cube_with_distinct_cells_is_preserved() {
    let cube = create_cube();
    for g in [2, 3, 10, 100] {
        let result = simplify(&cube, g);
        assert_eq!(result.vertex_count(), 8);
        assert_eq!(result.triangle_count(), 12);

        // First-occurrence numbering keeps the input order
        for (out, input) in result.vertices().iter().zip(cube.vertices()) {
            assert_relative_eq!(*out, *input);
        }
        for (out, input) in result.triangles().iter().zip(cube.triangles()) {
            assert_eq!(out.indices, input.indices);
        }
    }
}

#[test]
fn test_cube_grid_one_collapses_to_center() {
    let result = simplify(&create_cube(), 1);
    assert_eq!(result.vertex_count(), 1);
    assert_eq!(result.triangle_count(), 0);
    assert_relative_eq!(result.vertices()[0], Point3f::new(0.5, 0.5, 0.5));
}

#[test]
fn test_flat_axis_keeps_shared_coordinate() {
    let mesh = create_flat_x_mesh(2.5, 15);
    for g in [1, 3, 6, 32] {
        let result = simplify(&mesh, g);
        assert!(result.vertex_count() > 0);
        for v in result.vertices() {
            assert_eq!(v.x, 2.5);
            assert!(v.y.is_finite() && v.z.is_finite());
        }
    }
}

#[test]
fn test_all_vertices_coincident() {
    let p = Point3f::new(-1.0, 4.0, 2.0);
    let mesh = TriangleMesh::from_vertices_and_faces(vec![p; 4], vec![[0, 1, 2], [1, 2, 3]]);
    let result = simplify(&mesh, 8);
    assert_eq!(result.vertex_count(), 1);
    assert_eq!(result.triangle_count(), 0);
    assert_eq!(result.vertices()[0], p);
}

#[test]
fn test_sphere_reduction_and_normals() {
    let sphere = create_sphere(1.0, 24, 48, 0.0);
    let mut result = simplify(&sphere, 6);
    assert!(result.vertex_count() < sphere.vertex_count());
    assert!(result.triangle_count() > 0);
    assert!(result.triangle_count() < sphere.triangle_count());

    result.compute_normals();
    for tri in result.triangles() {
        assert!(tri.normal.iter().all(|c| c.is_finite()));
    }

    let report = SimplificationReport::from_meshes(&sphere, &result);
    assert!(report.vertex_ratio() < 1.0);
    assert!(report.triangle_ratio() < 1.0);
}

#[test]
fn test_levels_on_sphere() {
    let sphere = create_sphere(2.0, 16, 32, 0.02);
    let levels = simplify_levels(&sphere, &[4, 8, 16]).unwrap();
    let counts: Vec<usize> = levels.iter().map(|m| m.vertex_count()).collect();
    assert!(counts[0] <= counts[1] && counts[1] <= counts[2]);
}
