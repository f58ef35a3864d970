use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::types::{Material, Vertex};

/// CPU-side mesh as produced by the importer: interleaved vertices, triangle
/// indices and the material factors of the first primitive encountered.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: Material,
}

/// Loads a glTF file and flattens its node hierarchy into a single mesh.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    log::info!("loading mesh {:?}", path);

    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("failed to load glTF file {:?}", path))?;

    let mut mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        material: placeholder_material(),
    };
    let mut material_seen = false;

    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, Mat4::IDENTITY, &mut mesh, &mut material_seen)?;
        }
    }

    if mesh.vertices.is_empty() {
        anyhow::bail!("no geometry found in {:?}", path);
    }

    log::info!(
        "loaded {:?}: {} vertices, {} triangles",
        path,
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
    Ok(mesh)
}

/// A neutral grey used until (or unless) the file supplies its own factors.
pub fn placeholder_material() -> Material {
    Material::new(
        Vec3::splat(0.6),
        Vec3::splat(0.15),
        Vec3::splat(0.3),
        32.0,
    )
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: Mat4,
    out: &mut MeshData,
    material_seen: &mut bool,
) -> Result<()> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global = parent_transform * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            process_primitive(&primitive, buffers, global, out, material_seen)?;
        }
    }

    for child in node.children() {
        process_node(&child, buffers, global, out, material_seen)?;
    }

    Ok(())
}

fn process_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    transform: Mat4,
    out: &mut MeshData,
    material_seen: &mut bool,
) -> Result<()> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .context("mesh primitive has no positions")?
        .map(Vec3::from_array)
        .collect();

    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(iter) => iter.map(Vec3::from_array).collect(),
        None => vec![Vec3::Y; positions.len()],
    };

    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(iter) => iter.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    // Bake the node transform into the vertices; normals only get the
    // rotation/scale part.
    let mut rotation = transform;
    rotation.w_axis = glam::Vec4::W;
    let normal_matrix = rotation.inverse().transpose();

    let base = out.vertices.len() as u32;
    for ((position, normal), uv) in positions.iter().zip(&normals).zip(&uvs) {
        out.vertices.push(Vertex::new(
            transform.transform_point3(*position).to_array(),
            normal_matrix
                .transform_vector3(*normal)
                .normalize_or_zero()
                .to_array(),
            *uv,
        ));
    }

    match reader.read_indices() {
        Some(indices) => out.indices.extend(indices.into_u32().map(|i| base + i)),
        None => out.indices.extend(base..base + positions.len() as u32),
    }

    if !*material_seen {
        *material_seen = true;
        out.material = convert_material(&primitive.material());
    }

    Ok(())
}

/// Map glTF metallic-roughness factors onto the Phong material slots.
fn convert_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let base = pbr.base_color_factor();
    let diffuse = Vec3::new(base[0], base[1], base[2]);

    // Rough surfaces get a dull, low-power highlight.
    let gloss = 1.0 - pbr.roughness_factor();
    Material::new(
        diffuse,
        diffuse * 0.25,
        Vec3::splat(0.2 + 0.6 * gloss),
        4.0 + 124.0 * gloss * gloss,
    )
}
