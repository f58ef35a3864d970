use glam::{Mat4, Vec3};

/// Interleaved vertex data shared by loaded and generated meshes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Phong material scalars, CPU side.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub diffuse: Vec3,
    pub ambient: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const fn new(diffuse: Vec3, ambient: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self { diffuse, ambient, specular, shininess }
    }
}

/// Per-object transform block uploaded once per draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub pvm: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        // Normal matrix from the rotation/scale part only.
        let mut rotation = model;
        rotation.w_axis = glam::Vec4::W;
        let normal = rotation.inverse().transpose();

        Self {
            pvm: (projection * view * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
        }
    }
}

/// Per-object material block.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub diffuse: [f32; 3],
    pub shininess: f32,
    pub ambient: [f32; 3],
    pub _pad0: f32,
    pub specular: [f32; 3],
    pub _pad1: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            diffuse: m.diffuse.to_array(),
            shininess: m.shininess,
            ambient: m.ambient.to_array(),
            _pad0: 0.0,
            specular: m.specular.to_array(),
            _pad1: 0.0,
        }
    }
}

/// Frame-global lighting and fog block: one sun, one point light, one spot
/// light, plus the animated desert fog.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub camera_position: [f32; 3],
    pub time: f32,
    pub sun_diffuse: [f32; 3],
    pub _pad0: f32,
    pub sun_ambient: [f32; 3],
    pub _pad1: f32,
    pub sun_specular: [f32; 3],
    pub _pad2: f32,
    pub sun_position: [f32; 3],
    pub _pad3: f32,
    pub point_diffuse: [f32; 3],
    pub point_constant: f32,
    pub point_ambient: [f32; 3],
    pub point_linear: f32,
    pub point_specular: [f32; 3],
    pub point_quadratic: f32,
    pub point_position: [f32; 3],
    pub _pad4: f32,
    pub spot_diffuse: [f32; 3],
    pub spot_cutoff_inner: f32,
    pub spot_ambient: [f32; 3],
    pub spot_cutoff_outer: f32,
    pub spot_specular: [f32; 3],
    pub _pad5: f32,
    pub spot_position: [f32; 3],
    pub _pad6: f32,
    pub spot_direction: [f32; 3],
    pub _pad7: f32,
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub fog_gradient: f32,
    pub _pad8: [f32; 3],
}

impl GlobalsUniform {
    /// The desert lighting rig: low warm sun, a point light over the dunes
    /// and a spot light near the road, with fog that slowly breathes.
    pub fn new(camera_position: Vec3, time: f32) -> Self {
        Self {
            camera_position: camera_position.to_array(),
            time,
            sun_diffuse: [1.0, 1.0, 0.3],
            _pad0: 0.0,
            sun_ambient: [0.13, 0.13, 0.13],
            _pad1: 0.0,
            sun_specular: [1.0, 1.0, 1.0],
            _pad2: 0.0,
            sun_position: [13.873, 35.399, -21.242],
            _pad3: 0.0,
            point_diffuse: [1.0, 1.0, 1.0],
            point_constant: 0.05,
            point_ambient: [0.13, 0.13, 0.13],
            point_linear: 0.09,
            point_specular: [1.0, 1.0, 1.0],
            point_quadratic: 0.0032,
            point_position: [0.0, 10.0, -13.0],
            _pad4: 0.0,
            spot_diffuse: [1.0, 1.0, 1.0],
            spot_cutoff_inner: 0.91,
            spot_ambient: [0.13, 0.13, 0.13],
            spot_cutoff_outer: 0.82,
            spot_specular: [1.0, 1.0, 1.0],
            _pad5: 0.0,
            spot_position: [4.47, 2.69, 1.2],
            _pad6: 0.0,
            spot_direction: [3.0, 1.3, -1.0],
            _pad7: 0.0,
            fog_color: [1.0, 0.85, 0.75],
            fog_density: 0.07 + 0.03 * (time / 3.0).cos(),
            fog_gradient: 0.5 + 0.75 * (time / 3.0).sin(),
            _pad8: [0.0; 3],
        }
    }
}

/// Uniform block for the procedural sky pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniform {
    pub inv_proj_view: [[f32; 4]; 4],
    pub fog_color: [f32; 3],
    pub time: f32,
}

impl SkyUniform {
    pub fn new(projection: Mat4, view: Mat4, time: f32) -> Self {
        // Strip the translation so the sky stays glued to the horizon.
        let mut rotation = view;
        rotation.w_axis = glam::Vec4::W;

        Self {
            inv_proj_view: (projection * rotation).inverse().to_cols_array_2d(),
            fog_color: [1.0, 0.85, 0.75],
            time,
        }
    }
}
