// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector2f, Vector3f, Vector4f };

/// Interpolated data at a ray hit, produced by the geometry layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceInfo {
    p: Vector3f,
    t: Float,
    geo_normal: Vector3f,
    sh_normal:  Vector3f,
    tangent: Vector4f,
    uvs: Vec<Vector2f>,
    material_id: Option<usize>,
    face_index: Option<usize>,
}

impl SurfaceInfo {
    /// Shading normal starts out equal to the geometric normal.
    pub fn new(new_p: Vector3f, new_geo_normal: Vector3f, new_t: Float) -> Self {
        Self { p: new_p, t: new_t, geo_normal: new_geo_normal, sh_normal: new_geo_normal,
               tangent: Vector4f::new(1.0, 0.0, 0.0, 1.0), uvs: Vec::new(),
               material_id: None, face_index: None }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_normal(&self) -> Vector3f {
        self.sh_normal
    }

    /// xyz is the tangent direction, w the bitangent handedness sign.
    pub fn tangent(&self) -> Vector4f {
        self.tangent
    }

    /// UV sets indexed by channel number.
    pub fn uvs(&self) -> &[Vector2f] {
        &self.uvs
    }

    pub fn material_id(&self) -> Option<usize> {
        self.material_id
    }

    pub fn face_index(&self) -> Option<usize> {
        self.face_index
    }

    pub fn with_sh_normal(mut self, sh_normal: Vector3f) -> Self {
        self.sh_normal = sh_normal;
        self
    }

    pub fn with_tangent(mut self, tangent: Vector4f) -> Self {
        self.tangent = tangent;
        self
    }

    pub fn with_uvs(mut self, uvs: Vec<Vector2f>) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_material_id(mut self, material_id: Option<usize>) -> Self {
        self.material_id = material_id;
        self
    }

    pub fn with_face_index(mut self, face_index: Option<usize>) -> Self {
        self.face_index = face_index;
        self
    }
}
