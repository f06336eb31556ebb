//! Named shader-parameter store.

use std::collections::HashMap;

use glam::Vec4;

use crate::handle::TexHandle;

/// A single named shader parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderParam {
    /// A four-component vector uniform.
    Vector(Vec4),
    /// A scalar uniform.
    Scalar(f32),
    /// A texture binding.
    Texture(TexHandle),
}

/// Shader state for one material, keyed by uniform name.
///
/// This is the wire format between terrain logic and whatever shader the
/// renderer runs: setting a parameter overwrites any previous value under
/// that name, whatever its kind. The renderer reads the store each frame
/// when binding the material.
#[derive(Clone, Debug, Default)]
pub struct Material {
    params: HashMap<String, ShaderParam>,
}

impl Material {
    /// Create an empty material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a vector uniform.
    pub fn set_vector(&mut self, name: &str, value: Vec4) {
        self.params.insert(name.to_string(), ShaderParam::Vector(value));
    }

    /// Set a scalar uniform.
    pub fn set_scalar(&mut self, name: &str, value: f32) {
        self.params.insert(name.to_string(), ShaderParam::Scalar(value));
    }

    /// Bind a texture.
    pub fn set_texture(&mut self, name: &str, tex: TexHandle) {
        self.params.insert(name.to_string(), ShaderParam::Texture(tex));
    }

    /// Read back a vector uniform, if one is set under this name.
    pub fn vector(&self, name: &str) -> Option<Vec4> {
        match self.params.get(name) {
            Some(ShaderParam::Vector(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read back a scalar uniform, if one is set under this name.
    pub fn scalar(&self, name: &str) -> Option<f32> {
        match self.params.get(name) {
            Some(ShaderParam::Scalar(s)) => Some(*s),
            _ => None,
        }
    }

    /// Read back a texture binding, if one is set under this name.
    pub fn texture(&self, name: &str) -> Option<TexHandle> {
        match self.params.get(name) {
            Some(ShaderParam::Texture(t)) => Some(*t),
            _ => None,
        }
    }

    /// Number of parameters currently set.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
