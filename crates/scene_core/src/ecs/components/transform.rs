//! Transform component for the ECS system
//!
//! Pure data: 2D position, scale and a rotation angle in radians. Always
//! resolvable synchronously.

use serde_json::{Map, Value};

use super::{fields, optional_f32, TRANSFORM_COMPONENT};
use crate::ecs::{ComponentError, ComponentMeta, ComponentVariant};
use crate::foundation::math::{degrees_to_radians, radians_to_degrees, Vec2};
use crate::impl_component;

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    meta: ComponentMeta,

    /// Position in scene units
    pub position: Vec2,

    /// Scale factors
    pub scale: Vec2,

    /// Rotation in radians
    pub rotation: f32,
}

impl ComponentVariant for TransformComponent {
    const TYPE: &'static str = TRANSFORM_COMPONENT;
}

impl_component!(TransformComponent);

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            meta: ComponentMeta::new(),
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory body: build from `{x?, y?, rotation?, scaleX?, scaleY?}`
    ///
    /// Missing fields take identity values; present fields must be numbers.
    pub fn from_initial_values(values: &Value) -> Result<Self, ComponentError> {
        let map = fields(TRANSFORM_COMPONENT, values)?;
        Self::from_fields(TRANSFORM_COMPONENT, map)
    }

    /// Parse transform fields on behalf of `component`
    pub(crate) fn from_fields(
        component: &'static str,
        map: Option<&Map<String, Value>>,
    ) -> Result<Self, ComponentError> {
        Ok(Self {
            meta: ComponentMeta::new(),
            position: Vec2::new(
                optional_f32(component, map, "x", 0.0)?,
                optional_f32(component, map, "y", 0.0)?,
            ),
            scale: Vec2::new(
                optional_f32(component, map, "scaleX", 1.0)?,
                optional_f32(component, map, "scaleY", 1.0)?,
            ),
            rotation: optional_f32(component, map, "rotation", 0.0)?,
        })
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set rotation in radians
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Rotation in degrees
    pub fn degrees(&self) -> f32 {
        radians_to_degrees(self.rotation)
    }

    /// Set rotation in degrees
    pub fn set_degrees(&mut self, degrees: f32) {
        self.rotation = degrees_to_radians(degrees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_transform_identity() {
        let transform = TransformComponent::new();

        assert_eq!(transform.position, Vec2::zeros());
        assert_eq!(transform.scale, Vec2::new(1.0, 1.0));
        assert_eq!(transform.rotation, 0.0);
        assert_eq!(transform.component_type(), "TransformComponent");
    }

    #[test]
    fn test_from_initial_values() {
        let transform = TransformComponent::from_initial_values(&json!({
            "x": 10, "y": 20.5, "rotation": PI, "scaleX": 2
        }))
        .unwrap();

        assert_eq!(transform.position, Vec2::new(10.0, 20.5));
        assert_eq!(transform.scale, Vec2::new(2.0, 1.0));
        assert_relative_eq!(transform.degrees(), 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_payload_is_identity() {
        let from_null = TransformComponent::from_initial_values(&Value::Null).unwrap();
        let from_empty = TransformComponent::from_initial_values(&json!({})).unwrap();

        for transform in [from_null, from_empty] {
            assert_eq!(transform.position, Vec2::zeros());
            assert_eq!(transform.scale, Vec2::new(1.0, 1.0));
            assert_eq!(transform.rotation, 0.0);
        }
    }

    #[test]
    fn test_rejects_non_numeric_field() {
        let err = TransformComponent::from_initial_values(&json!({"x": "left"})).unwrap_err();
        assert_eq!(
            err,
            ComponentError::InvalidField {
                component: "TransformComponent",
                field: "x",
                expected: "a number",
            }
        );
    }

    #[test]
    fn test_rejects_overflowing_scale() {
        let err = TransformComponent::from_initial_values(&json!({"scaleX": 1e300})).unwrap_err();
        assert_eq!(
            err,
            ComponentError::InvalidField {
                component: "TransformComponent",
                field: "scaleX",
                expected: "a finite number",
            }
        );
    }

    #[test]
    fn test_set_degrees() {
        let mut transform = TransformComponent::new();
        transform.set_degrees(90.0);
        assert_relative_eq!(transform.rotation, PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(transform.degrees(), 90.0, epsilon = 1e-4);
    }
}
