//! ECS Components module
//!
//! The built-in component variants and the helpers their factories share for
//! validating `initial_values` payloads.

pub mod transform;
pub mod texture;
pub mod sprite;

pub use transform::TransformComponent;
pub use texture::TextureComponent;
pub use sprite::{SpriteComponent, SpriteInstance};

use serde_json::{Map, Value};

use super::ComponentError;

/// Tag of [`TransformComponent`]
pub const TRANSFORM_COMPONENT: &str = "TransformComponent";

/// Tag of [`TextureComponent`]
pub const TEXTURE_COMPONENT: &str = "TextureComponent";

/// Tag of [`SpriteComponent`]
pub const SPRITE_COMPONENT: &str = "SpriteComponent";

/// View `values` as an object; `null` means "no fields given"
pub(crate) fn fields<'a>(
    component: &'static str,
    values: &'a Value,
) -> Result<Option<&'a Map<String, Value>>, ComponentError> {
    match values {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(ComponentError::InvalidPayload {
            component: component.to_string(),
            reason: format!("expected an object, found {}", json_kind(other)),
        }),
    }
}

/// Numeric field with a default for absent or `null` values
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn optional_f32(
    component: &'static str,
    fields: Option<&Map<String, Value>>,
    field: &'static str,
    default: f32,
) -> Result<f32, ComponentError> {
    let value = match fields.and_then(|map| map.get(field)) {
        None | Some(Value::Null) => return Ok(default),
        Some(value) => value.as_f64().ok_or(ComponentError::InvalidField {
            component,
            field,
            expected: "a number",
        })?,
    };

    // Values beyond f32 range would otherwise become infinite
    let narrowed = value as f32;
    if narrowed.is_finite() {
        Ok(narrowed)
    } else {
        Err(ComponentError::InvalidField {
            component,
            field,
            expected: "a finite number",
        })
    }
}

/// Non-empty string field that must be present
pub(crate) fn required_str(
    component: &'static str,
    fields: Option<&Map<String, Value>>,
    field: &'static str,
) -> Result<String, ComponentError> {
    match fields.and_then(|map| map.get(field)) {
        None | Some(Value::Null) => Err(ComponentError::MissingField { component, field }),
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        Some(_) => Err(ComponentError::InvalidField {
            component,
            field,
            expected: "a non-empty string",
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_accepts_null_and_objects() {
        assert!(fields(TRANSFORM_COMPONENT, &Value::Null).unwrap().is_none());
        assert!(fields(TRANSFORM_COMPONENT, &json!({"x": 1})).unwrap().is_some());

        let err = fields(TRANSFORM_COMPONENT, &json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TransformComponent: invalid initial values: expected an object, found an array"
        );
    }

    #[test]
    fn test_optional_f32() {
        let values = json!({"x": 3, "y": null, "z": "far"});
        let map = values.as_object();

        assert_eq!(optional_f32(TRANSFORM_COMPONENT, map, "x", 0.0).unwrap(), 3.0);
        assert_eq!(optional_f32(TRANSFORM_COMPONENT, map, "y", 7.0).unwrap(), 7.0);
        assert_eq!(optional_f32(TRANSFORM_COMPONENT, map, "w", 1.0).unwrap(), 1.0);
        assert!(matches!(
            optional_f32(TRANSFORM_COMPONENT, map, "z", 0.0),
            Err(ComponentError::InvalidField { field: "z", .. })
        ));
    }

    #[test]
    fn test_optional_f32_rejects_out_of_range() {
        let values = json!({"x": 1e300, "y": -1e39, "z": 3.0e38});
        let map = values.as_object();

        for field in ["x", "y"] {
            assert_eq!(
                optional_f32(TRANSFORM_COMPONENT, map, field, 0.0),
                Err(ComponentError::InvalidField {
                    component: TRANSFORM_COMPONENT,
                    field,
                    expected: "a finite number",
                })
            );
        }
        assert!(optional_f32(TRANSFORM_COMPONENT, map, "z", 0.0).unwrap().is_finite());
    }

    #[test]
    fn test_required_str() {
        let values = json!({"path": "hero.png", "empty": "", "number": 4});
        let map = values.as_object();

        assert_eq!(required_str(TEXTURE_COMPONENT, map, "path").unwrap(), "hero.png");
        assert!(matches!(
            required_str(TEXTURE_COMPONENT, map, "missing"),
            Err(ComponentError::MissingField { field: "missing", .. })
        ));
        assert!(matches!(
            required_str(TEXTURE_COMPONENT, map, "empty"),
            Err(ComponentError::InvalidField { .. })
        ));
        assert!(matches!(
            required_str(TEXTURE_COMPONENT, map, "number"),
            Err(ComponentError::InvalidField { .. })
        ));
        assert!(matches!(
            required_str(TEXTURE_COMPONENT, None, "path"),
            Err(ComponentError::MissingField { .. })
        ));
    }
}
