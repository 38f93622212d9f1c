//! Export payload construction.
//!
//! The export endpoint expects the animation's `gms_hash` parameter set with
//! its `params` list replaced by a comma separated string of the parameter
//! values:
//!
//! ```rust
//! use mixport::export::flatten_params;
//! use serde_json::json;
//!
//! let params = json!([["Overdrive", 1], ["Character Arm-Space", 2]]);
//! assert_eq!(flatten_params(params.as_array().unwrap()).unwrap(), "1,2");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::AnimationDescriptor;
use crate::error::{Error, Result};

/// Product type sent with every export.
pub const EXPORT_TYPE: &str = "Motion";

/// Output options of an export job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPreferences {
    /// File format, `fbx7_2019` or `dae_mixamo` for instance.
    pub format: String,
    /// Whether the character mesh is included (`"true"` / `"false"`).
    pub skin: String,
    /// Frames per second.
    pub fps: String,
    /// Keyframe reduction level.
    pub reducekf: String,
}

impl Default for ExportPreferences {
    fn default() -> Self {
        Self {
            format: "fbx7_2019".into(),
            skin: "true".into(),
            fps: "30".into(),
            reducekf: "0".into(),
        }
    }
}

impl ExportPreferences {
    /// Preferences exporting to Collada.
    pub fn collada() -> Self {
        Self {
            format: "dae_mixamo".into(),
            ..Self::default()
        }
    }
}

/// Body of `POST /animations/export`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub character_id: String,
    pub gms_hash: Vec<Map<String, Value>>,
    pub preferences: ExportPreferences,
    pub product_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ExportRequest {
    /// Build the export request of one animation from its product details.
    pub fn new(
        character_id: &str,
        animation: &AnimationDescriptor,
        details: ProductDetails,
        preferences: ExportPreferences,
    ) -> Result<Self> {
        let product_name = details
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| animation.description.clone());
        let gms_hash = flatten_gms_hash(details.details.gms_hash)?;

        Ok(Self {
            character_id: character_id.to_string(),
            gms_hash: vec![gms_hash],
            preferences,
            product_name,
            kind: EXPORT_TYPE.into(),
        })
    }
}

/// Response of `GET /products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetails {
    pub details: ProductHash,
    #[serde(default)]
    pub description: Option<String>,
}

/// The `details` block of a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductHash {
    pub gms_hash: Map<String, Value>,
}

/// Join the second element of every `[name, value]` pair with commas.
pub fn flatten_params(params: &[Value]) -> Result<String> {
    let values = params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let value = param
                .as_array()
                .and_then(|pair| pair.get(1))
                .ok_or_else(|| {
                    Error::ExportRequest(format!("parameter #{} is not a [name, value] pair", i))
                })?;
            match value {
                Value::Number(n) => Ok(n.to_string()),
                Value::String(s) => Ok(s.clone()),
                Value::Bool(b) => Ok(b.to_string()),
                other => Err(Error::ExportRequest(format!(
                    "parameter #{} has a non scalar value: {}",
                    i, other
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(values.join(","))
}

/// Replace the `params` list of a parameter set by its flattened form,
/// keeping every other field.
pub fn flatten_gms_hash(mut gms_hash: Map<String, Value>) -> Result<Map<String, Value>> {
    let params = match gms_hash.get("params") {
        Some(Value::Array(params)) => flatten_params(params)?,
        Some(other) => {
            return Err(Error::ExportRequest(format!(
                "gms_hash.params is not a list: {}",
                other
            )))
        }
        None => return Err(Error::ExportRequest("gms_hash has no params".into())),
    };
    gms_hash.insert("params".into(), Value::String(params));
    Ok(gms_hash)
}
