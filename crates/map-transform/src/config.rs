use std::path::{Path, PathBuf};

use mapdoc::Point3;
use serde::Deserialize;

use crate::error::{Result, TransformError};
use crate::transform::Transform;

/// Everything one run needs, built once before any map is touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    /// Recenter each map on its own bounding-box center before the
    /// user transforms run
    pub make_relative: bool,
    /// User transforms in the order they were requested
    pub transforms: Vec<Transform>,
}

impl RunConfig {
    /// Whether any transform, fixed or per-map, was requested.
    pub fn has_transforms(&self) -> bool {
        self.make_relative || !self.transforms.is_empty()
    }

    /// Merge a plan file: its transforms run before the ones already set.
    pub fn with_plan(mut self, plan: TransformPlan) -> Result<Self> {
        let mut transforms = plan
            .transforms
            .iter()
            .map(PlanTransform::to_transform)
            .collect::<Result<Vec<_>>>()?;
        transforms.append(&mut self.transforms);

        self.transforms = transforms;
        self.make_relative |= plan.make_relative;
        Ok(self)
    }
}

/// Transform plan loaded from TOML.
///
/// ```toml
/// make_relative = true
///
/// [[transforms]]
/// translate = [10.0, 0.0, -2.5]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformPlan {
    #[serde(default)]
    pub make_relative: bool,
    #[serde(default)]
    pub transforms: Vec<PlanTransform>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTransform {
    Translate(Vec<f64>),
}

impl PlanTransform {
    fn to_transform(&self) -> Result<Transform> {
        match self {
            Self::Translate(components) => Ok(Transform::Translate(vector_from_components(
                components,
            )?)),
        }
    }
}

impl TransformPlan {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| TransformError::InvalidCommand(format!("invalid transform plan: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TransformError::InvalidCommand(format!(
                "cannot read transform plan {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&contents)
    }
}

/// Build a vector from one to three components; missing ones are zero.
pub fn vector_from_components(components: &[f64]) -> Result<Point3> {
    if components.is_empty() || components.len() > 3 {
        return Err(TransformError::InvalidCommand(format!(
            "a vector needs 1 to 3 components, got {}",
            components.len()
        )));
    }
    if let Some(bad) = components.iter().find(|c| !c.is_finite()) {
        return Err(TransformError::InvalidCommand(format!(
            "vector component {bad} is not finite"
        )));
    }

    let mut xyz = [0.0; 3];
    xyz[..components.len()].copy_from_slice(components);
    Ok(Point3::from_array(xyz))
}

/// Parse `X[,Y[,Z]]` as written on the command line.
pub fn parse_vector(s: &str) -> Result<Point3> {
    let components = s
        .split(',')
        .map(|c| {
            let c = c.trim();
            c.parse::<f64>()
                .map_err(|_| TransformError::InvalidCommand(format!("'{c}' is not a number")))
        })
        .collect::<Result<Vec<_>>>()?;
    vector_from_components(&components)
}
