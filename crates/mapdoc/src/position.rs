use glam::DVec3;

use crate::item::ItemNode;
use crate::{MapDocError, Result};

/// A position in map space.
pub type Point3 = DVec3;

/// Attribute names holding the x, y and z coordinates, in read order.
pub const POSITION_ATTRIBUTES: [&str; 3] = ["posX", "posY", "posZ"];

/// Read the `posX`/`posY`/`posZ` attributes of an item as a point.
pub fn read_position(node: &ItemNode) -> Result<Point3> {
    let mut coords = [0.0; 3];
    for (coord, attr) in coords.iter_mut().zip(POSITION_ATTRIBUTES) {
        let raw = node
            .attribute(attr)
            .ok_or_else(|| MapDocError::MissingAttribute {
                element: node.tag().to_string(),
                attr: attr.to_string(),
            })?;
        *coord = parse_coordinate(node, attr, raw)?;
    }
    Ok(Point3::from_array(coords))
}

/// Store a point back into the `posX`/`posY`/`posZ` attributes of an item.
pub fn write_position(node: &mut ItemNode, point: Point3) -> Result<()> {
    for (value, attr) in point.to_array().into_iter().zip(POSITION_ATTRIBUTES) {
        let formatted = format_coordinate(node, attr, value)?;
        node.set_attribute(attr, &formatted)?;
    }
    Ok(())
}

fn parse_coordinate(node: &ItemNode, attr: &str, raw: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(MapDocError::InvalidCoordinate {
            element: node.tag().to_string(),
            attr: attr.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Shortest decimal that parses back to the same `f64` (`11.0` -> `"11"`).
fn format_coordinate(node: &ItemNode, attr: &str, value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(MapDocError::UnformattableCoordinate {
            element: node.tag().to_string(),
            attr: attr.to_string(),
            value,
        });
    }
    Ok(value.to_string())
}
