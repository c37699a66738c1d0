use log::info;
use mapdoc::{MapDocument, Point3, read_position};

use crate::error::Result;

/// Axis-aligned bounding box of item positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point3 {
        (self.max + self.min) / 2.0
    }
}

impl Default for Bounds {
    /// Degenerate box at the origin, used for maps without positionable items
    fn default() -> Self {
        Self::from_point(Point3::ZERO)
    }
}

/// Bounding box of every positionable direct child of the `<map>` root.
///
/// Fails on the first item whose position cannot be read.
pub fn find_bounds(doc: &MapDocument) -> Result<Bounds> {
    let map = doc.map_node()?;
    let mut bounds: Option<Bounds> = None;

    for item in map.children().iter().filter(|c| c.is_positionable()) {
        let p = read_position(item)?;
        match bounds.as_mut() {
            Some(b) => b.include(p),
            None => bounds = Some(Bounds::from_point(p)),
        }
    }

    Ok(bounds.unwrap_or_default())
}

/// Midpoint of the map's bounding box.
pub fn find_center(doc: &MapDocument) -> Result<Point3> {
    let bounds = find_bounds(doc)?;
    let center = bounds.center();
    info!("Bounds: min {} max {}", bounds.min, bounds.max);
    info!("Center: {center}");
    Ok(center)
}
