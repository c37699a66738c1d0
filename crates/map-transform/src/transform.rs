use mapdoc::Point3;

/// A point-to-point mapping applied to item positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Add a fixed offset
    Translate(Point3),
    /// Move `center` to the origin
    Recenter(Point3),
}

impl Transform {
    pub fn apply(&self, point: Point3) -> Point3 {
        match *self {
            Self::Translate(offset) => point + offset,
            Self::Recenter(center) => point - center,
        }
    }
}

/// Transforms applied in order, first entry first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformQueue {
    transforms: Vec<Transform>,
}

impl TransformQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.transforms.iter()
    }

    /// Run `point` through every transform. An empty queue is the identity.
    pub fn apply(&self, point: Point3) -> Point3 {
        self.transforms.iter().fold(point, |p, t| t.apply(p))
    }
}

impl FromIterator<Transform> for TransformQueue {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

impl Extend<Transform> for TransformQueue {
    fn extend<I: IntoIterator<Item = Transform>>(&mut self, iter: I) {
        self.transforms.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TransformQueue {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.transforms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Point3; 4] = [
        Point3::ZERO,
        Point3::new(1.0, 2.0, 3.0),
        Point3::new(-1.5, 0.0, 1e6),
        Point3::new(0.1, -0.2, 0.3),
    ];

    #[test]
    fn empty_queue_is_identity() {
        let queue = TransformQueue::new();
        for p in SAMPLES {
            assert_eq!(queue.apply(p), p);
        }
    }

    #[test]
    fn translate_adds_offset() {
        let t = Point3::new(10.0, -4.0, 0.5);
        let queue: TransformQueue = [Transform::Translate(t)].into_iter().collect();
        for p in SAMPLES {
            assert_eq!(queue.apply(p), p + t);
        }
    }

    #[test]
    fn recenter_moves_center_to_origin() {
        let c = Point3::new(0.0, 1.0, 4.0);
        assert_eq!(Transform::Recenter(c).apply(c), Point3::ZERO);
        assert_eq!(
            Transform::Recenter(c).apply(Point3::new(1.0, 2.0, 3.0)),
            Point3::new(1.0, 1.0, -1.0)
        );
    }

    #[test]
    fn consecutive_translations_compose() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-4.0, 0.25, 8.0);
        let pair: TransformQueue = [Transform::Translate(a), Transform::Translate(b)]
            .into_iter()
            .collect();
        let single: TransformQueue = [Transform::Translate(a + b)].into_iter().collect();
        for p in SAMPLES {
            assert!(pair.apply(p).abs_diff_eq(single.apply(p), 1e-9));
        }
    }

    #[test]
    fn queue_applies_in_order() {
        let mut queue = TransformQueue::new();
        queue.push(Transform::Recenter(Point3::new(2.0, 2.0, 2.0)));
        queue.extend([Transform::Translate(Point3::new(1.0, 0.0, 0.0))]);
        assert_eq!(queue.len(), 2);
        assert!(matches!(queue.iter().next(), Some(Transform::Recenter(_))));
        assert_eq!(queue.apply(Point3::splat(2.0)), Point3::new(1.0, 0.0, 0.0));
    }
}
