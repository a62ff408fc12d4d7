use crate::math::Point2;

/// Left and right borders of a track, index-aligned with its centerline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderPair {
    pub left: Vec<Point2>,
    pub right: Vec<Point2>,
}

impl BorderPair {
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// A finished track: centerline plus borders.
///
/// For closed tracks the last centerline point equals the first, and the
/// borders share that property.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub centerline: Vec<Point2>,
    pub borders: BorderPair,
    pub closed: bool,
}

impl Track {
    /// Total centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.centerline
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }
}
