use {
    crate::{domain::GeoPosition, errors::SegmentError},
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

pub type SegmentId = u32;

/// Axis-aligned lat/lon rectangle. Boundaries count as inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, pos: &GeoPosition) -> bool {
        pos.lat >= self.min_lat
            && pos.lat <= self.max_lat
            && pos.lon >= self.min_lon
            && pos.lon <= self.max_lon
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
            && self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
    }

    fn is_finite(&self) -> bool {
        [self.min_lat, self.min_lon, self.max_lat, self.max_lon]
            .iter()
            .all(|v| v.is_finite())
    }

    fn is_inverted(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lon > self.max_lon
    }
}

/// A fixed rectangular stretch of the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    #[serde(flatten)]
    pub bounds: BoundingBox,
}

impl Segment {
    pub const fn new(id: SegmentId, min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Segment {
            id,
            bounds: BoundingBox {
                min_lat,
                min_lon,
                max_lat,
                max_lon,
            },
        }
    }

    #[inline]
    pub fn contains(&self, pos: &GeoPosition) -> bool {
        self.bounds.contains(pos)
    }
}

/// Index of the first segment (in configured order) whose box holds `pos`.
/// Overlapping boxes resolve to the lowest index.
pub fn first_containing(segments: &[Segment], pos: &GeoPosition) -> Option<usize> {
    segments.iter().position(|s| s.contains(pos))
}

/// Result of checking a segment list before detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentLayout {
    /// Pairs of ids whose boxes share area. The first id in each pair wins the overlap.
    pub overlaps: Vec<(SegmentId, SegmentId)>,
}

impl SegmentLayout {
    pub fn is_disjoint(&self) -> bool {
        self.overlaps.is_empty()
    }
}

/// Rejects layouts detection cannot work with and reports overlaps.
///
/// Overlap is allowed: list order is the priority rule, so it is only reported.
pub fn validate_segments(segments: &[Segment]) -> Result<SegmentLayout, SegmentError> {
    if segments.is_empty() {
        return Err(SegmentError::Empty);
    }

    let mut seen = HashSet::new();
    for seg in segments {
        if !seen.insert(seg.id) {
            return Err(SegmentError::DuplicateId(seg.id));
        }
        if !seg.bounds.is_finite() {
            return Err(SegmentError::NonFiniteBounds(seg.id));
        }
        if seg.bounds.is_inverted() {
            return Err(SegmentError::InvertedBounds(seg.id));
        }
    }

    let mut layout = SegmentLayout::default();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if a.bounds.overlaps(&b.bounds) {
                log::warn!(
                    "Segments {} and {} overlap; {} takes priority inside the shared area",
                    a.id,
                    b.id,
                    a.id
                );
                layout.overlaps.push((a.id, b.id));
            }
        }
    }

    Ok(layout)
}
