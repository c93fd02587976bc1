//! Route segment configuration.

use {
    crate::domain::Segment,
    anyhow::{Context, Result},
    std::{fs, path::Path},
};

/// Default commute: North Vancouver to UBC, in driving order.
/// Order matters: where boxes overlap the earlier segment wins.
pub const ROUTE_SEGMENTS: &[Segment] = &[
    // 1. 13th & Marine -> Taylor Way
    Segment::new(1, 49.3260, -123.1516, 49.3283, -123.1340),
    // 2. Taylor Way -> Lions Gate Bridge (entry moved slightly east of segment 1 exit)
    Segment::new(2, 49.3239, -123.1335, 49.3278, -123.1290),
    // 3. Lions Gate Bridge
    Segment::new(3, 49.3117, -123.1429, 49.3238, -123.1308),
    // 4. Causeway -> Denman
    Segment::new(4, 49.2925, -123.1518, 49.3117, -123.1333),
    // 5. Denman -> Pacific
    Segment::new(5, 49.2868, -123.1425, 49.2924, -123.1332),
    // 6. Pacific -> Burrard St Bridge
    Segment::new(6, 49.2766, -123.1430, 49.2867, -123.1320),
    // 7. Burrard Bridge
    Segment::new(7, 49.2720, -123.1465, 49.2764, -123.1326),
    // 8. Cornwall
    Segment::new(8, 49.2721, -123.1634, 49.2732, -123.1468),
    // 9. Macdonald -> W 4th
    Segment::new(9, 49.2680, -123.1692, 49.2729, -123.1637),
    // 10. W 4th -> Blanca
    Segment::new(10, 49.2671, -123.2165, 49.2693, -123.1698),
    // 11. Chancellor Blvd
    Segment::new(11, 49.2668, -123.2477, 49.2737, -123.2171),
    // 12. Chancellor Roundabout -> Fraser Parkade
    Segment::new(12, 49.2673, -123.2597, 49.2737, -123.2481),
];

/// Reads an ordered JSON list of `{id, min_lat, min_lon, max_lat, max_lon}`.
pub fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read segments from {}", path.display()))?;
    let segments: Vec<Segment> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse segments in {}", path.display()))?;
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_segments;

    #[test]
    fn test_default_route_is_valid() {
        let layout = validate_segments(ROUTE_SEGMENTS).unwrap();
        let ids: Vec<u32> = ROUTE_SEGMENTS.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
        // Lions Gate Bridge (3) and the causeway (4) share the lat 49.3117 edge
        assert_eq!(layout.overlaps, vec![(3, 4)]);
    }
}
