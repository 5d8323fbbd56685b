/// Chart colors, in assignment order.
pub const PALETTE: [&str; 6] = [
    "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6", "#ef4444",
];

/// Color of a whole chart, by its position among sibling charts.
pub fn series_color(chart_index: usize) -> &'static str {
    PALETTE[chart_index % PALETTE.len()]
}

/// Color of one pie slice, by the data point's position.
pub fn slice_color(point_index: usize) -> &'static str {
    PALETTE[point_index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::{PALETTE, series_color, slice_color};

    #[test]
    fn wraps_after_six() {
        assert_eq!(series_color(0), "#8b5cf6");
        assert_eq!(series_color(5), "#ef4444");
        assert_eq!(series_color(6), PALETTE[0]);
        assert_eq!(slice_color(13), PALETTE[1]);
    }
}
