//! Small presentation helpers shared by the public pages.

const THOUSANDS_THRESHOLD: u64 = 10_000;

/// Render a view counter the way post cards show it.
pub fn format_views(views: u64) -> String {
    if views >= THOUSANDS_THRESHOLD {
        #[allow(clippy::cast_precision_loss)]
        let thousands = views as f64 / 1000.0;
        format!("{thousands:.1}K views")
    } else {
        format!("{views} views")
    }
}
