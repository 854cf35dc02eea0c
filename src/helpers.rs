/// Fixed-point rendering of a length, e.g. `format_distance(48.284, 2) == "48.28"`.
pub fn format_distance(length: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, length)
}
