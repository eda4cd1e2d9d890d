use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Formats a monetary amount in 억원 (hundred-million won) units, the
/// unit the backend reports everything in.
pub fn format_amount(value: f64) -> String {
    if value == value.trunc() {
        format!("{}억", value as i64)
    } else {
        format!("{value:.1}억")
    }
}

/// Signed variance, always carrying an explicit `+` for increases.
pub fn format_variance(variance: f64) -> String {
    if variance > 0.0 {
        format!("+{}", format_amount(variance))
    } else {
        format_amount(variance)
    }
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_drops_trailing_zero_fraction() {
        assert_eq!(format_amount(142.0), "142억");
        assert_eq!(format_amount(552.8), "552.8억");
    }

    #[test]
    fn variance_signs() {
        assert_eq!(format_variance(45.3), "+45.3억");
        assert_eq!(format_variance(-3.0), "-3억");
        assert_eq!(format_variance(0.0), "0억");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("p1");
        let (x2, y2) = stable_pair("p1");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }
}
