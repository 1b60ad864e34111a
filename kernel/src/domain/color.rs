//! Deterministic accent colors derived from branch identifiers.
//!
//! Colors are never persisted: `branch_color` maps an id onto a fixed palette
//! with a 31-multiplier string hash over UTF-16 code units, computed in
//! wrapping 32-bit signed arithmetic and then taken in absolute value. The
//! same id always yields the same color.

use super::ids::BranchId;

/// Accent palette, indexed by `hash(id) % len`.
pub const ACCENT_PALETTE: [&str; 8] = [
    "#8B5CF6", // violet
    "#06B6D4", // cyan
    "#EC4899", // pink
    "#10B981", // emerald
    "#F59E0B", // amber
    "#A855F7", // purple
    "#3B82F6", // blue
    "#F97316", // orange
];

/// Hashes a string as `h = h * 31 + unit` over its UTF-16 code units.
#[must_use]
pub fn string_hash(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Returns the accent color for a branch id.
#[must_use]
pub fn branch_color(id: &BranchId) -> &'static str {
    let len = u32::try_from(ACCENT_PALETTE.len()).unwrap_or(u32::MAX);
    let idx = usize::try_from(string_hash(id.as_str()) % len).unwrap_or(0);
    ACCENT_PALETTE[idx]
}

/// Checks that a color is a `#RRGGBB` hex string.
#[must_use]
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("branch_root"), 991_868_577);
        assert_eq!(string_hash("branch_mobile"), 153_497_055);
    }

    #[test]
    fn color_is_stable_per_id() {
        assert_eq!(branch_color(&BranchId::new("branch_root")), "#06B6D4");
        assert_eq!(branch_color(&BranchId::new("branch_dark")), "#A855F7");
        assert_eq!(branch_color(&BranchId::new("branch_perf")), "#EC4899");
        assert_eq!(branch_color(&BranchId::new("branch_blend")), "#F59E0B");
        assert_eq!(branch_color(&BranchId::new("branch_mobile")), "#F97316");
    }

    #[test]
    fn generated_ids_land_in_palette() {
        for _ in 0..32 {
            let color = branch_color(&BranchId::generate());
            assert!(ACCENT_PALETTE.contains(&color));
        }
    }

    #[test]
    fn hex_color_check() {
        assert!(is_hex_color("#8B5CF6"));
        assert!(is_hex_color("#abcdef"));
        assert!(!is_hex_color("8B5CF6"));
        assert!(!is_hex_color("#8B5CF"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
