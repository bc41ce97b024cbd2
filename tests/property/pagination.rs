//! Property-based tests for slicing a tall image across pages

use colab::export::{paginate, PageGeometry};
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

proptest! {
    #[test]
    fn page_count_is_ceiling_of_image_over_page(
        width in 1u32..4000,
        height in 1u32..40000,
        margin in 0u32..40,
    ) {
        let geometry = PageGeometry::a4_portrait(f64::from(margin));
        let pagination = paginate(width, height, &geometry).unwrap();

        let ratio = pagination.image_height_mm / geometry.printable_height();
        let count = pagination.page_count() as f64;
        prop_assert!(count >= 1.0);
        prop_assert!(count >= ratio - EPSILON);
        prop_assert!(count < ratio.max(1.0) + 1.0 + EPSILON);
    }

    #[test]
    fn bands_cover_the_image_without_gaps(
        width in 1u32..4000,
        height in 1u32..40000,
        margin in 0u32..40,
    ) {
        let geometry = PageGeometry::a4_portrait(f64::from(margin));
        let pagination = paginate(width, height, &geometry).unwrap();
        let pages = &pagination.pages;

        prop_assert!(pages[0].band_start_mm.abs() < EPSILON);
        prop_assert!((pages[pages.len() - 1].band_end_mm - pagination.image_height_mm).abs() < EPSILON);
        for pair in pages.windows(2) {
            prop_assert!((pair[0].band_end_mm - pair[1].band_start_mm).abs() < EPSILON);
        }
        for (k, page) in pages.iter().enumerate() {
            prop_assert_eq!(page.index, k);
            // The band visible through the margin window starts at the page top.
            prop_assert!((page.offset_mm + page.band_start_mm - geometry.margin_mm).abs() < EPSILON);
            prop_assert!(page.band_end_mm - page.band_start_mm <= geometry.printable_height() + EPSILON);
        }
    }

    #[test]
    fn image_fills_the_printable_width(width in 1u32..4000, height in 1u32..40000) {
        let geometry = PageGeometry::a4_portrait(10.0);
        let pagination = paginate(width, height, &geometry).unwrap();

        prop_assert!((pagination.image_width_mm - 190.0).abs() < EPSILON);
        let aspect = f64::from(height) / f64::from(width);
        prop_assert!((pagination.image_height_mm / pagination.image_width_mm - aspect).abs() < 1e-9 * aspect.max(1.0));
    }
}
