use patternkit_core::{Bounds, PageSize};
use patternkit_export::{grid_size, tile_canvas};
use proptest::prelude::*;

#[test]
fn test_a4_tiling_of_medium_canvas() {
    let canvas = Bounds::new(0.0, 50.0, 0.0, 80.0);
    let tiles = tile_canvas(Some(&canvas), PageSize::A4, 2.0);

    assert_eq!(tiles.len(), 12);
    assert_eq!((tiles[0].tiles_x, tiles[0].tiles_y), (3, 4));
    assert!((tiles[1].min_x - 17.0).abs() < 1e-9);
    assert!((tiles[3].min_y - 25.7).abs() < 1e-9);
}

#[test]
fn test_larger_margin_needs_more_pages() {
    let canvas = Bounds::new(0.0, 50.0, 0.0, 80.0);
    let (x_small, y_small) = grid_size(&canvas, PageSize::A4, 1.0);
    let (x_large, y_large) = grid_size(&canvas, PageSize::A4, 4.0);
    assert!(x_large * y_large > x_small * y_small);
}

proptest! {
    #[test]
    fn prop_tiles_cover_canvas_exactly(
        min_x in -100.0..100.0f64,
        min_y in -100.0..100.0f64,
        width in 0.5..300.0f64,
        height in 0.5..300.0f64,
        margin in 0.0..5.0f64,
    ) {
        let canvas = Bounds::new(min_x, min_x + width, min_y, min_y + height);
        let page = PageSize::A4;
        let (usable_w, usable_h) = page.usable(margin);
        let tiles = tile_canvas(Some(&canvas), page, margin);

        let (tiles_x, tiles_y) = grid_size(&canvas, page, margin);
        prop_assert_eq!(tiles.len(), tiles_x * tiles_y);
        prop_assert!(tiles_x as f64 >= width / usable_w - 1e-6);
        prop_assert!(((tiles_x - 1) as f64) < width / usable_w);
        prop_assert!(tiles_y as f64 >= height / usable_h - 1e-6);

        let last = tiles.last().unwrap();
        prop_assert_eq!(last.max_x, canvas.max_x);
        prop_assert_eq!(last.max_y, canvas.max_y);

        // Adjacent windows share edges with no gaps.
        for tile in &tiles {
            prop_assert!(tile.min_x < tile.max_x);
            prop_assert!(tile.min_y < tile.max_y);
            if tile.col + 1 < tile.tiles_x {
                let right = &tiles[tile.page_number()];
                prop_assert!((right.min_x - tile.max_x).abs() < 1e-9);
            }
        }
        prop_assert_eq!(tiles[0].min_x, canvas.min_x);
        prop_assert_eq!(tiles[0].min_y, canvas.min_y);
    }
}
