use image::{Rgba, RgbaImage};
use inkplot_core::{Cap, Color, Style};
use inkplot_render::{RasterRenderer, Renderer};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Size};
use std::f64::consts::PI;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

/// Opaque canvas where every pixel differs from its neighbours.
fn patterned(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 7) as u8, (y * 11) as u8, 200, 255]))
}

fn blue() -> Color {
    Color::from_rgba8(0, 0, 255, 255)
}

#[test]
fn size_reports_user_units() {
    let mut img = RgbaImage::new(200, 100);
    let renderer = RasterRenderer::new(&mut img, 2.0).unwrap();
    assert_eq!(renderer.size(), Size::new(100.0, 50.0));
}

#[test]
fn off_canvas_paths_do_not_touch_the_buffer() {
    init_logging();
    let original = patterned(20, 20);
    let mut img = original.clone();
    let style = Style::default()
        .with_fill(blue())
        .with_stroke(Color::from_rgba8(0, 0, 0, 255), 1.0);

    let mut renderer = RasterRenderer::new(&mut img, 1.0).unwrap();
    for path in [
        rect(30.0, 30.0, 40.0, 40.0),
        rect(-40.0, -40.0, -30.0, -30.0),
        // Off on one axis only.
        rect(25.0, 5.0, 35.0, 10.0),
        rect(5.0, -20.0, 10.0, -10.0),
        rect(5.0, 25.0, 10.0, 30.0),
    ] {
        renderer.render_path(&path, &style, Affine::IDENTITY).unwrap();
    }

    assert_eq!(img, original);
}

#[test]
fn partial_overlap_only_changes_the_intersection() {
    init_logging();
    let original = patterned(20, 20);
    let mut img = original.clone();

    let mut renderer = RasterRenderer::new(&mut img, 1.0).unwrap();
    let style = Style::default().with_fill(blue());
    renderer.render_path(&rect(-5.0, -5.0, 5.0, 5.0), &style, Affine::IDENTITY).unwrap();

    for (x, y, p) in img.enumerate_pixels() {
        let inside = x < 5 && y >= 15;
        if inside {
            assert_eq!(*p, Rgba([0, 0, 255, 255]), "pixel ({x}, {y})");
        } else {
            assert_eq!(p, original.get_pixel(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn partial_overlap_at_far_corner() {
    let original = patterned(20, 20);
    let mut img = original.clone();

    let mut renderer = RasterRenderer::new(&mut img, 1.0).unwrap();
    let style = Style::default().with_fill(blue());
    renderer.render_path(&rect(15.0, 15.0, 30.0, 30.0), &style, Affine::IDENTITY).unwrap();

    for (x, y, p) in img.enumerate_pixels() {
        if x >= 15 && y < 5 {
            assert_eq!(*p, Rgba([0, 0, 255, 255]), "pixel ({x}, {y})");
        } else {
            assert_eq!(p, original.get_pixel(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn opaque_rectangle_is_exact_and_idempotent() {
    let color = Color::from_rgba8(12, 34, 56, 255);
    let style = Style::default().with_fill(color);
    let path = rect(3.0, 2.0, 9.0, 7.0);

    let mut once = RgbaImage::new(12, 12);
    RasterRenderer::new(&mut once, 1.0)
        .unwrap()
        .render_path(&path, &style, Affine::IDENTITY)
        .unwrap();

    let mut twice = RgbaImage::new(12, 12);
    {
        let mut renderer = RasterRenderer::new(&mut twice, 1.0).unwrap();
        renderer.render_path(&path, &style, Affine::IDENTITY).unwrap();
        renderer.render_path(&path, &style, Affine::IDENTITY).unwrap();
    }

    for (x, y, p) in once.enumerate_pixels() {
        let covered = (3..9).contains(&x) && (5..10).contains(&y);
        let expected = if covered { Rgba([12, 34, 56, 255]) } else { Rgba([0, 0, 0, 0]) };
        assert_eq!(*p, expected, "pixel ({x}, {y})");
    }
    assert_eq!(once, twice);
}

#[test]
fn anti_aliased_edges_are_partial() {
    let mut img = RgbaImage::new(10, 10);
    let style = Style::default().with_fill(blue());
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_path(&rect(2.5, 2.0, 6.0, 6.0), &style, Affine::IDENTITY)
        .unwrap();

    let edge = img.get_pixel(2, 6)[3];
    assert!(edge > 0 && edge < 255, "edge alpha {edge}");
    assert_eq!(img.get_pixel(3, 6)[3], 255);
}

#[test]
fn dashed_stroke_paints_the_on_fraction() {
    init_logging();
    let mut line = BezPath::new();
    line.move_to(Point::new(10.0, 50.0));
    line.line_to(Point::new(110.0, 50.0));

    let style = Style::default()
        .with_fill(Color::TRANSPARENT)
        .with_stroke(Color::from_rgba8(0, 0, 0, 255), 2.0)
        .with_cap(Cap::Butt)
        .with_dashes(0.0, &[10.0, 10.0]);

    let mut img = RgbaImage::new(120, 100);
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_path(&line, &style, Affine::IDENTITY)
        .unwrap();

    // 100 long, half of it on, 2 wide.
    let painted: f64 = img.pixels().map(|p| p[3] as f64 / 255.0).sum();
    assert!((painted - 100.0).abs() < 5.0, "painted area {painted}");

    // The band covers buffer rows 49 and 50; count separate runs along it.
    let mut runs = 0;
    let mut inside = false;
    for x in 0..120 {
        let on = img.get_pixel(x, 49)[3] > 127;
        if on && !inside {
            runs += 1;
        }
        inside = on;
    }
    assert_eq!(runs, 5);
}

#[test]
fn dash_offset_shifts_the_pattern() {
    let mut line = BezPath::new();
    line.move_to(Point::new(0.0, 5.0));
    line.line_to(Point::new(40.0, 5.0));

    let style = Style::default()
        .with_fill(Color::TRANSPARENT)
        .with_stroke(Color::from_rgba8(0, 0, 0, 255), 2.0)
        .with_dashes(5.0, &[10.0, 10.0]);

    let mut img = RgbaImage::new(40, 10);
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_path(&line, &style, Affine::IDENTITY)
        .unwrap();

    // Starts half way through the first dash: on 0..5, off 5..15, on 15..25.
    assert_eq!(img.get_pixel(2, 4)[3], 255);
    assert_eq!(img.get_pixel(10, 4)[3], 0);
    assert_eq!(img.get_pixel(20, 4)[3], 255);
}

#[test]
fn image_identity_reproduces_source() {
    init_logging();
    let src = RgbaImage::from_fn(6, 5, |x, y| Rgba([(x * 40) as u8, (y * 50) as u8, 90, 255]));
    let mut img = RgbaImage::new(20, 20);
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_image(&src, Affine::IDENTITY)
        .unwrap();

    for (x, y, p) in img.enumerate_pixels() {
        if x < 6 && y >= 15 {
            assert_eq!(p, src.get_pixel(x, y - 15), "pixel ({x}, {y})");
        } else {
            assert_eq!(*p, Rgba([0, 0, 0, 0]), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn image_translation_is_not_shifted_by_margin() {
    let src = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
    let mut img = RgbaImage::new(20, 20);
    RasterRenderer::new(&mut img, 2.0)
        .unwrap()
        .render_image(&src, Affine::translate((5.0, 5.0)))
        .unwrap();

    // 3 units at 2 px per unit: columns 10..16, rows 4..10.
    for x in 11..15 {
        for y in 5..9 {
            assert_eq!(*img.get_pixel(x, y), Rgba([1, 2, 3, 255]), "pixel ({x}, {y})");
        }
    }

    // The filter spills one pixel past each edge, the same amount on every side.
    let left = img.get_pixel(9, 7)[3] as i32;
    let right = img.get_pixel(16, 7)[3] as i32;
    let top = img.get_pixel(12, 3)[3] as i32;
    let bottom = img.get_pixel(12, 10)[3] as i32;
    assert!(left > 0);
    assert!((left - right).abs() <= 1 && (top - bottom).abs() <= 1 && (left - top).abs() <= 1);

    for (x, y, p) in img.enumerate_pixels() {
        if x <= 8 || x >= 17 || y <= 2 || y >= 11 {
            assert_eq!(p[3], 0, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn rotated_image_has_soft_clean_edges() {
    init_logging();
    let src = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
    let transform = Affine::translate((15.0, 15.0)) * Affine::rotate(PI / 4.0) * Affine::translate((-4.0, -4.0));

    let mut img = RgbaImage::new(30, 30);
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_image(&src, transform)
        .unwrap();

    // The center is solid.
    for (x, y) in [(14, 14), (15, 14), (14, 15), (15, 15)] {
        let p = img.get_pixel(x, y);
        assert!(p[3] >= 250, "pixel ({x}, {y}) = {p:?}");
    }

    // Nothing but the image color appears, with anti-aliased borders.
    let mut partial = 0;
    for p in img.pixels().filter(|p| p[3] != 0) {
        assert_eq!((p[0], p[1], p[2]), (255, 0, 0), "stray color {p:?}");
        if p[3] < 250 {
            partial += 1;
        }
    }
    assert!(partial > 0);

    // Corners of the canvas stay empty.
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(img.get_pixel(29, 29)[3], 0);
}

#[test]
fn image_outside_canvas_is_ignored() {
    let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let mut img = RgbaImage::new(10, 10);
    RasterRenderer::new(&mut img, 1.0)
        .unwrap()
        .render_image(&src, Affine::translate((50.0, 50.0)))
        .unwrap();
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn geometry_beyond_integer_range_is_handled() {
    init_logging();
    let original = patterned(10, 10);
    let mut img = original.clone();
    let style = Style::default().with_fill(blue());
    let square = rect(0.0, 0.0, 1.0, 1.0);

    let mut renderer = RasterRenderer::new(&mut img, 1.0).unwrap();
    renderer.render_path(&square, &style, Affine::translate((1e19, 0.0))).unwrap();
    renderer.render_path(&square, &style, Affine::translate((0.0, -1e19))).unwrap();
    assert_eq!(*renderer.target(), original);

    // Only the bottom row can be covered by a square stretched along x.
    renderer.render_path(&square, &style, Affine::scale_non_uniform(1e19, 1.0)).unwrap();
    for (x, y, p) in img.enumerate_pixels() {
        if y < 9 {
            assert_eq!(p, original.get_pixel(x, y), "pixel ({x}, {y})");
        }
    }
}
