use hashicon::{Color, PointD, RasterRenderer, Renderer, ScanlineRasterizer};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> [PointD; 4] {
    [
        PointD::new(x0, y0),
        PointD::new(x1, y0),
        PointD::new(x1, y1),
        PointD::new(x0, y1),
    ]
}

#[test]
fn coverage_sums_to_area() {
    let cases = [
        (0.0, 0.0, 16.0, 16.0),
        (2.0, 3.0, 9.0, 11.0),
        (1.5, 2.5, 7.5, 6.5),
        (0.25, 0.0, 3.75, 4.0),
    ];
    for (x0, y0, x1, y1) in cases {
        let mut ras = ScanlineRasterizer::new(16, 16);
        ras.add_polygon(&rect(x0, y0, x1, y1));
        let mask = ras.rasterize();
        let area = (x1 - x0) * (y1 - y0);
        assert!(
            (mask.total() - area).abs() < 1e-3,
            "{x0},{y0} {x1},{y1}: {} vs {area}",
            mask.total()
        );
    }
}

#[test]
fn coverage_stays_in_unit_range() {
    let mut ras = ScanlineRasterizer::new(12, 12);
    ras.add_polygon(&rect(0.0, 0.0, 12.0, 12.0));
    ras.add_polygon(&rect(1.3, 1.7, 10.2, 9.9));
    ras.add_circle(PointD::new(2.0, 2.0), 7.3, false);
    let mask = ras.rasterize();
    assert!(mask.data().iter().all(|&c| (0.0..=1.0).contains(&c)));
}

#[test]
fn shapes_outside_canvas_are_clipped() {
    let mut ras = ScanlineRasterizer::new(8, 8);
    ras.add_polygon(&rect(-4.0, -4.0, 4.0, 4.0));
    let mask = ras.rasterize();
    assert!((mask.total() - 16.0).abs() < 1e-3);
    assert_eq!(mask.coverage(7, 7), 0.0);
}

#[test]
fn degenerate_input_has_no_coverage() {
    let mut ras = ScanlineRasterizer::new(8, 8);
    ras.add_polygon(&[PointD::new(1.0, 1.0), PointD::new(6.0, 6.0)]);
    ras.add_polygon(&[]);
    ras.add_polygon(&[
        PointD::new(1.0, 2.0),
        PointD::new(5.0, 2.0),
        PointD::new(7.0, 2.0),
    ]);
    assert!(ras.rasterize().is_empty());
}

#[test]
fn nested_square_leaves_hole() {
    let mut r = RasterRenderer::new(10, 10);
    r.set_background(Color::WHITE);
    r.begin_shape(Color::BLACK);
    r.add_polygon(&rect(0.0, 0.0, 10.0, 10.0));
    r.add_polygon(&rect(3.0, 3.0, 7.0, 7.0));
    r.end_shape();
    let pm = r.into_pixmap();
    assert_eq!(pm.pixel(1, 1), Some(Color::BLACK));
    assert_eq!(pm.pixel(5, 5), Some(Color::WHITE));
}

#[test]
fn more_subsamples_converge() {
    let area = |s: u32| {
        let mut ras = ScanlineRasterizer::new(32, 32).with_subsamples(s);
        ras.add_circle(PointD::new(4.0, 4.0), 24.0, false);
        ras.rasterize().total()
    };
    let exact = std::f64::consts::PI * 144.0;
    let coarse = (area(1) - exact).abs();
    let fine = (area(16) - exact).abs();
    assert!(fine <= coarse + 0.5);
    assert!(fine / exact < 0.02);
}
