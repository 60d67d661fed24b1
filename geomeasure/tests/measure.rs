use approx::{assert_abs_diff_eq, assert_relative_eq};
use geomeasure::{DistanceArea, MeasureConfiguration};
use geomeasure_types::geo::Crs;
use geomeasure_types::impls::{ClosedContour, Contour, Polygon};
use geomeasure_types::units::{AreaUnit, DistanceUnit};
use geomeasure_types::{Geom, Point};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn wgs84() -> DistanceArea {
    init_logger();
    DistanceArea::new()
        .with_ellipsoid("WGS84")
        .expect("known ellipsoid")
}

#[test]
fn one_degree_of_latitude_at_equator() {
    let calculator = wgs84();
    let line = Geom::Contour(Contour::open(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
    ]));

    assert_abs_diff_eq!(calculator.measure_length(&line), 110_574.4, epsilon = 0.1);
}

#[test]
fn cartesian_measurements() {
    init_logger();
    let calculator = DistanceArea::new().with_source_crs(Crs::planar(DistanceUnit::Meters));

    let segment = Geom::Contour(Contour::open(vec![
        Point::new(1.0, 2.0),
        Point::new(4.0, 6.0),
    ]));
    assert_eq!(calculator.measure_length(&segment), 5.0);

    let polygon = Geom::Polygon(Polygon::from(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 3.0),
        Point::new(0.0, 3.0),
    ]));
    assert_eq!(calculator.measure_area(&polygon), 12.0);
    assert_eq!(calculator.measure_perimeter(&polygon), 14.0);
    assert_eq!(calculator.area_units(), AreaUnit::SquareMeters);
}

#[test]
fn direct_and_inverse_agree() {
    let calculator = wgs84();
    let start = Point::new(2.35, 48.85);

    for (distance, bearing) in [(1_000.0, 10.0), (250_000.0, 135.0), (3_000_000.0, 280.0)] {
        let end = calculator.destination(&start, distance, bearing);
        let solution = calculator.compute_distance_bearing(&start, &end);

        assert_relative_eq!(solution.distance, distance, max_relative = 1e-6);
        let course = solution.course1.to_degrees().rem_euclid(360.0);
        assert_abs_diff_eq!(course, bearing, epsilon = 1e-6);
    }
}

#[test]
fn coincident_points_have_zero_distance() {
    let calculator = wgs84();
    for point in [
        Point::new(0.0, 0.0),
        Point::new(-122.4, 37.8),
        Point::new(179.9, -89.0),
    ] {
        assert_eq!(calculator.compute_distance_bearing(&point, &point).distance, 0.0);
        assert_eq!(calculator.measure_line_between(&point, &point), 0.0);
    }
}

#[test]
fn polar_band_is_complemented() {
    let calculator = wgs84();
    let total = calculator
        .spheroid()
        .expect("ellipsoid set")
        .area_series()
        .total_area();

    let band = |lat: f64| -> Vec<Point> {
        (0..72)
            .map(|i| Point::new(-180.0 + 5.0 * i as f64, lat))
            .collect()
    };

    let north = calculator.measure_polygon(&band(89.0));
    let south = calculator.measure_polygon(&band(-89.0));
    assert!(north < total / 2.0);
    assert!(south < total / 2.0);
    assert_relative_eq!(north, south, max_relative = 1e-9);

    let hemisphere = [
        Point::new(-60.0, 10.0),
        Point::new(60.0, 10.0),
        Point::new(60.0, 70.0),
        Point::new(-60.0, 70.0),
    ];
    assert!(calculator.measure_polygon(&hemisphere) <= total / 2.0);
}

#[test]
fn polygon_with_hole() {
    let calculator = wgs84();
    let outer = ClosedContour::new(vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ]);
    let hole = ClosedContour::new(vec![
        Point::new(0.5, 0.5),
        Point::new(1.5, 0.5),
        Point::new(1.5, 1.5),
        Point::new(0.5, 1.5),
    ]);

    let outer_area = calculator.measure_polygon(outer.points());
    let hole_area = calculator.measure_polygon(hole.points());
    let polygon = Geom::Polygon(Polygon::new(outer, vec![hole]));

    assert_relative_eq!(
        calculator.measure_area(&polygon),
        outer_area - hole_area,
        max_relative = 1e-12
    );
}

#[test]
fn split_at_antimeridian() {
    let calculator = wgs84();
    let line = Geom::Contour(Contour::open(vec![
        Point::new(170.0, 0.0),
        Point::new(-170.0, 0.0),
    ]));

    let Geom::MultiContour(split) = calculator.split_geometry_at_antimeridian(&line) else {
        panic!("lines are split into a multi contour");
    };
    assert_eq!(split.len(), 2);

    let end = split.parts()[0].last().copied().expect("non-empty part");
    let start = split.parts()[1].first().copied().expect("non-empty part");
    assert_abs_diff_eq!(end.x().abs(), 180.0);
    assert_abs_diff_eq!(start.x().abs(), 180.0);
    assert_abs_diff_eq!(end.y(), start.y(), epsilon = 1e-6);
}

#[test]
fn geodesic_line_is_monotonic() {
    let calculator = wgs84();
    let p1 = Point::new(-74.0, 40.7);
    let p2 = Point::new(-0.1, 51.5);

    let parts = calculator.geodesic_line(&p1, &p2, 50_000.0, true);
    assert_eq!(parts.len(), 1);

    let samples = &parts[0];
    assert_eq!(samples.first(), Some(&p1));
    assert_eq!(samples.last(), Some(&p2));

    let distances: Vec<f64> = samples
        .iter()
        .map(|p| calculator.compute_distance_bearing(&p1, p).distance)
        .collect();
    assert!(distances.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unit_conversion_round_trip() {
    let calculator = wgs84();
    let length = 12_345.678;
    for unit in DistanceUnit::ALL {
        let converted = calculator.convert_length_measurement(length, unit);
        assert_relative_eq!(
            converted * unit.factor_to(calculator.length_units()),
            length,
            max_relative = 1e-12
        );
    }

    let area = 98_765.4321;
    for unit in AreaUnit::ALL {
        let converted = calculator.convert_area_measurement(area, unit);
        assert_relative_eq!(
            converted * unit.factor_to(calculator.area_units()),
            area,
            max_relative = 1e-12
        );
    }
}

#[test]
fn configured_from_json() {
    init_logger();
    let config: MeasureConfiguration = serde_json::from_str(
        r#"{
            "ellipsoid": "WGS84",
            "source_crs": {
                "datum": { "semimajor": 6378137.0, "inv_flattening": 298.257223563 },
                "projection_type": "web_mercator",
                "units": "meters"
            }
        }"#,
    )
    .expect("valid configuration");

    let calculator = DistanceArea::from_config(&config).expect("known ellipsoid");
    assert_eq!(calculator.source_crs(), &Crs::EPSG3857);

    let length = calculator
        .measure_line_between(&Point::new(0.0, 0.0), &Point::new(0.0, 111_325.142_866_385));
    assert_abs_diff_eq!(length, 110_574.4, epsilon = 0.1);
}

#[cfg(feature = "geodesy")]
#[test]
fn projected_source() {
    init_logger();
    let calculator = wgs84().with_source_crs(Crs::projected("utm zone=32", DistanceUnit::Meters));

    // Along the central meridian of the zone.
    let line = Geom::Contour(Contour::open(vec![
        Point::new(500_000.0, 0.0),
        Point::new(500_000.0, 110_530.158),
    ]));
    let length = calculator.measure_length(&line);
    assert_relative_eq!(length, 110_574.4, max_relative = 1e-3);
}
