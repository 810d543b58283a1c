// this_file: tests/real_world_scenarios.rs

//! GeoJSON-style polymorphic decoding: an alternation over the geometry
//! kinds with a recursive tie for geometry collections.

use std::io::Cursor;
use trickle_json::{
    array, double, enumerate_array, object, property, recursive, string, tuple2, Reader,
};

type Position = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    Collection(Vec<Geometry>),
}

fn position() -> Reader<Position> {
    tuple2(double(), double())
}

fn typed<C: Clone + Send + Sync + 'static>(
    kind: &'static str,
    coordinates: Reader<C>,
    make: impl Fn(C) -> Geometry + Send + Sync + 'static,
) -> Reader<Geometry> {
    object(
        (
            property("type", string().validate(move |t| t == kind)),
            property("coordinates", coordinates),
        ),
        move |_, c| make(c),
    )
}

fn geometry() -> Reader<Geometry> {
    recursive(|geometry| {
        let collection = object(
            (
                property("type", string().validate(|t| t == "GeometryCollection")),
                property("geometries", array(geometry.clone())),
            ),
            |_, geometries| Geometry::Collection(geometries),
        );
        typed("Point", position(), Geometry::Point)
            .or(typed("LineString", array(position()), Geometry::LineString))
            .or(typed("Polygon", array(array(position())), Geometry::Polygon))
            .or(typed("MultiPoint", array(position()), Geometry::MultiPoint))
            .or(typed(
                "MultiLineString",
                array(array(position())),
                Geometry::MultiLineString,
            ))
            .or(typed(
                "MultiPolygon",
                array(array(array(position()))),
                Geometry::MultiPolygon,
            ))
            .or(collection)
    })
}

#[test]
fn test_point() {
    assert_eq!(
        geometry()
            .read(br#"{"type": "Point", "coordinates": [100.0, 0.5]}"#)
            .unwrap(),
        Geometry::Point((100.0, 0.5))
    );
}

#[test]
fn test_coordinates_before_type() {
    // Alternation retries each branch over the buffered value, so member
    // order must not matter.
    assert_eq!(
        geometry()
            .read(br#"{"coordinates": [[1.0, 2.0], [3.0, 4.0]], "type": "LineString"}"#)
            .unwrap(),
        Geometry::LineString(vec![(1.0, 2.0), (3.0, 4.0)])
    );
}

#[test]
fn test_polygon() {
    let json = br#"{
        "type": "Polygon",
        "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]]
    }"#;
    assert_eq!(
        geometry().read(json).unwrap(),
        Geometry::Polygon(vec![vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]])
    );
}

#[test]
fn test_nested_geometry_collection() {
    let json = br#"{
        "type": "GeometryCollection",
        "geometries": [
            {"type": "Point", "coordinates": [100.0, 0.0]},
            {"type": "LineString", "coordinates": [[101.0, 0.0], [102.0, 1.0]]},
            {"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [1.0, 2.0]}
            ]}
        ]
    }"#;
    assert_eq!(
        geometry().read(json).unwrap(),
        Geometry::Collection(vec![
            Geometry::Point((100.0, 0.0)),
            Geometry::LineString(vec![(101.0, 0.0), (102.0, 1.0)]),
            Geometry::Collection(vec![Geometry::Point((1.0, 2.0))]),
        ])
    );
}

#[test]
fn test_unknown_geometry_kind_is_rejected() {
    let err = geometry()
        .read(br#"{"type": "Circle", "coordinates": [0.0, 0.0]}"#)
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON value."));
}

#[test]
fn test_streaming_feature_collection_with_buffered_alternation() {
    // Alternation needs each geometry buffered before branches run; tiny
    // refill buffers force that machinery to work for its living.
    let json = br#"[
        {"type": "Point", "coordinates": [100.0, 0.0]},
        {"type": "GeometryCollection", "geometries": [
            {"type": "LineString", "coordinates": [[1.0, 1.0], [2.0, 2.0]]}
        ]},
        {"type": "MultiPoint", "coordinates": [[5.0, 5.0], [6.0, 6.0]]}
    ]"#;
    for buffer_size in [3, 16, 64] {
        let stream = Cursor::new(json.to_vec());
        let items: Result<Vec<Geometry>, _> =
            enumerate_array(stream, geometry().buffer(), buffer_size).collect();
        assert_eq!(
            items.unwrap(),
            vec![
                Geometry::Point((100.0, 0.0)),
                Geometry::Collection(vec![Geometry::LineString(vec![(1.0, 1.0), (2.0, 2.0)])]),
                Geometry::MultiPoint(vec![(5.0, 5.0), (6.0, 6.0)]),
            ]
        );
    }
}
