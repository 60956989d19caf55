use crate::*;

#[test]
fn parse_query_all_reads_every_object() {
    let out = "svg8,0,0,210,297\nrect1,90,90,80,60\ntext1,100,100,50,20\n";
    let map = parse_query_all(out).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map["rect1"], BBox::new(90.0, 90.0, 80.0, 60.0));
    assert_eq!(map["text1"], BBox::new(100.0, 100.0, 50.0, 20.0));
}

#[test]
fn parse_query_all_skips_empty_lines() {
    let out = "\nrect1,1,2,3,4\n\n   \r\ntext1,5,6,7,8\r\n";
    let map = parse_query_all(out).unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), ["rect1", "text1"]);
}

#[test]
fn parse_query_all_accepts_exponents_and_negatives() {
    let map = parse_query_all("g1,-1.5e-3,2E2,0.25,7\n").unwrap();
    assert_eq!(map["g1"], BBox::new(-0.0015, 200.0, 0.25, 7.0));
}

#[test]
fn parse_query_all_later_duplicate_wins() {
    let map = parse_query_all("a,1,1,1,1\na,2,2,2,2\n").unwrap();
    assert_eq!(map["a"], BBox::new(2.0, 2.0, 2.0, 2.0));
}

#[test]
fn parse_query_all_rejects_wrong_field_count() {
    let err = parse_query_all("rect1,1,2,3,4\nrect2,1,2,3\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed geometry output (line 2): expected 5 fields, found 4"
    );
}

#[test]
fn parse_query_all_rejects_non_numeric_fields() {
    let err = parse_query_all("rect1,1,two,3,4").unwrap_err();
    assert!(matches!(err, Error::MalformedGeometry { line: 1, .. }));
    assert!(err.to_string().contains("\"two\""));
}

#[test]
fn parse_query_all_rejects_non_finite_fields() {
    for out in ["r,inf,0,1,1", "r,0,NaN,1,1", "r,0,0,1e400,1"] {
        let err = parse_query_all(out).unwrap_err();
        assert!(matches!(err, Error::MalformedGeometry { line: 1, .. }), "{out}");
        assert!(err.to_string().contains("not a finite number"), "{out}");
    }
}

#[test]
fn parse_query_all_rejects_empty_ids() {
    let err = parse_query_all(",1,2,3,4").unwrap_err();
    assert!(err.to_string().ends_with("empty object id"));
}

#[test]
fn static_geometry_ignores_the_document() {
    let provider = StaticGeometry::from_query_all("rect1,1,2,3,4\n").unwrap();
    let a = provider.resolve("<svg/>").unwrap();
    let b = provider.resolve("").unwrap();
    assert_eq!(a, b);
    assert_eq!(a["rect1"], BBox::new(1.0, 2.0, 3.0, 4.0));
}
