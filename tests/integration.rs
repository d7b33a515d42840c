use sigil_engine::SigilEngine;
use sigil_engine::geom::{Point2, Point3};
use sigil_engine::parse::{parse_path_data, parse_svg_document};
use sigil_engine::sigil::{
    Recognizer, RecognizerConfig, Sigil, SigilError, SigilRegistry, SigilSource, Signature,
    flatten_stroke,
};

const ELL: &str = "M 0 0 L 10 0 L 10 -10";
const SQUARE: &str = "M 0 0 H 10 V -10 H 0 Z";
const SQUARE_LINES: &str = "M 0 0 L 10 0 L 10 -10 L 0 -10 L 0 0";

fn library() -> SigilRegistry {
    SigilRegistry::from_sources(
        Recognizer::default(),
        vec![
            SigilSource::new("ell", ELL),
            SigilSource::new("bar", "M 0 0 H 10"),
            SigilSource::new("drop", "M 0 0 V 10"),
            SigilSource::new("square", SQUARE_LINES),
        ],
    )
    .expect("library sigils are valid")
}

/// Ell drawn with 0.4 spacing in a plane tilted 30 degrees about X.
fn tilted_ell_stroke() -> Vec<Point3> {
    let (sin, cos) = 30_f64.to_radians().sin_cos();
    let flat = (0..=10)
        .map(|i| Point2::new(0.4 * f64::from(i), 0.0))
        .chain((1..=10).map(|j| Point2::new(4.0, 0.4 * f64::from(j))));
    flat.map(|p| Point3::new(2.0 + p.x, -1.0 + p.y * cos, 5.0 + p.y * sin))
        .collect()
}

#[test]
fn library_signatures_are_stable() {
    let registry = library();
    let signatures: Vec<(&str, &str)> = registry
        .iter()
        .map(|sigil| (sigil.name(), sigil.signature().as_str()))
        .collect();
    assert_eq!(
        signatures,
        vec![
            ("ell", "Right, Corner, Up"),
            ("bar", "Right"),
            ("drop", "Down"),
            ("square", "Right, Corner, Up, Corner, Left, Corner, Down"),
        ]
    );
}

#[test]
fn resampled_outlines_match_their_own_sigil() {
    let registry = library();
    for sigil in registry.iter() {
        let points = sigil.points(0.05).expect("resample");
        let matched = registry.match_points(&points).map(Sigil::name);
        assert_eq!(matched, Some(sigil.name()));
    }
}

#[test]
fn path_data_and_svg_agree() {
    let from_path = Sigil::from_path_data("ell", ELL, &Recognizer::default()).unwrap();
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
        <g><path d="M 0 0 L 10 0" stroke="black"/></g>
        <path d="M 10 0 L 10 -10"/>
    </svg>"#;
    let from_svg = Sigil::from_svg("ell", svg, &Recognizer::default()).unwrap();
    assert_eq!(from_path.signature(), from_svg.signature());
    assert_eq!(from_svg.path_data().len(), 2);

    let shape = parse_svg_document(svg).unwrap();
    assert_eq!(shape.paths().len(), 2);
    assert_eq!(shape.segment_count(), 4);
}

#[test]
fn freehand_stroke_in_a_tilted_plane_matches() {
    let registry = library();
    let stroke = tilted_ell_stroke();

    let flat = flatten_stroke(&stroke).unwrap();
    assert_eq!(flat.len(), stroke.len());
    assert_eq!(
        registry.recognizer().recognize(&flat),
        Signature::from("Right, Corner, Up")
    );

    let matched = registry.match_stroke(&stroke).unwrap();
    assert_eq!(matched.map(Sigil::name), Some("ell"));
}

#[test]
fn collinear_stroke_cannot_be_flattened() {
    let registry = library();
    let line: Vec<Point3> = (0..10)
        .map(|i| Point3::new(f64::from(i), 1.0, 2.0))
        .collect();
    assert!(registry.match_stroke(&line).is_err());
}

#[test]
fn registration_errors_are_typed() {
    let mut registry = library();
    assert!(matches!(
        registry.register("broken", "M 0 0 Q 1 1 2 2"),
        Err(SigilError::Parse(_))
    ));
    assert!(matches!(
        registry.register("dot", "M 4 4"),
        Err(SigilError::Shape(_))
    ));
    assert!(matches!(
        registry.register("BAR", "M 0 0 V -10"),
        Err(SigilError::DuplicateName(_))
    ));
    assert!(matches!(
        registry.register_svg("blank", "<svg/>"),
        Err(SigilError::SvgDocument(_))
    ));
    assert_eq!(registry.len(), 4);
}

#[test]
fn close_path_behaves_like_a_closing_line() {
    let closed = parse_path_data(SQUARE).unwrap();
    let lines = parse_path_data(SQUARE_LINES).unwrap();
    assert_eq!(closed.segments.len(), lines.segments.len());

    let recognizer = Recognizer::default();
    let a = Sigil::from_path_data("a", SQUARE, &recognizer).unwrap();
    let b = Sigil::from_path_data("b", SQUARE_LINES, &recognizer).unwrap();
    assert_eq!(a.signature(), b.signature());
}

#[test]
fn stricter_corner_angle_drops_corners() {
    let config = RecognizerConfig {
        corner_angle_degrees: 120.0,
        ..RecognizerConfig::default()
    };
    let recognizer = Recognizer::new(config).unwrap();
    let ell = Sigil::from_path_data("ell", ELL, &recognizer).unwrap();
    assert_eq!(ell.signature().as_str(), "Right, Up");
}

#[test]
fn engine_registers_and_matches() {
    let mut engine = SigilEngine::new();
    assert_eq!(engine.sigil_count(), 0);
    assert_eq!(
        engine.register_path("ell", ELL).ok().as_deref(),
        Some("Right, Corner, Up")
    );
    assert!(engine.register_path("Ell", "M 0 0 H 5").is_err());
    assert_eq!(engine.sigil_count(), 1);
    assert_eq!(engine.signature_of(" ELL ").as_deref(), Some("Right, Corner, Up"));
    assert_eq!(engine.signature_of("missing"), None);

    let outline: Vec<f64> = engine
        .registry()
        .get("ell")
        .unwrap()
        .points(0.05)
        .unwrap()
        .iter()
        .flat_map(|p| [p.x, p.y])
        .collect();
    assert_eq!(
        engine.recognize_points(&outline).ok().as_deref(),
        Some("Right, Corner, Up")
    );
    assert_eq!(
        engine.match_points(&outline).ok().flatten().as_deref(),
        Some("ell")
    );
    assert!(engine.match_points(&outline[1..]).is_err());

    let stroke: Vec<f64> = tilted_ell_stroke()
        .iter()
        .flat_map(|p| [p.x, p.y, p.z])
        .collect();
    assert_eq!(
        engine.match_stroke(&stroke).ok().flatten().as_deref(),
        Some("ell")
    );
    assert!(engine.match_stroke(&stroke[..4]).is_err());
}

#[test]
fn engine_rejects_invalid_configuration() {
    let config = RecognizerConfig {
        smoothing: 1.5,
        ..RecognizerConfig::default()
    };
    assert!(SigilEngine::from_config(config).is_err());
    assert!(SigilEngine::from_config(RecognizerConfig::default()).is_ok());
}
