// tests/plant_topology.rs
use glam::{Quat, Vec3};
use lsystem_tree::{
    GenerationConfig, GeometryBuffer, Grammar, LSystemEngine, LSystemError, Rewriter,
    TurtleConfig, TurtleInterpreter,
};

const ANGLE: f32 = 25.7;

fn setup() -> (Grammar, TurtleInterpreter) {
    let grammar = Grammar::parse("F\nF:F[+F]F[-F]F\n").unwrap();
    let interpreter = TurtleInterpreter::standard(TurtleConfig {
        turn_angle: ANGLE,
        step_length: 1.0,
        scale: 1.0,
        origin: Vec3::new(0.0, -0.5, 0.0),
        max_stack_depth: 64,
    })
    .unwrap();
    (grammar, interpreter)
}

fn rotated_up(degrees: f32) -> Vec3 {
    Quat::from_rotation_z(degrees.to_radians()) * Vec3::Y
}

#[test]
fn test_single_generation_plant_topology() {
    let (grammar, interpreter) = setup();

    let symbols = Rewriter::default().expand(&grammar, 1).unwrap();
    assert_eq!(symbols, "F[+F]F[-F]F");

    let edges = interpreter.interpret(&symbols).unwrap();
    assert_eq!(edges.len(), 5, "one edge per F");

    // Edge 1: the trunk base, straight up from the origin.
    assert_eq!(edges[0].start, Vec3::new(0.0, -0.5, 0.0));
    assert_eq!(edges[0].end, Vec3::new(0.0, 0.5, 0.0));

    // Edge 2: left branch from the top of edge 1.
    assert_eq!(edges[1].start, edges[0].end);
    assert!(edges[1].direction().abs_diff_eq(rotated_up(ANGLE), 1e-5));

    // Edge 3: `]` restored edge 1, so the trunk continues from edge 1's end
    // rather than from the branch tip.
    assert_eq!(edges[2].start, edges[0].end);
    assert!(edges[2].direction().abs_diff_eq(Vec3::Y, 1e-6));

    // Edge 4: right branch from the top of edge 3.
    assert_eq!(edges[3].start, edges[2].end);
    assert!(edges[3].direction().abs_diff_eq(rotated_up(-ANGLE), 1e-5));

    // Edge 5: trunk again, restored from edge 3.
    assert_eq!(edges[4].start, edges[2].end);
    assert!(edges[4].direction().abs_diff_eq(Vec3::Y, 1e-6));

    for edge in &edges {
        assert_eq!(edge.start.z, 0.0);
        assert_eq!(edge.end.z, 0.0);
        assert!((edge.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_unbracketed_edges_chain() {
    let (_, interpreter) = setup();
    let edges = interpreter.interpret("F+F-F+F+F").unwrap();
    assert_eq!(edges.len(), 5);
    for pair in edges.windows(2) {
        assert_eq!(pair[1].start, pair[0].end);
    }
}

#[test]
fn test_balanced_brackets_leave_empty_stack() {
    let (grammar, interpreter) = setup();
    let symbols = Rewriter::default().expand(&grammar, 3).unwrap();
    let trace = interpreter.interpret_traced(&symbols).unwrap();
    assert_eq!(trace.open_branches, 0);
    assert_eq!(trace.edges.len(), symbols.matches('F').count());
}

#[test]
fn test_unbalanced_pop_is_an_error() {
    let (_, interpreter) = setup();
    let err = interpreter.interpret("F[+F]]F").unwrap_err();
    assert!(matches!(err, LSystemError::UnbalancedBracket { position: 5 }));
}

#[test]
fn test_generation_is_deterministic() {
    let (grammar, interpreter) = setup();
    let build = || {
        let symbols = Rewriter::default().expand(&grammar, 4).unwrap();
        let edges = interpreter.interpret(&symbols).unwrap();
        GeometryBuffer::flatten(&edges, Vec3::ONE)
    };
    let a = build();
    let b = build();
    let bits = |g: &GeometryBuffer| -> Vec<u32> {
        g.positions
            .iter()
            .flat_map(|p| p.to_array())
            .map(f32::to_bits)
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.colors, b.colors);
}

#[test]
fn test_engine_runs_from_grammar_file() {
    let path = std::env::temp_dir().join("lsystem_tree_engine_test.txt");
    std::fs::write(&path, "X\r\nX:F[+X][-X]FX\r\nF:FF\r\n").unwrap();

    let config = GenerationConfig::new(&path)
        .with_generations(3)
        .with_turn_angle(ANGLE)
        .with_color(Vec3::new(0.2, 0.8, 0.2))
        .with_history(true);
    let plant = LSystemEngine::from_config(&config).unwrap().run().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(plant.history[0], "X");
    assert_eq!(plant.history[1], "F[+X][-X]FX");
    assert_eq!(plant.edges.len(), plant.symbols.matches('F').count());
    assert_eq!(plant.geometry.vertex_count(), 2 * plant.edges.len());
    assert!(plant.geometry.colors.iter().all(|c| *c == Vec3::new(0.2, 0.8, 0.2)));

    // Tiered step (0.25) shrunk by 0.7^3 on the first, always-upright edge.
    let first = plant.edges[0];
    assert_eq!(first.start, Vec3::new(0.0, -0.8, 0.0));
    assert!((first.length() - 0.25 * 0.7f32.powi(3)).abs() < 1e-6);
}

#[test]
fn test_missing_grammar_file_is_io_error() {
    let config = GenerationConfig::new("/no/such/grammar.txt").with_generations(1);
    assert!(matches!(
        LSystemEngine::from_config(&config),
        Err(LSystemError::Io { .. })
    ));
}
