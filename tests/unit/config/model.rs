use super::*;

#[test]
fn defaults_describe_the_reference_session() {
    let config = EngineConfig::default();
    assert_eq!(config.initial_values, vec![12, 58, 51, 21, 34, 10, 15]);
    assert_eq!(config.layout.cell_size, 60.0);
    assert_eq!(config.layout.gap, 12.0);
    assert_eq!(config.motion.fps, 60.0);
    assert_eq!(config.motion.swap_ease, Ease::SWAP);
    config.validate().unwrap();
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = EngineConfig::from_json(r#"{"initial_values":[3,2,1],"motion":{"fps":30}}"#).unwrap();
    assert_eq!(config.initial_values, vec![3, 2, 1]);
    assert_eq!(config.layout, Layout::default());
    assert_eq!(config.motion.fps, 30.0);
    assert_eq!(config.motion.swap_secs, 0.8);
}

#[test]
fn bezier_curve_parses_from_json() {
    let config = EngineConfig::from_json(
        r#"{"motion":{"swap_ease":{"cubic_bezier":{"x1":0.1,"y1":0.2,"x2":0.3,"y2":0.4}}}}"#,
    )
    .unwrap();
    assert_eq!(
        config.motion.swap_ease,
        Ease::CubicBezier {
            x1: 0.1,
            y1: 0.2,
            x2: 0.3,
            y2: 0.4
        }
    );
}

#[test]
fn invalid_values_are_rejected() {
    assert!(EngineConfig::from_json(r#"{"layout":{"cell_size":-1}}"#).is_err());
    assert!(EngineConfig::from_json(r#"{"motion":{"fps":0}}"#).is_err());
    assert!(EngineConfig::from_json(r#"{"motion":{"swap_secs":-0.1}}"#).is_err());
    assert!(EngineConfig::from_json("not json").is_err());
}

#[test]
fn frames_round_up_and_never_vanish() {
    let motion = MotionConfig::default();
    assert_eq!(motion.frames(0.8), 48);
    assert_eq!(motion.frames(0.2), 12);
    assert_eq!(motion.frames(0.001), 1);
    assert_eq!(motion.frames(0.0), 1);
}
