//! Content domain: tests for tuning parsing and loading.

use std::io::Write;

use super::{ContentLoadError, EnemyKind, EnemyRoster, load_tuning_file, parse_tuning};

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_empty_file_uses_defaults() {
    let file = parse_tuning("()", "inline").expect("empty struct parses");
    assert_eq!(file.player.max_health, 100.0);
    assert_eq!(file.combat.combo_window_ms, 800.0);
    assert_eq!(file.enemies.grunt.max_health, 30.0);
    assert!(file.seed.is_none());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let source = r#"(
        seed: 42,
        player: (walk_speed: 120.0),
        combat: (combo_window_ms: 600.0),
    )"#;
    let file = parse_tuning(source, "inline").expect("partial file parses");

    assert_eq!(file.seed, Some(42));
    assert_eq!(file.player.walk_speed, 120.0);
    assert_eq!(file.player.run_speed, 280.0);
    assert_eq!(file.combat.combo_window_ms, 600.0);
    assert_eq!(file.combat.punch.damage, 10.0);
}

#[test]
fn test_parse_error_names_the_file() {
    let err = parse_tuning("(player: (walk_speed: \"fast\"))", "broken.ron")
        .expect_err("string where a float belongs");
    assert!(matches!(err, ContentLoadError::Parse { .. }));
    assert_eq!(err.file(), "broken.ron");
    assert!(err.to_string().contains("broken.ron"));
}

#[test]
fn test_shipped_tuning_file_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(super::TUNING_PATH);
    let file = load_tuning_file(&path).expect("shipped tuning is valid");
    assert_eq!(file.enemies.charger.knockback_resist, 3.0);
    assert_eq!(file.combat.sword.hit_stop_ms, 100.0);
}

// -----------------------------------------------------------------------------
// Loading tests
// -----------------------------------------------------------------------------

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "(enemies: (grunt: (max_health: 45.0)))").expect("write");

    let tuning = load_tuning_file(file.path()).expect("loads");
    assert_eq!(tuning.enemies.grunt.max_health, 45.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.ron");

    let err = load_tuning_file(&path).expect_err("file does not exist");
    assert!(matches!(err, ContentLoadError::Io { .. }));
    assert!(err.file().ends_with("absent.ron"));
}

// -----------------------------------------------------------------------------
// Roster tests
// -----------------------------------------------------------------------------

#[test]
fn test_roster_profiles_by_kind() {
    let roster = EnemyRoster::default();
    assert_eq!(roster.profile(EnemyKind::Grunt).lose_range_factor, 2.5);
    assert_eq!(roster.profile(EnemyKind::Orchestrator).knockback_resist, 4.0);
    assert_eq!(roster.profile(EnemyKind::Teleporter).score_value, 1000);
    assert!(!EnemyKind::Grunt.is_boss());
    assert!(EnemyKind::Mirror.is_boss());
}
