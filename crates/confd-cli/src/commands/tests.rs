//! Unit tests for CLI commands.

use super::*;
use confd_resolver::Resolved;
use serde_json::json;
use tempfile::TempDir;

/// Create a configuration root holding a single fragment
fn create_temp_root() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("a.json"), r#"{"k_a": "v_a"}"#).unwrap();
    temp_dir
}

#[test]
fn test_context_accepts_any_case_strategy() {
    let ctx = CommandContext::new("conf.d", "backcursion").unwrap();
    assert_eq!(ctx.conf.current_strategy(), Strategy::Backcursion);
}

#[test]
fn test_context_rejects_unknown_strategy() {
    let err = CommandContext::new("conf.d", "leafs").err().unwrap();
    assert!(matches!(err, ConfdError::InvalidStrategy { .. }));
    assert_eq!(hint_for(&err), Some("Did you mean 'LEAVES'?".to_string()));
}

#[test]
fn test_context_rejects_empty_root() {
    let err = CommandContext::new("", "LEAVES").err().unwrap();
    assert!(matches!(err, ConfdError::InvalidArgument { .. }));
    assert_eq!(hint_for(&err), None);
}

#[test]
fn test_suggest_similar_strategy() {
    assert_eq!(suggest_similar_strategy("leaves"), Some(Strategy::Leaves));
    assert_eq!(suggest_similar_strategy("aray"), Some(Strategy::Array));
    assert_eq!(suggest_similar_strategy("backcurson"), Some(Strategy::Backcursion));
    assert_eq!(suggest_similar_strategy("completely-different"), None);
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("abc", "abc"), 0);
    assert_eq!(edit_distance("ARRAY", "ARAY"), 1);
    assert_eq!(edit_distance("LEAVES", "LEAFS"), 2);
}

#[test]
fn test_strategy_lines_mark_default_and_selected() {
    let lines = strategy_lines(Strategy::Array);
    assert_eq!(
        lines,
        vec![
            "  LEAVES (default)".to_string(),
            "  BACKCURSION".to_string(),
            "* ARRAY".to_string(),
        ]
    );
}

#[test]
fn test_render_compact_and_missing() {
    let resolved = Resolved::Document(json!({"k_a": "v_a"}));
    assert_eq!(get::render(&resolved, true).unwrap(), r#"{"k_a":"v_a"}"#);
    assert!(get::render(&resolved, false).unwrap().contains('\n'));

    assert_eq!(get::render(&Resolved::Missing, true).unwrap(), "null");
}

#[tokio::test]
async fn test_get_command_resolves_root() {
    let temp_dir = create_temp_root();
    let ctx = CommandContext::new(temp_dir.path().to_str().unwrap(), "LEAVES").unwrap();

    let resolved = ctx.conf.get(&[]).await.unwrap();
    assert_eq!(resolved, Resolved::Document(json!({"k_a": "v_a"})));

    assert!(get::execute(Vec::new(), true, &ctx).await.is_ok());
    assert!(get::execute(vec!["missing".to_string()], false, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_dispatch_get_reports_parse_failures() {
    let temp_dir = create_temp_root();
    std::fs::write(temp_dir.path().join("broken.json"), "{").unwrap();
    let ctx = CommandContext::new(temp_dir.path().to_str().unwrap(), "LEAVES").unwrap();

    let command = Commands::Get {
        segments: Vec::new(),
        compact: true,
    };
    let err = dispatch_command(command, &ctx).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfdError>(),
        Some(ConfdError::FragmentParse { .. })
    ));
}
