//! Loading shader sources from disk into the editor

mod common;

use std::fs;

use common::{lines_of, press};
use kager::config::EditorConfig;
use kager::editable::{EditEngine, EditKey};
use kager::loader::load_file;
use kager::syntax::{highlight_line, is_uniform_declaration, KEYWORD_COLOR, NAME_COLOR};
use tempfile::TempDir;

const SHADER: &str = "package main\n\nvar Time float\nvar Cursor vec2\n\nfunc Fragment(position vec4, texCoord vec2, color vec4) vec4 {\n\treturn vec4(1)\n}\n";

#[test]
fn test_load_expands_tabs_and_keeps_empty_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shader.go");
    fs::write(&path, SHADER).unwrap();

    let buffer = load_file(&path, 8).unwrap();

    // Trailing newline yields a final empty line
    assert_eq!(buffer.line_count(), 9);
    assert_eq!(buffer.line_at(1).unwrap(), "");
    assert_eq!(buffer.line_at(6).unwrap(), "        return vec4(1)");
}

#[test]
fn test_load_strips_crlf() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("windows.go");
    fs::write(&path, "package main\r\nvar Time float\r\n").unwrap();

    let buffer = load_file(&path, 8).unwrap();
    assert_eq!(buffer.lines(), vec!["package main", "var Time float", ""]);
}

#[test]
fn test_missing_file_error_names_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.go");

    let err = load_file(&path, 8).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.go"));
}

#[test]
fn test_loaded_file_is_editable_with_configured_intervals() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shader.go");
    fs::write(&path, SHADER).unwrap();

    let config = EditorConfig {
        navigation_repeat_ticks: 2,
        tab_width: 4,
        ..EditorConfig::default()
    };
    let buffer = load_file(&path, config.tab_width).unwrap();
    let mut engine = EditEngine::new(buffer).with_intervals(config.repeat_intervals());

    press(&mut engine, EditKey::Down);
    assert_eq!(engine.repeat_counter(), 2);
    assert_eq!(lines_of(&engine)[6], "    return vec4(1) ");
}

#[test]
fn test_uniforms_in_loaded_file_are_highlighted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shader.go");
    fs::write(&path, SHADER).unwrap();

    let lines = load_file(&path, 8).unwrap().lines();
    let uniforms: Vec<&String> = lines
        .iter()
        .filter(|line| is_uniform_declaration(line))
        .collect();
    assert_eq!(uniforms, vec!["var Time float", "var Cursor vec2"]);

    let segments = highlight_line(&lines[3]);
    assert_eq!(segments[0].color, KEYWORD_COLOR);
    assert_eq!(segments[1].text, "Cursor");
    assert_eq!(segments[1].color, NAME_COLOR);

    // Function signatures are not declarations
    assert_eq!(highlight_line(&lines[5]).len(), 1);
}
