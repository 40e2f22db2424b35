use std::fs;
use std::process::{Command, Output};

fn cjk_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cjk_cli"))
        .args(args)
        .env_remove("CJK_RENDER_FONT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn cjk_cli")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn malformed_ratio_is_a_usage_error() {
    // Validation happens before the font is opened.
    let output = cjk_cli(&["字", "4", "--font", "/nonexistent.ttf", "--resolution-ratio", "2x1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("width:height"), "{}", stderr(&output));
    assert!(output.stdout.is_empty());
}

#[test]
fn non_positive_ratio_is_a_usage_error() {
    let output = cjk_cli(&["字", "4", "--font", "/nonexistent.ttf", "--resolution-ratio", "0:2"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn braille_and_ratio_are_exclusive() {
    let output = cjk_cli(&["字", "4", "--braille", "--resolution-ratio", "1:2"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot be used with"), "{}", stderr(&output));
}

#[test]
fn zero_size_is_rejected() {
    let output = cjk_cli(&["字", "0"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_font_is_fatal() {
    let output = cjk_cli(&["字", "4", "--font", "/nonexistent/font.ttf"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("failed to load font"), "{}", stderr(&output));
}

#[test]
fn unparseable_font_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("broken.ttf");
    fs::write(&font, b"definitely not a font").unwrap();

    let output = cjk_cli(&["字", "4", "--font", font.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot parse font"), "{}", stderr(&output));
}

#[test]
fn renders_with_discovered_font() {
    let Some(font) = cjk_render::discover_font() else {
        return;
    };
    let font = font.to_str().unwrap();

    let output = cjk_cli(&["日本", "6", "--font", font, "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let matrix: Vec<Vec<u8>> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matrix.len(), 6);
    assert!(matrix.iter().all(|row| row.len() == 12));

    let output = cjk_cli(&["字", "2", "--font", font, "--braille"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.chars().count(), 4);
        assert!(row.chars().all(|ch| ('\u{2800}'..='\u{28FF}').contains(&ch)));
    }
}

#[test]
fn writes_output_file() {
    let Some(font) = cjk_render::discover_font() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let output = cjk_cli(&[
        "中",
        "8",
        "--font",
        font.to_str().unwrap(),
        "--resolution-ratio",
        "2:1",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.len() == 16 && row.chars().all(|c| c == '0' || c == '1')));
}
