//! CLI Smoke Tests
//!
//! Drive the `wordface` binary:
//! - `info`: grid, tables and formats
//! - `phrase`: words for a time, no font needed
//! - `build`: failure paths always, the full pipeline when a test font exists

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn wordface(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wordface"))
        .args(args)
        .output()
        .expect("Failed to execute wordface")
}

/// A fresh scratch directory
fn temp_dir() -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("wordface_test_{}_{}", id, n));
    fs::create_dir_all(&path).unwrap();
    path
}

fn test_font() -> Option<PathBuf> {
    let path = std::env::var_os("WORDFACE_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../testdata/fonts/Oxanium/static/Oxanium-Regular.ttf")
        });
    path.exists().then_some(path)
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_help() {
    let output = wordface(&["info", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Display the grid"));
}

#[test]
fn test_info_shows_everything_by_default() {
    let output = wordface(&["info"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ESKISTAFÜNF"));
    assert!(stdout.contains("ZEHNEUNKUHR"));
    assert!(stdout.contains("Spreadsheet"));
    assert!(stdout.contains("led_spacing"));
    assert!(stdout.contains("svg"));
}

#[test]
fn test_info_custom_grid() {
    let dir = temp_dir();
    let grid = dir.join("grid.txt");
    fs::write(&grid, "# tiny\nABC\nDEF\n").unwrap();

    let output = wordface(&["info", "--grid", "--grid-file", grid.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Grid (2x3"));
    assert!(!stdout.contains("Output Formats"));
    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Phrase Command Tests
// ============================================================================

#[test]
fn test_phrase_lists_words_and_cells() {
    let output = wordface(&["phrase", "--time", "10:27"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ES IST FÜNF VOR HALB ELF"));
    assert!(stdout.contains("Letter_05_06_E Letter_05_07_L Letter_05_08_F"));
    assert!(stdout.contains("Minute dots: 2"));
}

#[test]
fn test_phrase_rejects_bad_time() {
    let output = wordface(&["phrase", "--time", "24:00"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid time"));
}

#[test]
fn test_phrase_missing_word_on_custom_grid() {
    let dir = temp_dir();
    let grid = dir.join("grid.txt");
    fs::write(&grid, "ABCDEFGHIJK\n").unwrap();

    let output = wordface(&["phrase", "-t", "12:00", "--grid-file", grid.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"ES\" not found"));
    let _ = fs::remove_dir_all(dir);
}

// ============================================================================
// Build Command Tests
// ============================================================================

#[test]
fn test_build_requires_params() {
    let output = wordface(&["build"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--params"));
}

#[test]
fn test_build_missing_table_fails_before_output() {
    let dir = temp_dir();
    let params = dir.join("params.json");
    let out = dir.join("face.svg");
    fs::write(&params, r#"{"Other": {"led_spacing": 16.6, "x": true}}"#).unwrap();

    let output = wordface(&[
        "build",
        "--params",
        params.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parameter table 'Parameters' not found"));
    assert!(stderr.contains("Check its internal name"));
    assert!(!out.exists());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_build_missing_font_fails() {
    let dir = temp_dir();
    let params = dir.join("params.json");
    fs::write(&params, r#"{"Parameters": {"led_spacing": 16.6}}"#).unwrap();

    let output = wordface(&["build", "--params", params.to_str().unwrap(), "-q"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Oxanium-Regular.ttf"));
    assert!(!stderr.contains("Working directory"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_build_bad_time_fails_before_font() {
    let dir = temp_dir();
    let params = dir.join("params.json");
    fs::write(&params, r#"{"Parameters": {"led_spacing": 16.6, "engrave": true}}"#).unwrap();

    let output = wordface(&["build", "--params", params.to_str().unwrap(), "-t", "25:00"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid time"), "{stderr}");
    assert!(!stderr.contains("Oxanium-Regular.ttf"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_build_non_numeric_spacing_fails() {
    let dir = temp_dir();
    let params = dir.join("params.json");
    fs::write(&params, r#"{"parameters": {"led_spacing": "wide"}}"#).unwrap();

    let output = wordface(&["build", "--params", params.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a number"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_build_json_with_font() {
    let Some(font) = test_font() else {
        eprintln!("skipping: no test font");
        return;
    };
    let dir = temp_dir();
    let params = dir.join("params.json");
    let out = dir.join("face.json");
    fs::write(&params, r#"{"Parameters": {"led_spacing": "16.6 mm"}}"#).unwrap();

    let output = wordface(&[
        "build",
        "--params",
        params.to_str().unwrap(),
        "--font-file",
        font.to_str().unwrap(),
        "--time",
        "13:00",
        "--wiring",
        "linear",
        "-O",
        "json",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Done!"));

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["group"], "WordclockLetters");
    assert_eq!(json["wiring"], "linear");
    let glyphs = json["glyphs"].as_array().unwrap();
    assert_eq!(glyphs.len(), 110);
    let lit = glyphs.iter().filter(|g| g["lit"] == true).count();
    assert_eq!(lit, 11);
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_build_svg_to_stdout_with_font() {
    let Some(font) = test_font() else {
        eprintln!("skipping: no test font");
        return;
    };
    let dir = temp_dir();
    let params = dir.join("params.json");
    fs::write(&params, r#"{"Spreadsheet": {"led_spacing": 16.6}}"#).unwrap();

    let output = wordface(&[
        "build",
        "--params",
        params.to_str().unwrap(),
        "--font-file",
        font.to_str().unwrap(),
        "--plate",
        "300",
        "-q",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let svg = String::from_utf8_lossy(&output.stdout);
    assert!(svg.contains("<g id=\"WordclockLetters\">"));
    assert!(svg.contains("id=\"FrontPlate\""));
    assert_eq!(svg.matches("<path ").count(), 110);
    let _ = fs::remove_dir_all(dir);
}
