use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path = std::env::temp_dir().join(format!(
            "stickyphrases_cli_{tag}_{}_{}",
            std::process::id(),
            ts
        ));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_stickyphrases(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stickyphrases"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run stickyphrases")
}

fn bundled_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root from crate dir")
        .join("stickyphrases-fonts/fonts/DejaVuSansMono.ttf")
}

#[test]
fn writes_text_elements_to_output_dir() {
    let dir = TestDir::new("text");
    fs::create_dir_all(dir.path.join("out")).expect("create output dir");

    let output = run_stickyphrases(
        &["hi", "there", "-w", "400,700", "-s", "10", "-o", "out"],
        &dir.path,
    );
    assert!(output.status.success(), "process failed: {output:?}");

    let svg_path = dir.path.join("out/stickyphrases.svg");
    let svg = fs::read_to_string(&svg_path).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert_eq!(svg.matches("<text").count(), 2, "svg: {svg}");
    assert!(svg.contains("x=\"14\""), "second word should start at 14: {svg}");
    assert!(svg.contains("font-family=\"CustomFont\""), "svg: {svg}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrote"), "expected write notice, got: {stderr}");
}

#[test]
fn mismatched_weights_warn_but_succeed() {
    let dir = TestDir::new("weights");
    let output = run_stickyphrases(&["a", "b", "-w", "400"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 words but 1 weights"), "stderr: {stderr}");

    let svg = fs::read_to_string(dir.path.join("stickyphrases.svg")).expect("read svg output");
    assert_eq!(svg.matches("font-weight=").count(), 2, "svg: {svg}");
    assert!(svg.contains("font-weight=\"undefined\""), "svg: {svg}");
}

#[test]
fn omitted_weights_leave_attribute_off() {
    let dir = TestDir::new("omit_weights");
    let output = run_stickyphrases(&["a", "b", "-w", "400", "--omit-missing-weights"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let svg = fs::read_to_string(dir.path.join("stickyphrases.svg")).expect("read svg output");
    assert_eq!(svg.matches("font-weight=").count(), 1, "svg: {svg}");
    assert!(!svg.contains("undefined"), "svg: {svg}");
}

#[test]
fn font_file_without_measure_keeps_estimate() {
    let dir = TestDir::new("font_file_estimate");
    let font = bundled_font();
    let font = font.to_str().expect("utf-8 path");

    let output = run_stickyphrases(
        &["hi", "there", "-w", "400,700", "-s", "10", "--font-file", font],
        &dir.path,
    );
    assert!(output.status.success(), "process failed: {output:?}");

    let svg = fs::read_to_string(dir.path.join("stickyphrases.svg")).expect("read svg output");
    assert!(svg.contains("x=\"14\""), "second word should use the estimate: {svg}");
}

#[test]
fn font_file_with_measure_uses_glyph_advances() {
    let dir = TestDir::new("font_file_measure");
    let font = bundled_font();
    let font = font.to_str().expect("utf-8 path");

    let output = run_stickyphrases(
        &["hi", "there", "-w", "400,700", "-s", "10", "--font-file", font, "--measure"],
        &dir.path,
    );
    assert!(output.status.success(), "process failed: {output:?}");

    let svg = fs::read_to_string(dir.path.join("stickyphrases.svg")).expect("read svg output");
    assert!(svg.contains("x=\"14.041\""), "second word should be measured: {svg}");
}

#[test]
fn outlines_mode_with_font_file_writes_paths() {
    let dir = TestDir::new("outlines");
    let font = bundled_font();
    let font = font.to_str().expect("utf-8 path");

    let output = run_stickyphrases(
        &["Sticky", "-w", "400", "--font-file", font, "--text-mode", "outlines"],
        &dir.path,
    );
    assert!(output.status.success(), "process failed: {output:?}");

    let svg = fs::read_to_string(dir.path.join("stickyphrases.svg")).expect("read svg output");
    assert!(svg.contains("<path"), "expected outline path: {svg}");
    assert!(!svg.contains("<text"), "text should be outlined: {svg}");
}

#[test]
fn unreadable_font_file_fails() {
    let dir = TestDir::new("bad_font");
    fs::write(dir.path.join("broken.ttf"), b"not a font").expect("write bogus font");

    let output = run_stickyphrases(&["hi", "--font-file", "broken.ttf"], &dir.path);
    assert!(!output.status.success(), "expected failure: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.ttf"), "stderr: {stderr}");
    assert!(!dir.path.join("stickyphrases.svg").exists());
}

#[test]
fn unknown_text_mode_is_rejected() {
    let dir = TestDir::new("mode");
    let output = run_stickyphrases(&["hi", "--text-mode", "paths"], &dir.path);
    assert!(!output.status.success(), "expected failure: {output:?}");
}
