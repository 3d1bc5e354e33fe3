use image::Luma;
use qrcode::QrCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_qr-sheet"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

/// Write QR code PNGs for each code into a per-test fixture directory.
fn qr_fixtures(dir_name: &str, codes: &[&str]) -> Vec<PathBuf> {
    let dir = output_dir().join(dir_name);
    fs::create_dir_all(&dir).expect("Failed to create fixture directory");
    codes
        .iter()
        .map(|code| {
            let qr = QrCode::new(code.as_bytes()).expect("Failed to encode QR code");
            let image = qr.render::<Luma<u8>>().build();
            let path = dir.join(format!("{}.png", code));
            image.save(&path).expect("Failed to write fixture");
            path
        })
        .collect()
}

/// Count page objects (`/Type /Page`, not `/Type /Pages`) in raw PDF bytes.
fn pdf_page_count(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut rest = bytes;
    while let Some(pos) = rest.windows(5).position(|w| w == b"/Type") {
        rest = &rest[pos + 5..];
        let trimmed = rest
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map(|i| &rest[i..])
            .unwrap_or(&[]);
        if trimmed.starts_with(b"/Page") && !trimmed[5..].starts_with(b"s") {
            count += 1;
        }
    }
    count
}

fn path_args(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.to_string_lossy().into_owned()).collect()
}

#[test]
fn test_single_page_sheet() {
    setup();
    let output_file = "test-single-page.pdf";
    cleanup_file(output_file);
    let images = qr_fixtures("single", &["ABC123", "DEF456", "GHI789"]);

    let output = cargo_bin()
        .args(["-u", "https://example.com/register", "-o", &format!("tests/output/{}", output_file)])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Codes: 3"), "{}", stdout);
    assert!(stdout.contains("Pages: 1"), "{}", stdout);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");
    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let bytes = fs::read(&path).expect("Failed to read PDF");
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(pdf_page_count(&bytes), 1);
}

#[test]
fn test_twenty_one_codes_make_two_pages() {
    setup();
    let output_file = "test-two-pages.pdf";
    cleanup_file(output_file);
    let codes: Vec<String> = (1..=21).map(|i| format!("T{:02}", i)).collect();
    let code_refs: Vec<&str> = codes.iter().map(|s| s.as_str()).collect();
    let images = qr_fixtures("paging", &code_refs);

    let output = cargo_bin()
        .args(["--url", "https://example.com", "-o", &format!("tests/output/{}", output_file)])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Codes: 21"), "{}", stdout);
    assert!(stdout.contains("Pages: 2"), "{}", stdout);

    let bytes = fs::read(output_dir().join(output_file)).expect("Failed to read PDF");
    assert_eq!(pdf_page_count(&bytes), 2, "PDF should contain two page objects");
}

#[test]
fn test_no_images_is_an_error() {
    setup();
    let output_file = "test-no-images.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args(["-u", "https://example.com", "-o", &format!("tests/output/{}", output_file)])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed without images");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No images"), "{}", stderr);
    assert!(!output_dir().join(output_file).exists());
}

#[test]
fn test_unsupported_files_are_skipped() {
    setup();
    let output_file = "test-skip-unsupported.pdf";
    cleanup_file(output_file);
    let mut images = qr_fixtures("mixed", &["KEEP01"]);
    let notes = output_dir().join("mixed").join("notes.txt");
    fs::write(&notes, "not an image").expect("Failed to write notes");
    images.push(notes);

    let output = cargo_bin()
        .args(["-u", "https://example.com", "-o", &format!("tests/output/{}", output_file)])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Codes: 1"));
}

#[test]
fn test_only_unsupported_files_is_an_error() {
    setup();
    let dir = output_dir().join("unsupported");
    fs::create_dir_all(&dir).expect("Failed to create fixture directory");
    let gif = dir.join("code.gif");
    fs::write(&gif, "GIF89a").expect("Failed to write fixture");

    let output = cargo_bin()
        .args(["-o", "tests/output/should-not-exist.pdf"])
        .arg(&gif)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed with nothing accepted");
}

#[test]
fn test_list_applies_removals() {
    setup();
    let images = qr_fixtures("listing", &["AAA", "BBB", "CCC", "DDD"]);

    let output = cargo_bin()
        .args(["--list", "--remove", "2", "--remove", "2"])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. AAA (AAA.png)"), "{}", stdout);
    assert!(stdout.contains("2. DDD (DDD.png)"), "{}", stdout);
    assert!(!stdout.contains("BBB"));
    assert!(!stdout.contains("CCC"));
}

#[test]
fn test_remove_out_of_range_fails() {
    setup();
    let images = qr_fixtures("remove-range", &["ONLY"]);

    let output = cargo_bin()
        .args(["--remove", "3", "-o", "tests/output/should-not-exist.pdf"])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for bad position");
}

#[test]
fn test_corrupt_image_aborts_by_default() {
    setup();
    let output_file = "test-corrupt-abort.pdf";
    cleanup_file(output_file);
    let mut images = qr_fixtures("corrupt-abort", &["GOOD"]);
    let broken = output_dir().join("corrupt-abort").join("BROKEN.png");
    fs::write(&broken, "definitely not png").expect("Failed to write fixture");
    images.push(broken);

    let output = cargo_bin()
        .args(["-u", "https://example.com", "-o", &format!("tests/output/{}", output_file)])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for corrupt image");
    assert!(String::from_utf8_lossy(&output.stderr).contains("BROKEN.png"));
    assert!(!output_dir().join(output_file).exists(), "No partial output expected");
}

#[test]
fn test_corrupt_image_can_be_left_blank() {
    setup();
    let output_file = "test-corrupt-blank.pdf";
    cleanup_file(output_file);
    let mut images = qr_fixtures("corrupt-blank", &["GOOD"]);
    let broken = output_dir().join("corrupt-blank").join("BROKEN.png");
    fs::write(&broken, "definitely not png").expect("Failed to write fixture");
    images.push(broken);

    let output = cargo_bin()
        .args([
            "-u", "https://example.com",
            "--skip-undecodable",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Blank (undecodable): 1"), "{}", stdout);
    assert!(output_dir().join(output_file).exists());
}

#[test]
fn test_custom_layout() {
    setup();
    let output_file = "test-custom-layout.pdf";
    cleanup_file(output_file);
    let images = qr_fixtures("layout", &["L1", "L2", "L3", "L4", "L5", "L6", "L7"]);
    let layout = output_dir().join("layout").join("layout.json");
    fs::write(&layout, r#"{ "columns": 3, "rows": 2 }"#).expect("Failed to write layout");

    let output = cargo_bin()
        .args(["-u", "https://example.com", "-o", &format!("tests/output/{}", output_file)])
        .arg("--layout")
        .arg(&layout)
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Pages: 2"));
}

#[test]
fn test_degenerate_layout_fails() {
    setup();
    let images = qr_fixtures("degenerate", &["D1"]);
    let layout = output_dir().join("degenerate").join("layout.json");
    fs::write(&layout, r#"{ "rows": 30 }"#).expect("Failed to write layout");

    let output = cargo_bin()
        .args(["-o", "tests/output/should-not-exist.pdf", "--layout"])
        .arg(&layout)
        .args(path_args(&images))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for tiny cells");
}
