//! End-to-end tests of the `pycdas` binary.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn pycdas(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pycdas"))
        .args(args)
        .output()
        .expect("failed to run pycdas")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn missing_input_exits_1() {
    let output = pycdas(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).trim_end(), "No input file specified");
}

#[test]
fn raw_mode_without_version_fails_before_loading() {
    // The input does not exist; the usage error must come first.
    let output = pycdas(&["-c", "/nonexistent/code.bin"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim_end(),
        "Opening raw code objects requires a version to be specified"
    );
}

#[test]
fn malformed_version_exits_1() {
    for bad in ["3", "3.", "3.x", "3.11.2"] {
        let output = pycdas(&["-c", "-v", bad, "/nonexistent/code.bin"]);
        assert_eq!(output.status.code(), Some(1), "version {bad}");
        assert_eq!(
            stderr(&output).trim_end(),
            "Unable to parse version string (use the format x.y)"
        );
    }
}

#[test]
fn unknown_flag_is_rejected() {
    let output = pycdas(&["--bogus", "mod.pyc"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).trim_end(), "Error: Unrecognized argument --bogus");
}

#[test]
fn help_exits_0_and_leaves_the_sink_alone() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let output = pycdas(&["-o", path_str(&out), "--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Usage: pycdas [options] input.pyc"));
    assert!(fs::read(&out).map(|b| b.is_empty()).unwrap_or(true));
}

#[test]
fn help_before_a_bad_flag_still_exits_0() {
    let output = pycdas(&["--help", "--bogus"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Usage: pycdas [options] input.pyc"));

    let output = pycdas(&["--bogus", "--help"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).trim_end(), "Error: Unrecognized argument --bogus");
}

#[test]
fn last_positional_input_wins() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("second.pyc");
    fs::write(&input, common::pyc_311(&common::simple_311())).unwrap();

    let output = pycdas(&["/nonexistent/first.pyc", path_str(&input)]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("second.pyc (Python 3.11)\n"));
}

#[test]
fn disassembles_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mod.pyc");
    let out = dir.path().join("out.txt");
    fs::write(&input, common::pyc_311(&common::simple_311())).unwrap();

    let output = pycdas(&[path_str(&input), "-o", path_str(&out)]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(output.stdout.is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("mod.pyc (Python 3.11)\n[Code]\n"));
    assert!(text.contains(&common::op_line(2, 6, "RETURN_VALUE", None)));
}

#[test]
fn writes_to_stdout_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mod.pyc");
    fs::write(&input, common::pyc_311(&common::simple_311())).unwrap();

    let output = pycdas(&["--show-caches", path_str(&input)]);
    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains(&common::op_line(2, 4, "CACHE", None)));
}

#[test]
fn raw_code_object_with_explicit_version() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("code.bin");
    fs::write(&input, common::raw_311(&common::simple_311())).unwrap();

    let output = pycdas(&["-c", "-v", "3.11", path_str(&input)]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("code.bin (Python 3.11)\n"));
}

#[test]
fn unrecognised_module_reports_could_not_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("junk.pyc");
    fs::write(&input, b"\x01\x02\x03\x04payload").unwrap();

    let output = pycdas(&[path_str(&input)]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim_end(),
        format!("Could not load file {}", input.display())
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn load_error_names_the_input() {
    let output = pycdas(&["/nonexistent/dir/mod.pyc"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error disassembling /nonexistent/dir/mod.pyc: "));
}

#[test]
fn render_failure_flushes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.pyc");
    let out = dir.path().join("out.txt");
    fs::write(&input, common::pyc_311(&common::bad_const_311())).unwrap();

    let output = pycdas(&["-o", path_str(&out), path_str(&input)]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim_end(),
        format!(
            "Error disassembling {}: constant index 5 out of range at offset 2 (1 available)",
            input.display()
        )
    );

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("bad.pyc (Python 3.11)\n"));
    assert!(text.ends_with(&common::op_line(2, 0, "RESUME", Some((0, "")))));
}

#[test]
fn unopenable_output_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mod.pyc");
    fs::write(&input, common::pyc_311(&common::simple_311())).unwrap();
    let out = dir.path().join("missing").join("out.txt");

    let output = pycdas(&["-o", path_str(&out), path_str(&input)]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim_end(),
        format!("Error opening file '{}' for writing", out.display())
    );
}

#[test]
fn option_without_value_exits_1() {
    let output = pycdas(&["mod.pyc", "-o"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).trim_end(), "Option '-o' requires a filename");
}
