use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "maze-chase"])
        .status()
        .expect("failed to invoke cargo check for maze-chase CLI binary");

    assert!(status.success(), "cargo check --bin maze-chase should succeed");
}

#[test]
fn cli_runs_built_in_arena() {
    let output = Command::new(env!("CARGO_BIN_EXE_maze-chase"))
        .args(["--ticks", "50", "--seed", "7", "--input", "1:left,20:up"])
        .output()
        .expect("failed to run maze-chase");

    assert!(output.status.success(), "maze-chase exited with an error");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ticks:"), "missing summary in {stdout}");
    assert!(stdout.contains("Flanker"), "missing pursuer line in {stdout}");
}
