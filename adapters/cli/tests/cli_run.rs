use std::{fs, process::Command};

use hex_microbes_core::{Frame, OrganismKind};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hex-microbes"))
}

#[test]
fn streams_one_frame_per_tick_to_stdout() {
    let output = binary()
        .args([
            "--hex-diag",
            "24",
            "--amoeba-radius",
            "2",
            "--ciliate-offset",
            "3",
            "--ticks",
            "5",
            "--seed",
            "17",
        ])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch hex-microbes");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf8 frames");
    let frames: Vec<Frame> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("frame json"))
        .collect();
    assert_eq!(frames.len(), 6);
    for (tick, frame) in frames.iter().enumerate() {
        assert_eq!(frame.tick as usize, tick);
        assert_eq!(frame.hex_diag, 24);
        assert_eq!(frame.organisms.len(), 5);
        assert_eq!(frame.organisms[4].kind, OrganismKind::Amoeba);
        assert_eq!(frame.organisms[4].cells.len(), 19);
    }
}

#[test]
fn same_seed_writes_the_same_file() {
    let dir = std::env::temp_dir();
    let run = |name: &str| {
        let path = dir.join(format!("hex-microbes-{name}-{}.jsonl", std::process::id()));
        let status = binary()
            .args(["--hex-diag", "20", "--amoeba-radius", "2", "--ciliate-offset", "3"])
            .args(["--ticks", "8", "--seed", "5", "--output"])
            .arg(&path)
            .status()
            .expect("failed to launch hex-microbes");
        assert!(status.success());
        let contents = fs::read_to_string(&path).expect("read frames");
        fs::remove_file(&path).expect("remove frames");
        contents
    };

    let first = run("first");
    let second = run("second");
    assert_eq!(first.lines().count(), 9);
    assert_eq!(first, second);
}

#[test]
fn invalid_configuration_fails_fast() {
    let output = binary()
        .args(["--ticks", "1000"])
        .output()
        .expect("failed to launch hex-microbes");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ticks must be at most 999"), "{stderr}");
}
