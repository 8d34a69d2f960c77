use assert_cmd::Command;

fn generator() -> Command {
    let mut cmd = Command::cargo_bin("meds-compose-gen").unwrap();
    cmd.env_remove("MEDS_EMULATOR_PROFILE");
    cmd
}

fn run_default() -> Vec<u8> {
    let output = generator().output().unwrap();
    assert!(output.status.success(), "generator exited with {:?}", output.status);
    output.stdout
}

#[test]
fn default_invocation_emits_two_hundred_services() {
    let stdout = run_default();
    let document: serde_yaml::Value = serde_yaml::from_slice(&stdout).unwrap();

    assert_eq!(document["version"], serde_yaml::Value::from("3.7"));
    let networks = document["networks"].as_mapping().unwrap();
    assert_eq!(networks.len(), 1);
    assert!(document["networks"]["meds"].as_mapping().unwrap().is_empty());

    let services = document["services"].as_mapping().unwrap();
    assert_eq!(services.len(), 200);

    let chassis = &document["services"]["x1000c3b0"];
    assert_eq!(chassis["hostname"], serde_yaml::Value::from("x1000c3b0"));
    let env: Vec<&str> = chassis["environment"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(env.contains(&"MOCKUPFOLDER=CMM"));
    assert!(env.contains(&"XNAME=x1000c3b0"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    assert_eq!(run_default(), run_default());
}

#[test]
fn output_flag_writes_file_instead_of_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docker-compose.yml");

    let output = generator()
        .args(["--output", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, run_default());
}

#[test]
fn multiple_cabinets_and_mac_prefix() {
    let output = generator()
        .args([
            "--cabinet",
            "1000",
            "--cabinet",
            "x1001",
            "--mac-prefix",
            "02",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(document["services"].as_mapping().unwrap().len(), 400);
    assert_eq!(
        document["services"]["x1001c0s2b1"]["mac_address"],
        serde_yaml::Value::from("02:03:E9:00:32:10")
    );
    for (_, service) in document["services"].as_mapping().unwrap() {
        let mac = service["mac_address"].as_str().unwrap();
        assert_eq!(mac.split(':').count(), 6, "malformed mac {mac}");
    }
}

#[test]
fn repeated_cabinet_fails_with_nonzero_exit() {
    generator()
        .args(["--cabinet", "1000", "--cabinet", "x1000"])
        .assert()
        .failure();
}

#[test]
fn unreadable_profile_fails_with_nonzero_exit() {
    generator()
        .args(["--profile", "/nonexistent/meds-profile.yaml"])
        .assert()
        .failure();
}

#[test]
fn logs_one_event_per_cabinet_on_stderr() {
    let output = generator()
        .env("RUST_LOG", "info")
        .args(["--cabinet", "1000", "--cabinet", "1001"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("compose.cabinet").count(), 2, "{stderr}");
    assert!(stderr.contains("x1000") && stderr.contains("x1001"), "{stderr}");
    assert!(!String::from_utf8(output.stdout).unwrap().contains("compose.cabinet"));
}
