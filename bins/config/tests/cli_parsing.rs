//! CLI tests for routemu-config.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn routemu_config() -> Command {
    Command::new(env!("CARGO_BIN_EXE_routemu-config"))
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("routemu-config-{}-{}", std::process::id(), name));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

const FLAT: &str = "\
set interfaces ethernet eth0 address 10.0.0.1/24
set protocols static route 0.0.0.0/0 next-hop 10.0.0.254
";

mod global_flags {
    use super::*;

    #[test]
    fn test_help() {
        routemu_config()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Router configuration text utility"))
            .stdout(predicate::str::contains("check"))
            .stdout(predicate::str::contains("convert"));
    }

    #[test]
    fn test_invalid_subcommand() {
        routemu_config()
            .arg("capture")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn test_convert_requires_target() {
        routemu_config()
            .args(["convert", "router.conf"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--to"));
    }
}

mod check {
    use super::*;

    #[test]
    fn test_valid() {
        let path = temp_file("valid.conf", FLAT);
        routemu_config()
            .arg("check")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("OK (2 statements)"));
    }

    #[test]
    fn test_unknown_interface() {
        let path = temp_file("unknown.conf", "set interfaces ethernet eth3 disable\n");
        routemu_config()
            .arg("check")
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("eth3"));

        routemu_config()
            .args(["-i", "eth3", "check"])
            .arg(&path)
            .assert()
            .success();
    }

    #[test]
    fn test_missing_file() {
        routemu_config()
            .args(["check", "/nonexistent/routemu.conf"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to read"));
    }
}

mod convert {
    use super::*;

    #[test]
    fn test_to_hierarchical() {
        let path = temp_file("convert.conf", FLAT);
        routemu_config()
            .arg("convert")
            .arg(&path)
            .args(["--to", "hierarchical"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("interfaces {\n"))
            .stdout(predicate::str::contains("next-hop 10.0.0.254"));
    }

    #[test]
    fn test_to_flat() {
        let path = temp_file("convert-flat.conf", FLAT);
        routemu_config()
            .arg("convert")
            .arg(&path)
            .args(["--to", "flat"])
            .assert()
            .success()
            .stdout(FLAT);
    }
}

mod routes {
    use super::*;

    #[test]
    fn test_text() {
        let path = temp_file("routes.conf", FLAT);
        routemu_config()
            .arg("routes")
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("S>* 0.0.0.0/0 [1] via 10.0.0.254, eth0"));
    }

    #[test]
    fn test_json() {
        let path = temp_file("routes-json.conf", FLAT);
        routemu_config()
            .arg("routes")
            .arg(&path)
            .arg("--json")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"gateway\":\"10.0.0.254\""));
    }
}

mod example {
    use super::*;

    #[test]
    fn test_default_is_hierarchical() {
        routemu_config()
            .arg("example")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("interfaces {\n"));
    }

    #[test]
    fn test_flat() {
        routemu_config()
            .args(["example", "--format", "flat"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "set protocols static route 0.0.0.0/0 next-hop 203.0.113.1\n",
            ));
    }
}
