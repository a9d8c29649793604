//! CLI tests for the routemu shell.
//!
//! Commands are passed with `-c`, so no terminal is needed.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn routemu() -> Command {
    Command::new(env!("CARGO_BIN_EXE_routemu"))
}

mod global_flags {
    use super::*;

    #[test]
    fn test_help() {
        routemu()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("VyOS style router emulator shell"))
            .stdout(predicate::str::contains("--session"))
            .stdout(predicate::str::contains("--no-history"));
    }

    #[test]
    fn test_version() {
        routemu()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("routemu"));
    }

    #[test]
    fn test_session_conflicts_with_interface() {
        routemu()
            .args(["--session", "r1.yaml", "--interface", "eth0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be used with"));
    }

    #[test]
    fn test_duplicate_interfaces() {
        routemu()
            .args(["-i", "eth0", "-i", "eth0", "-c", "show interfaces"])
            .assert()
            .failure();
    }
}

mod scripted {
    use super::*;

    #[test]
    fn test_static_route() {
        routemu()
            .args([
                "--name",
                "R1",
                "-c",
                "configure",
                "-c",
                "set interfaces ethernet eth0 address 10.0.0.1/24",
                "-c",
                "set protocols static route 0.0.0.0/0 next-hop 10.0.0.254",
                "-c",
                "commit",
                "-c",
                "exit",
                "-c",
                "show ip route",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "C>* 10.0.0.0/24 is directly connected, eth0",
            ))
            .stdout(predicate::str::contains("S>* 0.0.0.0/0 [1] via 10.0.0.254, eth0"));
    }

    #[test]
    fn test_custom_interfaces() {
        routemu()
            .args(["-i", "eth0", "-i", "eth1", "-i", "lo", "-c", "show interfaces"])
            .assert()
            .success()
            .stdout(predicate::str::contains("eth1"));
    }

    #[test]
    fn test_unrecognized_command() {
        routemu()
            .args(["-c", "reboot"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Command not recognized or not supported",
            ));
    }

    #[test]
    fn test_exit_stops_the_script() {
        routemu()
            .args(["-c", "exit", "-c", "configure"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

mod files {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("routemu-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_configuration() {
        let path = temp_file(
            "load.conf",
            "set interfaces ethernet eth0 address 192.168.1.1/24\n",
        );
        routemu()
            .arg("--load")
            .arg(&path)
            .args(["-c", "show configuration commands"])
            .assert()
            .success()
            .stdout("set interfaces ethernet eth0 address 192.168.1.1/24\n");
    }

    #[test]
    fn test_load_failure() {
        let path = temp_file(
            "bad.conf",
            "set interfaces ethernet eth7 address 192.168.1.1/24\n",
        );
        routemu()
            .arg("--load")
            .arg(&path)
            .args(["-c", "show configuration"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("eth7"));
    }

    #[test]
    fn test_session_file() {
        let path = temp_file(
            "session.yaml",
            "name: edge\ninterfaces:\n  - name: eth0\n  - name: eth5\n    description: uplink\n",
        );
        routemu()
            .arg("--session")
            .arg(&path)
            .args(["-c", "show interfaces"])
            .assert()
            .success()
            .stdout(predicate::str::contains("eth5"))
            .stdout(predicate::str::contains("uplink"));
    }
}
