//! Exit codes and suggestions for failing invocations.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hexdef(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hexdef").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("SCHEMAS_DIR")
        .env_remove("DATAGRAM_DIR_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn invalid_project_name_is_a_user_error() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["new", "bad name", "--kind", "white", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bad name"));
}

#[test]
fn malformed_var_is_rejected_by_the_parser() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["new", "shop", "--var", "NOVALUE"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn kind_without_schemas_dir_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["new", "shop", "--kind", "dark", "-y"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("SCHEMAS_DIR"));
}

#[test]
fn missing_template_is_not_found() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["new", "shop", "--template", "nope.json", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found"));
}

#[test]
fn existing_project_is_a_conflict() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("t.json"),
        r#"{"name":"t","structure":[{"type":"directory","path":"src"}]}"#,
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("shop")).unwrap();

    hexdef(tmp.path())
        .args(["new", "shop", "--template", "t.json", "-y"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn make_outside_a_project_is_not_found() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .arg("make")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(".project_root"));
}

#[test]
fn port_add_without_model_needs_an_argument() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["port", "add", "incoming", "--methods", "create"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn port_over_existing_file_is_a_conflict() {
    let tmp = TempDir::new().unwrap();
    let model_dir = tmp.path().join("white_src/src/shop/domain/model");
    fs::create_dir_all(&model_dir).unwrap();
    fs::write(
        model_dir.join("Order.h"),
        "class Order {\nprivate:\n    int id;\n};\n",
    )
    .unwrap();
    let ports = tmp.path().join("white_src/src/shop/domain/ports/incoming");
    fs::create_dir_all(&ports).unwrap();
    fs::write(ports.join("IOrderIncomingPort.hpp"), "// hand written").unwrap();

    hexdef(tmp.path())
        .args([
            "port", "add", "incoming", "white_src", "--model", "Order", "--methods", "create",
        ])
        .assert()
        .code(5);

    assert_eq!(
        fs::read_to_string(ports.join("IOrderIncomingPort.hpp")).unwrap(),
        "// hand written"
    );
}

#[test]
fn datagram_add_needs_a_flag() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".project_root")).unwrap();
    fs::create_dir_all(tmp.path().join("src/app/src/x/adapters/common/Kafka")).unwrap();

    hexdef(tmp.path())
        .args(["datagrams", "add", "Position"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--pub"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["config", "get", "nope.key"])
        .assert()
        .code(4);
}

#[test]
fn no_color_accepts_conventional_values() {
    let tmp = TempDir::new().unwrap();
    for value in ["1", "true", "yes"] {
        hexdef(tmp.path())
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success();
    }
}

#[test]
fn init_with_config_flag_creates_the_missing_file() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("nested/dir/hexdef.toml");

    hexdef(tmp.path())
        .arg("-c")
        .arg(&cfg)
        .arg("init")
        .assert()
        .success();

    assert!(cfg.is_file());
}
