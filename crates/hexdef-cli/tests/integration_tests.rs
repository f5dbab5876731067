//! Integration tests for the hexdef binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEX_ENV: [&str; 12] = [
    "SCHEMAS_DIR",
    "MW_NAME",
    "DB",
    "DATAGRAM_DIR_PATH",
    "DATAGRAM_SAVE_DIR",
    "NEW_DATAGRAM_TARGET_NAME",
    "PROJECT_NAME",
    "DATAGRAM",
    "DATAGRAM_DESCRIPTION",
    "PROGRAM_DATAGRAM_DESCRIPTION",
    "RUST_LOG",
    "HEXDEF_SCAFFOLD__DEFAULT_KIND",
];

const TEMPLATE: &str = r#"{
  "name": "white",
  "description": "white component",
  "structure": [
    { "type": "directory", "path": "src/${PROJECT_NAME}/domain/model" },
    { "type": "file", "path": "src/${PROJECT_NAME}/main.cpp", "content": "// ${PROJECT_NAME} db=${DB}" }
  ]
}"#;

const ORDER_H: &str = r#"#pragma once
#include <string>

namespace shop::domain::model {
class Order {
private:
    long orderId;
    std::string name;
public:
    long getOrderId() const;
};
}
"#;

/// The binary with a private HOME and no inherited hexdef settings.
fn hexdef(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hexdef").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1");
    for key in HEX_ENV {
        cmd.env_remove(key);
    }
    cmd
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn component_with_model(root: &Path) {
    write(
        &root.join("dark_src/src/shop/domain/model/Order.h"),
        ORDER_H,
    );
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hexdef"))
        .stdout(predicate::str::contains("datagrams"))
        .stdout(predicate::str::contains("regenerate"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hexdef"));
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_from_template_file() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("white.json");
    write(&template, TEMPLATE);

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args(["new", "shop", "--template", "white.json", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop"));

    let root = tmp.path().join("shop");
    assert!(root.join("src/shop/domain/model").is_dir());
    assert_eq!(
        fs::read_to_string(root.join("src/shop/main.cpp")).unwrap(),
        "// shop db=postgres"
    );
}

#[test]
fn new_applies_var_overrides_and_location() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("white.json");
    write(&template, TEMPLATE);
    let location = tmp.path().join("work");
    fs::create_dir_all(&location).unwrap();

    hexdef(tmp.path())
        .args(["new", "shop", "-y", "--var", "DB=orders"])
        .arg("--template")
        .arg(&template)
        .arg("--location")
        .arg(&location)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(location.join("shop/src/shop/main.cpp")).unwrap(),
        "// shop db=orders"
    );
}

#[test]
fn new_with_kind_reads_schemas_dir() {
    let tmp = TempDir::new().unwrap();
    let schemas = tmp.path().join("schemas");
    write(&schemas.join("white.json"), TEMPLATE);

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .env("SCHEMAS_DIR", &schemas)
        .args(["new", "radar", "--kind", "white", "-y"])
        .assert()
        .success();

    assert!(tmp.path().join("radar/src/radar/main.cpp").is_file());
}

#[test]
fn schemas_dir_flag_overrides_environment() {
    let tmp = TempDir::new().unwrap();
    let schemas = tmp.path().join("schemas");
    write(&schemas.join("dark.json"), TEMPLATE);

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .env("SCHEMAS_DIR", tmp.path().join("missing"))
        .arg("--schemas-dir")
        .arg(&schemas)
        .args(["new", "radar", "--kind", "dark", "-y"])
        .assert()
        .success();

    assert!(tmp.path().join("radar/src/radar/main.cpp").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("white.json"), TEMPLATE);

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args(["new", "shop", "--template", "white.json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/shop/main.cpp"));

    assert!(!tmp.path().join("shop").exists());
}

#[test]
fn new_all_creates_components_with_test_db() {
    let tmp = TempDir::new().unwrap();
    let schemas = tmp.path().join("schemas");
    for kind in ["white", "gray", "dark"] {
        write(&schemas.join(format!("{kind}.json")), TEMPLATE);
    }

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .env("SCHEMAS_DIR", &schemas)
        .args(["new", "radar", "--all", "-y"])
        .assert()
        .success();

    for kind in ["white", "gray", "dark"] {
        let main = tmp.path().join("radar").join(kind).join("src/radar/main.cpp");
        assert_eq!(fs::read_to_string(main).unwrap(), "// radar db=TEST_DB");
    }
}

#[test]
fn force_writes_into_existing_directory() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("white.json"), TEMPLATE);
    write(&tmp.path().join("shop/keep.txt"), "mine");

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args(["new", "shop", "--template", "white.json", "--force", "-y"])
        .assert()
        .success();

    assert!(tmp.path().join("shop/keep.txt").is_file());
    assert!(tmp.path().join("shop/src/shop/main.cpp").is_file());
}

#[test]
fn recreate_replaces_existing_directory() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("white.json"), TEMPLATE);
    write(&tmp.path().join("shop/stale.txt"), "old");

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args(["new", "shop", "--template", "white.json", "--recreate", "-y"])
        .assert()
        .success();

    assert!(!tmp.path().join("shop/stale.txt").exists());
    assert!(tmp.path().join("shop/src/shop/main.cpp").is_file());
}

// ── port / adapter ────────────────────────────────────────────────────────────

#[test]
fn port_add_then_adapter_add() {
    let tmp = TempDir::new().unwrap();
    component_with_model(tmp.path());

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args([
            "port", "add", "outgoing", "dark_src", "--model", "Order", "--methods", "save,findById",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("IOrderOutgoingPort.h"));

    let port = tmp
        .path()
        .join("dark_src/src/shop/domain/ports/outgoing/IOrderOutgoingPort.h");
    let source = fs::read_to_string(&port).unwrap();
    assert!(source.contains("findByOrderId(long orderId)"));
    assert!(source.contains("save(const model::Order& order)"));

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args([
            "adapter",
            "add",
            "out",
            "dark_src",
            "--port",
            "IOrderOutgoingPort.h",
            "--tech",
            "Kafka",
        ])
        .assert()
        .success();

    assert!(
        tmp.path()
            .join("dark_src/src/shop/adapters/outgoing/kafka/OrderKafkaOutgoingAdapter.h")
            .is_file()
    );
}

#[test]
fn port_methods_as_json() {
    let tmp = TempDir::new().unwrap();
    component_with_model(tmp.path());

    hexdef(tmp.path())
        .current_dir(tmp.path())
        .args([
            "--output-format",
            "json",
            "port",
            "methods",
            "incoming",
            "dark_src",
            "--model",
            "Order",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"getById\""))
        .stdout(predicate::str::contains("getByName"));
}

// ── datagrams ─────────────────────────────────────────────────────────────────

#[test]
fn datagrams_init_add_list_remove() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    fs::create_dir_all(proj.join(".project_root")).unwrap();
    fs::create_dir_all(proj.join("src/dark_src")).unwrap();

    hexdef(tmp.path())
        .current_dir(&proj)
        .args(["datagrams", "init"])
        .assert()
        .success();

    hexdef(tmp.path())
        .current_dir(&proj)
        .args(["datagrams", "add", "Position", "--pub"])
        .assert()
        .success();

    let registry = proj.join("src/dark_src/src/proj/adapters/common/Kafka/proj.xml");
    assert!(
        fs::read_to_string(&registry)
            .unwrap()
            .contains(r#"<datagram name="Position" type="pub"/>"#)
    );

    hexdef(tmp.path())
        .current_dir(&proj)
        .args(["datagrams", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Position"))
        .stdout(predicate::str::contains("pub"));

    hexdef(tmp.path())
        .current_dir(&proj)
        .args(["datagrams", "rm", "Position"])
        .assert()
        .success();

    assert!(!fs::read_to_string(&registry).unwrap().contains("Position"));
}

#[test]
fn datagrams_available_excludes_selected() {
    let tmp = TempDir::new().unwrap();
    let proj = tmp.path().join("proj");
    let registry_dir = proj.join("src/app/src/proj/adapters/common/Kafka");
    fs::create_dir_all(proj.join(".project_root")).unwrap();
    write(
        &registry_dir.join("proj.xml"),
        "<datagrams>\n  <datagram name=\"Track\" type=\"pubsub\"/>\n</datagrams>\n",
    );
    let schemas = tmp.path().join("datagrams");
    write(&schemas.join("Track.xml"), "<x/>");
    write(&schemas.join("Heading.xml"), "<x/>");

    hexdef(tmp.path())
        .current_dir(&proj)
        .env("DATAGRAM_DIR_PATH", &schemas)
        .args(["datagrams", "available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Heading"))
        .stdout(predicate::str::contains("Track").not());
}

// ── config / init ─────────────────────────────────────────────────────────────

#[test]
fn init_writes_config_and_get_reads_it() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("hexdef.toml");

    hexdef(tmp.path())
        .arg("-c")
        .arg(&cfg)
        .arg("init")
        .assert()
        .success();
    assert!(fs::read_to_string(&cfg).unwrap().contains("marker_depth = 15"));

    hexdef(tmp.path())
        .arg("-c")
        .arg(&cfg)
        .args(["config", "get", "search.marker_depth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn environment_overrides_config_values() {
    let tmp = TempDir::new().unwrap();
    hexdef(tmp.path())
        .env("HEXDEF_SEARCH__REGISTRY_DEPTH", "4")
        .args(["config", "get", "search.registry_depth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4"));
}
