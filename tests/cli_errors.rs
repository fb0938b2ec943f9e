mod common;

use common::TestContext;
use predicates::prelude::*;

#[test]
fn cyclic_inclusion_exits_with_error() {
    let ctx = TestContext::new();
    ctx.write("a/stack.yaml", "name: a\ncomponents:\n  b:\n    stack: ../b\n");
    ctx.write("b/stack.yaml", "name: b\ncomponents:\n  a:\n    stack: ../a\n");

    ctx.cli()
        .args(["plan", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Cyclic stack inclusion"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_stack_document() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["plan", "./nowhere"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Stack document './nowhere' not found"));
}

#[test]
fn missing_nested_stack_document() {
    let ctx = TestContext::new();
    ctx.write("site/stack.yaml", "name: site\ncomponents:\n  wp:\n    stack: ./wp\n");

    ctx.cli()
        .args(["plan", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stack document './wp' not found"));
}

#[test]
fn unknown_overlay_path() {
    let ctx = TestContext::new();
    ctx.write_site_stack();
    ctx.write("bad.yaml", "components:\n  wp.cache:\n    model: m1\n");

    ctx.cli()
        .args(["plan", "site", "--config", "bad.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown component path 'wp.cache'"));
}

#[test]
fn component_with_charm_and_stack_is_malformed() {
    let ctx = TestContext::new();
    ctx.write(
        "site/stack.yaml",
        "name: site\ncomponents:\n  x:\n    charm: ch:x\n    stack: ./y\n",
    );

    ctx.cli()
        .args(["plan", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed stack specification"));
}

#[test]
fn dangling_forward_names_chain() {
    let ctx = TestContext::new();
    ctx.write_site_stack();
    ctx.write(
        "site/wp/stack.yaml",
        "name: wp\ncomponents:\n  app:\n    charm: ch:wordpress\nprovides:\n  website:\n    forward: cache:http\n",
    );

    ctx.cli()
        .args(["plan", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dangling endpoint forward"));
}

#[test]
fn invalid_instance_name() {
    let ctx = TestContext::new();
    ctx.write_site_stack();

    ctx.cli()
        .args(["deploy", "site", "bad.name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid instance name 'bad.name'"));
}

#[test]
fn unknown_settings_key_is_reported() {
    let ctx = TestContext::new();
    ctx.write_site_stack();
    ctx.write_settings("colour = \"blue\"\n");

    ctx.cli().args(["plan", "site"]).assert().failure().stderr(predicate::str::contains("Error:"));
}

#[test]
fn component_name_colliding_with_nested_leaf_is_rejected() {
    let ctx = TestContext::new();
    ctx.write(
        "site/stack.yaml",
        "name: site\ncomponents:\n  a-s-b:\n    charm: ch:x\n  a:\n    stack: ./a\n",
    );
    ctx.write("site/a/stack.yaml", "name: a\ncomponents:\n  b:\n    charm: ch:y\n");

    ctx.cli()
        .args(["deploy", "site", "prod"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid component name 'a-s-b'"))
        .stdout(predicate::str::is_empty());
    assert!(!ctx.instances_file().exists());
}

#[test]
fn uppercase_instance_name_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_site_stack();

    ctx.cli()
        .args(["deploy", "site", "Prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid instance name 'Prod'"));
}
