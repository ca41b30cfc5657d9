// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn help_documents_exit_codes() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("--unpickle-tickets"));
}

#[test]
fn conflicting_modes_exit_2() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .args(["--unpickle-tickets", "--subdomain", "acme"])
        .assert()
        .code(2);
}

#[test]
fn pickle_and_unpickle_conflict() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .args(["--unpickle-tickets", "--pickle-tickets"])
        .assert()
        .code(2);
}

#[test]
fn page_size_out_of_range_exit_2() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .args(["--unpickle-tickets", "--page-size", "101"])
        .assert()
        .code(2);
}

#[test]
fn live_without_credentials_names_missing_setting() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("subdomain is required"));
}

#[test]
fn live_without_password_fails_before_network() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .args(["--subdomain", "acme", "--email", "agent@acme.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("password is required"));
}

#[test]
fn invalid_subdomain_exits_3_without_network() {
    let temp = TempDir::new().unwrap();
    ztv(&temp)
        .args(["--subdomain", "not a name", "--email", "a@acme.com"])
        .args(["--password", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn invalid_config_file_exits_1() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("bad.toml"), "page_size = \"many\"\n").unwrap();
    ztv(&temp)
        .args(["--unpickle-tickets", "-c", "bad.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}
