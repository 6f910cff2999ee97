use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, api_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "api_url: {api_url}\napi_key: test-key\napi_user_email: tester@example.com\n"
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn bcc() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bcc"));
    cmd.env_remove("BCC_CONFIG")
        .env_remove("BCC_DEBUG")
        .env_remove("BCC_NO_CACHE");
    cmd
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://acme.basecamphq.com");

    let assert = bcc()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("https://acme.basecamphq.com"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_without_config_suggests_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("missing.yaml");

    let assert = bcc()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("bcc init"));

    Ok(())
}

#[test]
fn cache_path_prints_directory_next_to_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://acme.basecamphq.com");

    let assert = bcc()
        .arg("cache")
        .arg("path")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), temp.path().join("cache").to_string_lossy());

    Ok(())
}

#[test]
fn get_fetches_once_then_replays_from_cache() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body("<projects><project><id>1</id></project></projects>")
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    for _ in 0..2 {
        let assert = bcc()
            .arg("get")
            .arg("projects")
            .arg("--config")
            .arg(&config_path)
            .assert()
            .success();
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
        assert!(stdout.contains("<projects>"));
    }

    mock.assert();
    assert!(temp.path().join("cache/bc-api/projects.xml").is_file());

    Ok(())
}

#[test]
fn get_respects_no_cache_flag() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body("<projects/>")
        .expect(2)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    for _ in 0..2 {
        bcc()
            .arg("get")
            .arg("projects")
            .arg("--no-cache")
            .arg("--config")
            .arg(&config_path)
            .assert()
            .success();
    }

    mock.assert();
    assert!(!temp.path().join("cache/bc-api/projects.xml").exists());

    Ok(())
}

#[test]
fn get_reports_missing_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/nope.xml")
        .with_status(404)
        .with_body("<html>not here</html>")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = bcc()
        .arg("get")
        .arg("nope")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("404"));

    Ok(())
}

#[test]
fn search_lists_matching_records() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body(
            "<projects>\
             <project><id>11</id><name>Alpha Launch</name></project>\
             <project><id>12</id><name>Beta Cleanup</name></project>\
             </projects>",
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = bcc()
        .arg("search")
        .arg("projects")
        .arg("Alpha")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("(11) Alpha Launch"));
    assert!(!stdout.contains("Beta Cleanup"));
    assert!(stdout.contains("Total Results: 1"));

    Ok(())
}

#[test]
fn search_rejects_single_quotes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://acme.basecamphq.com");

    bcc()
        .arg("search")
        .arg("projects")
        .arg("it's broken")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("single quotes"));

    Ok(())
}

#[test]
fn xpath_shows_selected_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body(
            "<projects>\
             <project><id>21</id><name>Gamma</name><status>active</status></project>\
             </projects>",
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = bcc()
        .arg("xpath")
        .arg("projects")
        .arg("//project")
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("(21) Gamma"));
    assert!(stdout.contains(" -- status: active"));
    assert!(!stdout.contains(" -- name:"));

    Ok(())
}

#[test]
fn xpath_false_selector_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body(
            "<projects>\
             <project><id>31</id><name>Quiet</name></project>\
             </projects>",
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    bcc()
        .arg("xpath")
        .arg("projects")
        .arg("//project")
        .arg("false")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn xpath_field_list_echoes_in_request_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body(
            "<projects>\
             <project><id>41</id><name>Delta</name><status>active</status></project>\
             </projects>",
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = bcc()
        .arg("xpath")
        .arg("projects")
        .arg("//project")
        .arg("status,owner,name")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let field_lines: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with(" -- "))
        .collect();
    // One line per requested field, in request order, empty when absent
    assert_eq!(
        field_lines,
        vec![" -- status: active", " -- owner: ", " -- name: Delta"]
    );

    Ok(())
}

#[test]
fn browse_rejects_unknown_record_type() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://acme.basecamphq.com");

    bcc()
        .arg("browse")
        .arg("7")
        .arg("mystery-widget")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mystery-widget"));

    Ok(())
}

#[test]
fn cache_clear_removes_cached_responses() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/projects.xml")
        .with_status(200)
        .with_body("<projects/>")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    bcc()
        .arg("get")
        .arg("projects")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    assert!(temp.path().join("cache/bc-api/projects.xml").is_file());

    bcc()
        .arg("cache")
        .arg("clear")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    assert!(!temp.path().join("cache/bc-api").exists());

    Ok(())
}
