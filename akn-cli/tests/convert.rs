use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LIST_AKN: &str = "<list><indent><num>-</num><content><mp>one</mp></content></indent></list>";
const LIST_HTML: &str = "<ul data-akn-name=\"aknUnorderedList\"><li data-akn-num=\"-\">one</li></ul>";

#[test]
fn convert_akn_to_html_on_stdout() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.xml");
    fs::write(&input_path, LIST_AKN).unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("html");

    cmd.assert().success().stdout(LIST_HTML);
}

#[test]
fn convert_is_the_default_command() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.xml");
    fs::write(&input_path, LIST_AKN).unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("html");

    cmd.assert().success().stdout(LIST_HTML);
}

#[test]
fn convert_html_to_akn_into_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("edited.html");
    let output_path = dir.path().join("out.xml");
    fs::write(&input_path, LIST_HTML).unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("akn")
        .arg("-o")
        .arg(output_path.as_os_str());

    cmd.assert().success().stdout("");
    assert_eq!(fs::read_to_string(&output_path).unwrap(), LIST_AKN);
}

#[test]
fn explicit_from_overrides_extension() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("edited.xml");
    fs::write(&input_path, LIST_HTML).unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--from")
        .arg("html")
        .arg("--to")
        .arg("akn");

    cmd.assert().success().stdout(LIST_AKN);
}

#[test]
fn unknown_extension_falls_back_to_configured_format() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.txt");
    fs::write(&input_path, LIST_HTML).unwrap();

    let config_path = dir.path().join("akn.toml");
    fs::write(
        &config_path,
        r#"[convert]
default_from = "html"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("akn")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert().success().stdout(LIST_AKN);
}

#[test]
fn unknown_target_format_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.xml");
    fs::write(&input_path, LIST_AKN).unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("pdf");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Format 'pdf' not found"));
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("missing.xml");

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn malformed_akn_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("broken.xml");
    fs::write(&input_path, "<list><indent></list>").unwrap();

    let mut cmd = cargo_bin_cmd!("akn");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
