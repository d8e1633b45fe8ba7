use std::fs;

use clap::Parser;
use yip_cli::{compile_all, run, Cli};

const MINIMAL: &str = r#"<layout size="320,480" portrait="true"><button id="ok" text="OK"/></layout>"#;

#[test]
fn test_run_writes_both_platforms() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("main.xml");
    fs::write(&input, MINIMAL).unwrap();
    let out = dir.path().join("out");

    let args = Cli::parse_from(["yip", "--out", out.to_str().unwrap(), input.to_str().unwrap()]);
    run(&args).unwrap();

    assert!(out.join("ios/MainViewController.h").is_file());
    assert!(out.join("ios/MainViewController.m").is_file());
    assert!(out.join("android/src/com/example/app/MainLayout.java").is_file());
    let strings = fs::read_to_string(out.join("android/res/values/strings.xml")).unwrap();
    assert!(strings.contains("<string name=\"main_ok\">OK</string>"));
}

#[test]
fn test_run_applies_config_and_platform() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("main.xml");
    fs::write(&input, MINIMAL).unwrap();
    let config = dir.path().join("yip.toml");
    fs::write(&config, "android_package = \"org.demo\"\n\n[translations]\n\"OK\" = \"Los\"\n").unwrap();
    let out = dir.path().join("out");

    let args = Cli::parse_from([
        "yip",
        "--platform",
        "android",
        "--config",
        config.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    run(&args).unwrap();

    assert!(!out.join("ios").exists());
    assert!(out.join("android/src/org/demo/MainLayout.java").is_file());
    let strings = fs::read_to_string(out.join("android/res/values/strings.xml")).unwrap();
    assert!(strings.contains("<string name=\"main_ok\">Los</string>"));
}

#[test]
fn test_compile_error_names_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.xml");
    let bad = dir.path().join("bad.xml");
    fs::write(&good, MINIMAL).unwrap();
    fs::write(&bad, "<layout size=\"320,480\" portrait=\"true\">\n<slider/>\n</layout>").unwrap();

    let err = compile_all(&[good, bad.clone()]).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.starts_with(&format!("{}(2): ", bad.display())), "{}", message);
}

#[test]
fn test_compile_all_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<_> = ["c", "a", "b"]
        .iter()
        .map(|name| {
            let path = dir.path().join(format!("{}.xml", name));
            fs::write(&path, MINIMAL).unwrap();
            path
        })
        .collect();

    let compilations = compile_all(&inputs).unwrap();
    let names: Vec<_> = compilations.iter().map(|c| c.root().name().to_string()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.xml");
    let err = compile_all(&[missing.clone()]).unwrap_err();
    assert!(err.to_string().starts_with("Reading "));
}

#[test]
fn test_same_stem_inputs_fail_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut inputs = Vec::new();
    for sub in ["a", "b"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        let path = dir.path().join(sub).join("main.xml");
        fs::write(&path, MINIMAL).unwrap();
        inputs.push(path.to_str().unwrap().to_string());
    }
    let out = dir.path().join("out");

    let mut argv = vec!["yip".to_string(), "--out".to_string(), out.to_str().unwrap().to_string()];
    argv.extend(inputs);
    let err = run(&Cli::parse_from(argv)).unwrap_err();

    assert!(format!("{:#}", err).contains("generates class"), "{:#}", err);
    assert!(!out.exists());
}
