extern crate reservoir;
extern crate serde_json;

use std::fs;
use std::path::PathBuf;

use reservoir::prelude::*;

#[test]
fn defaults() {
    let params = ResourceParams::default();
    assert!(params.mounts.is_empty());
    assert!(params.working_dir);

    assert_eq!(ResourceParams::from_json("{}").unwrap(), params);
    assert!(ResourceParams::from_json("[").is_err());
}

#[test]
fn from_json() {
    let json = fs::read_to_string("tests/assets/params.json").unwrap();
    let params = ResourceParams::from_json(&json).unwrap();

    assert!(!params.working_dir);
    assert_eq!(
        params.mounts,
        vec![MountParams {
            name: "res".into(),
            root: PathBuf::from("tests/assets"),
        }]
    );

    let mut expected = ResourceParams::default();
    expected.working_dir = false;
    expected.mount("res", "tests/assets");
    assert_eq!(params, expected);

    let text = serde_json::to_string(&params).unwrap();
    assert_eq!(ResourceParams::from_json(text).unwrap(), params);
}

#[test]
fn filesystem() {
    let mut params = ResourceParams::default();
    params.mount("res", "tests/assets");

    let fs = FileSystem::from_params(&params).unwrap();
    assert_eq!(fs.mounts().collect::<Vec<_>>(), vec!["res", "cwd"]);
    assert!(fs.exists("mock.txt"));
    assert!(fs.exists("tests/assets/mock.txt"));

    params.working_dir = false;
    let fs = FileSystem::from_params(&params).unwrap();
    assert!(fs.exists("mock.txt"));
    assert!(!fs.exists("tests/assets/mock.txt"));

    params.mount("invalid", "tests/_invalid_path_");
    assert!(FileSystem::from_params(&params).is_err());

    let mut params = ResourceParams::default();
    params.mount("res", "tests/assets").mount("res", "tests/assets/materials");
    match FileSystem::from_params(&params) {
        Err(Error::Mounted(_)) => {}
        _ => panic!("duplicated mounts are not allowed"),
    }
}

#[test]
fn manager() {
    let json = fs::read_to_string("tests/assets/params.json").unwrap();
    let params = ResourceParams::from_json(json).unwrap();

    let mut manager = ResourceManager::from_params(LoaderFactory::with_defaults(), &params).unwrap();
    assert!(manager.filesystem().is_mounted("res"));
    assert!(!manager.filesystem().is_mounted("cwd"));

    let text = manager
        .add_from_file::<String, _>("mock", "mock.txt", None)
        .unwrap();
    assert_eq!(text, "Hello, World!");

    manager.filesystem_mut().unmount("res");
    let err = manager
        .add_from_file::<String, _>("other", "mock.txt", None)
        .unwrap_err();
    assert_eq!(err.root().kind(), ErrorKind::IO);
}
