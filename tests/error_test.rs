use std::io;

use cookiepowder::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_toml_error_conversion() {
    let toml_err = "[build-system".parse::<toml::Table>().unwrap_err();
    let err: Error = toml_err.into();
    assert!(matches!(err, Error::TomlDeError(_)));
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::NotFoundError {
        name: "project".to_string(),
        file: "docs/sphinx/source/conf.py".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Variable 'project' not found in 'docs/sphinx/source/conf.py'."
    );

    let err = Error::CycleError {
        path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    assert_eq!(err.to_string(), "Circular task dependency: a -> b -> a.");
}
