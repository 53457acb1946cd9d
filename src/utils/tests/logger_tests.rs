use std::fs;

use crate::utils::logger::Logger;

#[test]
fn test_logger_appends_to_file() {
    let path = std::env::temp_dir().join(format!("crskit_logger_{}.log", std::process::id()));
    let path_str = path.to_str().unwrap();
    let _ = fs::remove_file(&path);

    let logger = Logger::new(path_str).unwrap();
    assert!(logger.has_file());
    logger.log("first line").unwrap();
    drop(logger);

    let reopened = Logger::new(path_str).unwrap();
    reopened.log("second line").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(content, "first line\nsecond line\n");
}

#[test]
fn test_console_logger_drops_messages() {
    let logger = Logger::console();
    assert!(!logger.has_file());
    assert!(logger.log("nowhere").is_ok());
}
