use std::io::Write;
use std::sync::Mutex;

use gradebook::config::{CONFIG_PATH_ENV, Config, LISTEN_ENV};

// Tests in this file mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    unsafe {
        std::env::remove_var(LISTEN_ENV);
        std::env::remove_var(CONFIG_PATH_ENV);
    }
}

#[test]
fn test_config_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:11000");
    assert_eq!(cfg.backlog, 16);
    assert_eq!(cfg.buffer_size, 8192);
}

#[test]
fn test_config_custom_address_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(LISTEN_ENV, "0.0.0.0:3000");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");

    clear_env();
}

#[test]
fn test_config_from_yaml_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr: 127.0.0.1:12000").unwrap();
    writeln!(file, "buffer_size: 1024").unwrap();
    unsafe {
        std::env::set_var(CONFIG_PATH_ENV, file.path());
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:12000");
    assert_eq!(cfg.buffer_size, 1024);
    // Not in the file, so the default stays
    assert_eq!(cfg.backlog, 16);

    clear_env();
}

#[test]
fn test_listen_env_overrides_yaml_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr: 127.0.0.1:12000").unwrap();
    unsafe {
        std::env::set_var(CONFIG_PATH_ENV, file.path());
        std::env::set_var(LISTEN_ENV, "127.0.0.1:13000");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:13000");

    clear_env();
}

#[test]
fn test_missing_config_file_is_an_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(CONFIG_PATH_ENV, "/nonexistent/gradebook.yaml");
    }

    assert!(Config::load().is_err());

    clear_env();
}

#[test]
fn test_yaml_rejects_zero_buffer_size() {
    assert!(Config::from_yaml_str("buffer_size: 0").is_err());
}

#[test]
fn test_yaml_rejects_zero_backlog() {
    assert!(Config::from_yaml_str("backlog: 0").is_err());
}

#[test]
fn test_empty_yaml_gives_defaults() {
    let cfg = Config::from_yaml_str("").unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_yaml_rejects_wrong_types() {
    assert!(Config::from_yaml_str("backlog: lots").is_err());
}
