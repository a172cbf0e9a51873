use wicket::config::{Config, DEFAULT_BUFFER_SIZE, DEFAULT_HEADER_LIMIT};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.header_limit, 1 << 20);
    assert_eq!(cfg.buffer_size, 4 << 10);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml("listen_addr: \"0.0.0.0:3000\"\nheader_limit: 8192\nbuffer_size: 1024\n").unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.header_limit, 8192);
    assert_eq!(cfg.buffer_size, 1024);
}

#[test]
fn test_config_from_partial_yaml() {
    let cfg = Config::from_yaml("header_limit: 65536\n").unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.header_limit, 65536);
    assert_eq!(cfg.buffer_size, DEFAULT_BUFFER_SIZE);
}

#[test]
fn test_config_rejects_zero_buffer() {
    assert!(Config::from_yaml("buffer_size: 0\n").is_err());
}

#[test]
fn test_config_rejects_zero_header_limit() {
    let err = Config::from_yaml("header_limit: 0\n").unwrap_err();
    assert!(err.to_string().contains("header_limit"), "{err}");
}

#[test]
fn test_config_rejects_bad_types() {
    assert!(Config::from_yaml("header_limit: lots\n").is_err());
}

// Environment variables are process-wide, so every env-driven case lives in
// this one test.
#[test]
fn test_config_load_from_env() {
    let dir = std::env::temp_dir().join(format!("wicket-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("wicket.yaml");
    std::fs::write(&path, "listen_addr: \"127.0.0.1:9000\"\nbuffer_size: 2048\n").unwrap();

    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("WICKET_CONFIG");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.header_limit, DEFAULT_HEADER_LIMIT);

    unsafe {
        std::env::set_var("WICKET_CONFIG", &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.buffer_size, 2048);

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.buffer_size, 2048);

    unsafe {
        std::env::set_var("WICKET_CONFIG", dir.join("missing.yaml"));
    }
    assert!(Config::load().is_err());

    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("WICKET_CONFIG");
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
