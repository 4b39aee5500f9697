use bjcoach_cli::run;
use bjcoach_cli::run_with_input;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: [&str; 4] = ["BJCOACH_CONFIG", "BJCOACH_SEED", "BJCOACH_ROUNDS", "BJCOACH_LOG"];

/// Restores the `BJCOACH_*` variables when dropped.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn clean() -> Self {
        let saved = VARS.iter().map(|k| (*k, std::env::var(k).ok())).collect();
        for k in VARS {
            unsafe { std::env::remove_var(k) };
        }
        EnvGuard { saved }
    }

    fn set(&self, key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, v) in &self.saved {
            match v {
                Some(v) => unsafe { std::env::set_var(k, v) },
                None => unsafe { std::env::remove_var(k) },
            }
        }
    }
}

fn run_capture(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_expected_commands() {
    let _lock = env_lock().lock().unwrap();
    let (code, out, _) = run_capture(&["bjcoach", "--help"]);
    assert_eq!(code, 0);
    for cmd in ["play", "advise", "cfg"] {
        assert!(out.contains(cmd), "help should list subcommand `{}`", cmd);
    }
}

#[test]
fn missing_arguments_exit_two() {
    let _lock = env_lock().lock().unwrap();
    let (code, _, err) = run_capture(&["bjcoach"]);
    assert_eq!(code, 2);
    assert!(err.contains("Usage: bjcoach"));
}

#[test]
fn advise_prints_recommendation() {
    let _lock = env_lock().lock().unwrap();
    let (code, out, _) = run_capture(&["bjcoach", "advise", "--hand", "5 6", "--dealer", "6"]);
    assert_eq!(code, 0);
    assert!(out.contains("Recommended: double down"));

    let (code, out, _) = run_capture(&["bjcoach", "advise", "--hand", "A,7", "--dealer", "9"]);
    assert_eq!(code, 0);
    assert!(out.contains("Recommended: hit"));
}

#[test]
fn cfg_shows_default_settings() {
    let _lock = env_lock().lock().unwrap();
    let _env = EnvGuard::clean();
    let (code, out, _) = run_capture(&["bjcoach", "cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["rounds"]["value"], 1);
    assert_eq!(json["rounds"]["source"], "default");
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
fn cfg_reports_file_and_env_layers() {
    let _lock = env_lock().lock().unwrap();
    let env = EnvGuard::clean();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rounds = 4\nseed = 10").unwrap();
    env.set("BJCOACH_CONFIG", file.path().to_str().unwrap());
    env.set("BJCOACH_SEED", "11");

    let (code, out, _) = run_capture(&["bjcoach", "cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["rounds"]["value"], 4);
    assert_eq!(json["rounds"]["source"], "file");
    assert_eq!(json["seed"]["value"], 11);
    assert_eq!(json["seed"]["source"], "env");
}

#[test]
fn invalid_config_fails_cfg_and_play() {
    let _lock = env_lock().lock().unwrap();
    let env = EnvGuard::clean();
    env.set("BJCOACH_ROUNDS", "0");

    let (code, _, err) = run_capture(&["bjcoach", "cfg"]);
    assert_eq!(code, 2);
    assert!(err.contains("Invalid configuration"));

    let (code, _, err) = run_capture(&["bjcoach", "play", "--auto"]);
    assert_eq!(code, 2);
    assert!(err.contains("rounds must be >=1"));
}

#[test]
fn play_flags_override_config() {
    let _lock = env_lock().lock().unwrap();
    let env = EnvGuard::clean();
    env.set("BJCOACH_ROUNDS", "3");
    env.set("BJCOACH_SEED", "5");

    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut input = std::io::Cursor::new(Vec::new());
    let code = run_with_input(
        ["bjcoach", "play", "--auto", "--seed", "6"],
        &mut out,
        &mut err,
        &mut input,
    );
    assert_eq!(code, 0);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("play: rounds=3 seed=6 mode=auto"));
}
