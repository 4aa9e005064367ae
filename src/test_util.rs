//! Shared test helpers for modules that read process environment variables.
//! A single global lock serializes all env-var-mutating tests across modules.

use std::ffi::OsString;
use std::sync::Mutex;

static SERIAL: Mutex<()> = Mutex::new(());

/// Set (`Some`) or remove (`None`) each variable, run `f`, then restore the
/// previous values.
pub fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
    let _lock = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let previous: Vec<(String, Option<OsString>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var_os(key)))
        .collect();
    for (key, value) in vars {
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (key, prev) in previous {
        restore_var(&key, prev);
    }
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}

fn restore_var(key: &str, prev: Option<OsString>) {
    match prev {
        Some(v) => unsafe { std::env::set_var(key, v) },
        None => unsafe { std::env::remove_var(key) },
    }
}
