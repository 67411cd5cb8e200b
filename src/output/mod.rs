pub mod human;

use serde::Serialize;
use serde_json::{Value, json};

/// Standard JSON envelope printed by every command.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

/// Error envelope that still carries a (usually empty) payload, so callers
/// reading `data` keep a stable shape.
pub fn failure(command: &str, code: &str, message: &str, data: Value) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": data,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Serialize `data` into a success envelope and print it on stdout.
pub fn print_success<T: Serialize>(command: &str, data: &T) -> anyhow::Result<()> {
    let out = success(command, serde_json::to_value(data)?);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
