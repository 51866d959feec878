use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

#[derive(Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

pub fn print_plan<T: Serialize>(op: &str, plan: &T, meta: Option<Meta>) -> Result<()> {
    write_envelope(&mut io::stdout(), &envelope(op, false, plan, meta)?)
}

pub fn print_result<T: Serialize>(op: &str, result: &T, meta: Option<Meta>) -> Result<()> {
    write_envelope(&mut io::stdout(), &envelope(op, true, result, meta)?)
}

fn envelope<T: Serialize>(op: &str, apply: bool, body: &T, meta: Option<Meta>) -> Result<serde_json::Value> {
    let key = if apply { "result" } else { "plan" };
    let mut env = json!({ "op": op, "apply": apply, "meta": meta });
    env[key] = serde_json::to_value(body)?;
    Ok(env)
}

fn write_envelope(out: &mut dyn Write, env: &serde_json::Value) -> Result<()> {
    serde_json::to_writer(&mut *out, env)?;
    writeln!(out)?;
    Ok(())
}
