use engine::api::{RegenConfig, simulate_regeneration};
use engine::classifier::{RenderedApp, classify};
use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{jint, jlong, jstring};
use serde_json::json;

fn ok(env: &JNIEnv, value: serde_json::Value) -> jstring {
    let payload = json!({ "ok": true, "result": value });
    env.new_string(serde_json::to_string(&payload).unwrap())
        .unwrap()
        .into_raw()
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    env.new_string(format!(r#"{{"ok":false,"error":"{}"}}"#, e))
        .unwrap()
        .into_raw()
}

/// Deterministic roller: sum of n rolls of 1..=sides using a simple LCG.
/// Host-independent, so an embedder can verify its bridge without touching
/// the engine RNG. Edge cases: n<=0 -> 0, sides<=1 -> 1 per die.
pub fn lcg_roll(seed: i64, n: i32, sides: i32) -> i32 {
    let mut state = seed as u64;
    let mut next_u32 = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 32) as u32
    };
    let rolls = n.max(0) as i64;
    let sides = sides.max(1) as i64;
    let mut total = 0i64;
    for _ in 0..rolls {
        let r = (next_u32() as i64 % sides) + 1; // 1..=sides
        total += r;
    }
    total as i32
}

#[no_mangle]
pub extern "system" fn Java_com_masterful_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    env.new_string("masterful-regen-ffi 0.1.0")
        .expect("new_string failed")
}

#[no_mangle]
pub extern "system" fn Java_com_masterful_Ffi_roll(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    seed: jlong,
    n: jint,
    sides: jint,
) -> jint {
    lcg_roll(seed, n, sides)
}

#[no_mangle]
pub extern "system" fn Java_com_masterful_Ffi_classifyDialogJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let app: RenderedApp = match serde_json::from_str(&input) {
        Ok(a) => a,
        Err(e) => return err(&env, format!("invalid_descriptor: {}", e)),
    };
    ok(&env, json!({ "matched": classify(&app) }))
}

#[no_mangle]
pub extern "system" fn Java_com_masterful_Ffi_simulateRegenerationJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let cfg: RegenConfig = match serde_json::from_str(&input) {
        Ok(c) => c,
        Err(e) => return err(&env, format!("invalid_config: {}", e)),
    };
    match simulate_regeneration(cfg) {
        Ok(report) => ok(&env, serde_json::to_value(report).unwrap()),
        Err(e) => err(&env, e),
    }
}
