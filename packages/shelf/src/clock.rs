/// Milliseconds since the Unix epoch, used to stamp scroll signals.
///
/// Uses `js_sys`-backed `chrono` on WASM and the system clock on native.
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
