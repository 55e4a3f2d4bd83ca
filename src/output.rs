use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `SAMPLE_LOADER_QUIET=1` (or `true`) silences human-facing output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("SAMPLE_LOADER_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
