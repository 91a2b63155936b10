use std::sync::OnceLock;

static MAX_ATTEMPTS: OnceLock<Option<usize>> = OnceLock::new();

/// Optional cap on grid-adjustment attempts per decode call.
pub(crate) fn max_attempts_override() -> Option<usize> {
    *MAX_ATTEMPTS.get_or_init(|| {
        std::env::var("QR_ECC_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
    })
}
