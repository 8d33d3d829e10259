use std::sync::OnceLock;

use crate::models::ECLevel;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

static BOX_SIZE: OnceLock<u32> = OnceLock::new();

/// Default pixels per module (`QR_BOX_SIZE`, default 10)
pub fn default_box_size() -> u32 {
    *BOX_SIZE.get_or_init(|| parse_env_u32("QR_BOX_SIZE", 10).clamp(1, 100))
}

static BORDER: OnceLock<u32> = OnceLock::new();

/// Default quiet-zone width in modules (`QR_BORDER`, default 4)
pub fn default_border() -> u32 {
    *BORDER.get_or_init(|| parse_env_u32("QR_BORDER", 4).min(64))
}

static EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

/// Default error correction level (`QR_EC_LEVEL`, default M)
pub fn default_ec_level() -> ECLevel {
    *EC_LEVEL.get_or_init(|| match std::env::var("QR_EC_LEVEL") {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %value, "ignoring invalid QR_EC_LEVEL, using M");
            ECLevel::M
        }),
        Err(_) => ECLevel::M,
    })
}

static BATCH_WORKERS: OnceLock<usize> = OnceLock::new();

/// Worker threads for batch generation (`QR_BATCH_WORKERS`, 0 = rayon global pool)
pub fn batch_workers() -> usize {
    *BATCH_WORKERS.get_or_init(|| parse_env_usize("QR_BATCH_WORKERS", 0).min(256))
}

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// `QR_DEBUG` set: the CLI raises its default log filter to `debug`
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QR_DEBUG").is_ok())
}
