//! Hardware notch detection.
//!
//! Only MacBook Pro 18,x / MacBook Air 11,x and later ship with a notch. The
//! result is computed once at startup and gates everything else.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NOTCH_MODELS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        // MacBookPro18,x and later
        Regex::new(r"^MacBookPro(1[8-9]|[2-9]\d),").expect("valid model pattern"),
        // MacBookAir11,x and later
        Regex::new(r"^MacBookAir(1[1-9]|[2-9]\d),").expect("valid model pattern"),
    ]
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCapability {
    pub has_notch: bool,
    pub platform_supported: bool,
}

impl HostCapability {
    pub const NONE: HostCapability = HostCapability {
        has_notch: false,
        platform_supported: false,
    };
}

/// Does this hardware model identifier belong to a notched machine?
pub fn model_has_notch(model: &str) -> bool {
    let model = model.trim();
    NOTCH_MODELS.iter().any(|pattern| pattern.is_match(model))
}

/// Inspect the host. Never fails: any lookup problem means "no notch".
pub fn detect(debug: bool) -> HostCapability {
    if !cfg!(target_os = "macos") {
        if debug {
            tracing::info!("Notch detection skipped: unsupported platform");
        }
        return HostCapability::NONE;
    }

    match read_hardware_model() {
        Ok(model) => {
            let has_notch = model_has_notch(&model);
            if debug {
                tracing::info!(model = %model, has_notch, "Hardware model checked");
            }
            HostCapability {
                has_notch,
                platform_supported: true,
            }
        }
        Err(e) => {
            if debug {
                tracing::error!("Failed to check hardware model: {e}");
            }
            HostCapability {
                has_notch: false,
                platform_supported: true,
            }
        }
    }
}

fn read_hardware_model() -> std::io::Result<String> {
    let output = std::process::Command::new("sysctl")
        .args(["-n", "hw.model"])
        .output()?;

    if !output.status.success() {
        return Err(std::io::Error::other(format!(
            "sysctl exited with {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
