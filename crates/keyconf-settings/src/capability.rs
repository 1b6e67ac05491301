//! 3D rendering capability check

/// Environment variable that forces the 2D render path
pub const FORCE_2D_ENV: &str = "KEYCONF_FORCE_2D";

/// Answers whether the 3D render path is usable on this platform
pub trait RenderCapability: Send + Sync {
    fn supports_3d(&self) -> bool;
}

/// Fixed answer, decided once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCapability(pub bool);

impl RenderCapability for StaticCapability {
    fn supports_3d(&self) -> bool {
        self.0
    }
}

/// Probe the platform once at boot
///
/// `force_2d` comes from the application config. The result is meant to be
/// cached for the session by wrapping it in [`StaticCapability`].
pub fn detect_render_capability(force_2d: bool) -> StaticCapability {
    let env_forced = std::env::var(FORCE_2D_ENV)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let supported = !force_2d && !env_forced && display_available();
    tracing::info!(supported, force_2d, env_forced, "3D render capability detected");
    StaticCapability(supported)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_capability() {
        assert!(StaticCapability(true).supports_3d());
        assert!(!StaticCapability(false).supports_3d());
    }

    #[test]
    fn test_forced_2d_wins() {
        assert!(!detect_render_capability(true).supports_3d());
    }
}
