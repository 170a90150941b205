//! Mobile device detection
//!
//! Detection is a heuristic over environment signals. Everything is read
//! from an [`Environment`] value so callers decide where the signals come
//! from (a browser, CLI flags, a test).

use serde::{Deserialize, Serialize};

/// User agent fragments that identify a mobile browser
const MOBILE_KEYWORDS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
    "mobile",
    "opera mini",
    "iemobile",
];

/// Largest viewport still considered phone/tablet sized
const MOBILE_MAX_WIDTH: u32 = 768;
const MOBILE_MAX_HEIGHT: u32 = 1024;

/// Runtime signals used for device detection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub user_agent: String,
    /// Touch-start events are supported
    pub touch_start_supported: bool,
    pub max_touch_points: u32,
    /// Legacy IE touch point count
    pub ms_max_touch_points: u32,
    /// An orientation API is exposed
    pub orientation_api: bool,
}

impl Environment {
    /// A typical phone, used when the terminal app emulates a mobile visitor
    pub fn emulated_phone() -> Self {
        Self {
            viewport_width: 390,
            viewport_height: 844,
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148"
                .to_string(),
            touch_start_supported: true,
            max_touch_points: 5,
            ms_max_touch_points: 0,
            orientation_api: true,
        }
    }

    pub fn has_touch(&self) -> bool {
        self.touch_start_supported || self.max_touch_points > 0 || self.ms_max_touch_points > 0
    }
}

/// Whether the environment looks like a phone or tablet
pub fn is_mobile_device(env: &Environment) -> bool {
    let user_agent = env.user_agent.to_lowercase();
    let mobile_user_agent = MOBILE_KEYWORDS.iter().any(|keyword| user_agent.contains(keyword));

    let mobile_screen =
        env.viewport_width <= MOBILE_MAX_WIDTH && env.viewport_height <= MOBILE_MAX_HEIGHT;

    mobile_user_agent || (mobile_screen && env.has_touch()) || env.orientation_api
}

/// Human-readable device family
pub fn device_type(env: &Environment) -> &'static str {
    let user_agent = env.user_agent.to_lowercase();
    if user_agent.contains("iphone") {
        "iPhone"
    } else if user_agent.contains("ipad") {
        "iPad"
    } else if user_agent.contains("android") {
        "Android"
    } else if user_agent.contains("windows phone") {
        "Windows Phone"
    } else if user_agent.contains("blackberry") {
        "BlackBerry"
    } else {
        "Mobile Device"
    }
}

/// Outcome of the mobile guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    DesktopNotSupported,
}

/// Gate that keeps mobile-only flows off desktops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileGuard {
    pub mobile_only: bool,
}

impl MobileGuard {
    pub fn new(mobile_only: bool) -> Self {
        Self { mobile_only }
    }

    /// Decide for the current environment; call again after resizes
    pub fn evaluate(&self, env: &Environment) -> GuardDecision {
        if !self.mobile_only || is_mobile_device(env) {
            GuardDecision::Allow
        } else {
            GuardDecision::DesktopNotSupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Environment {
        Environment {
            viewport_width: 1920,
            viewport_height: 1080,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0".into(),
            ..Default::default()
        }
    }

    #[test]
    fn phone_user_agent_is_mobile() {
        assert!(is_mobile_device(&Environment::emulated_phone()));
    }

    #[test]
    fn desktop_is_not_mobile() {
        assert!(!is_mobile_device(&desktop()));
    }

    #[test]
    fn user_agent_match_ignores_case() {
        let env = Environment { user_agent: "Something ANDROID 14".into(), ..desktop() };
        assert!(is_mobile_device(&env));
    }

    #[test]
    fn small_touch_screen_is_mobile() {
        let env = Environment {
            viewport_width: 700,
            viewport_height: 900,
            max_touch_points: 1,
            ..desktop()
        };
        assert!(is_mobile_device(&env));
    }

    #[test]
    fn small_screen_without_touch_is_not_mobile() {
        let env = Environment { viewport_width: 700, viewport_height: 900, ..desktop() };
        assert!(!is_mobile_device(&env));
    }

    #[test]
    fn orientation_api_alone_is_mobile() {
        let env = Environment { orientation_api: true, ..desktop() };
        assert!(is_mobile_device(&env));
    }

    #[test]
    fn device_type_prefers_iphone() {
        assert_eq!(device_type(&Environment::emulated_phone()), "iPhone");
        let android = Environment { user_agent: "Linux; Android 14; Pixel".into(), ..desktop() };
        assert_eq!(device_type(&android), "Android");
        assert_eq!(device_type(&desktop()), "Mobile Device");
    }

    #[test]
    fn guard_blocks_desktop_when_mobile_only() {
        assert_eq!(MobileGuard::new(true).evaluate(&desktop()), GuardDecision::DesktopNotSupported);
        assert_eq!(
            MobileGuard::new(true).evaluate(&Environment::emulated_phone()),
            GuardDecision::Allow
        );
    }

    #[test]
    fn guard_allows_everything_when_disabled() {
        assert_eq!(MobileGuard::new(false).evaluate(&desktop()), GuardDecision::Allow);
    }
}
