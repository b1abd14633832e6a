use crate::logging::LogLevel;

pub const THEME_KEY: &str = "theme";
pub const FALLBACK_IMAGE: &str = "/images/placeholder.svg";
pub const IMAGE_HOSTS: &[&str] = &[
    "images.unsplash.com",
    "placehold.co",
    "img.icons8.com",
    "cdn.simpleicons.org",
    "cdn.jsdelivr.net",
];

const DEFAULT_SUBMIT_DELAY_MS: u32 = 800;
const DEFAULT_NOTICE_TIMEOUT_MS: u32 = 2_500;
const DEFAULT_STAR_COUNT: usize = 100;
const DEFAULT_TILT_DIVISOR: f64 = 25.0;
const DEFAULT_PARALLAX_MULTIPLIER: f64 = 12.0;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SUBMIT_DELAY_MS_BOUNDS: (u32, u32) = (800, 2_000);
const NOTICE_TIMEOUT_MS_BOUNDS: (u32, u32) = (2_500, 5_000);
const STAR_COUNT_BOUNDS: (usize, usize) = (1, 500);
const TILT_DIVISOR_BOUNDS: (f64, f64) = (1.0, 200.0);
const PARALLAX_MULTIPLIER_BOUNDS: (f64, f64) = (0.0, 100.0);

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub submit_delay_ms: u32,
    pub notice_timeout_ms: u32,
    pub star_count: usize,
    pub tilt_divisor: f64,
    pub parallax_multiplier: f64,
    pub reveal_threshold: f64,
    pub log_level: LogLevel,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
            star_count: DEFAULT_STAR_COUNT,
            tilt_divisor: DEFAULT_TILT_DIVISOR,
            parallax_multiplier: DEFAULT_PARALLAX_MULTIPLIER,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl PageConfig {
    /// Reads `PORTFOLIO_*` overrides baked in at compile time. There is no
    /// process environment in the browser, so `trunk build` is the only place
    /// these can be set.
    pub fn from_build_env() -> Self {
        Self::from_values(|name| match name {
            "PORTFOLIO_SUBMIT_DELAY_MS" => option_env!("PORTFOLIO_SUBMIT_DELAY_MS"),
            "PORTFOLIO_NOTICE_TIMEOUT_MS" => option_env!("PORTFOLIO_NOTICE_TIMEOUT_MS"),
            "PORTFOLIO_STAR_COUNT" => option_env!("PORTFOLIO_STAR_COUNT"),
            "PORTFOLIO_TILT_DIVISOR" => option_env!("PORTFOLIO_TILT_DIVISOR"),
            "PORTFOLIO_PARALLAX_MULTIPLIER" => option_env!("PORTFOLIO_PARALLAX_MULTIPLIER"),
            "PORTFOLIO_REVEAL_THRESHOLD" => option_env!("PORTFOLIO_REVEAL_THRESHOLD"),
            "PORTFOLIO_LOG_LEVEL" => option_env!("PORTFOLIO_LOG_LEVEL"),
            _ => None,
        })
    }

    fn from_values<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        Self {
            submit_delay_ms: parse_u32_with_bounds(
                lookup("PORTFOLIO_SUBMIT_DELAY_MS"),
                DEFAULT_SUBMIT_DELAY_MS,
                SUBMIT_DELAY_MS_BOUNDS,
            ),
            notice_timeout_ms: parse_u32_with_bounds(
                lookup("PORTFOLIO_NOTICE_TIMEOUT_MS"),
                DEFAULT_NOTICE_TIMEOUT_MS,
                NOTICE_TIMEOUT_MS_BOUNDS,
            ),
            star_count: parse_usize_with_bounds(
                lookup("PORTFOLIO_STAR_COUNT"),
                DEFAULT_STAR_COUNT,
                STAR_COUNT_BOUNDS,
            ),
            tilt_divisor: parse_f64_with_bounds(
                lookup("PORTFOLIO_TILT_DIVISOR"),
                DEFAULT_TILT_DIVISOR,
                TILT_DIVISOR_BOUNDS,
            ),
            parallax_multiplier: parse_f64_with_bounds(
                lookup("PORTFOLIO_PARALLAX_MULTIPLIER"),
                DEFAULT_PARALLAX_MULTIPLIER,
                PARALLAX_MULTIPLIER_BOUNDS,
            ),
            reveal_threshold: parse_threshold(lookup("PORTFOLIO_REVEAL_THRESHOLD")),
            log_level: lookup("PORTFOLIO_LOG_LEVEL")
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_u32_with_bounds(value: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(value: Option<&str>, default: usize, bounds: (usize, usize)) -> usize {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(value: Option<&str>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

// Zero would never fire, so the lower bound is exclusive.
fn parse_threshold(value: Option<&str>) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| *value > 0.0 && *value <= 1.0)
        .unwrap_or(DEFAULT_REVEAL_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&'static str, &'static str)]) -> PageConfig {
        let values: HashMap<&str, &str> = pairs.iter().copied().collect();
        PageConfig::from_values(|name| values.get(name).copied())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(config_from(&[]), PageConfig::default());
        assert_eq!(PageConfig::default().star_count, 100);
    }

    #[test]
    fn in_range_overrides_are_applied() {
        let config = config_from(&[
            ("PORTFOLIO_SUBMIT_DELAY_MS", "1500"),
            ("PORTFOLIO_NOTICE_TIMEOUT_MS", " 5000 "),
            ("PORTFOLIO_TILT_DIVISOR", "40"),
            ("PORTFOLIO_LOG_LEVEL", "debug"),
        ]);

        assert_eq!(config.submit_delay_ms, 1_500);
        assert_eq!(config.notice_timeout_ms, 5_000);
        assert_eq!(config.tilt_divisor, 40.0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn build_env_config_stays_within_bounds() {
        let config = PageConfig::from_build_env();

        assert!((800..=2_000).contains(&config.submit_delay_ms));
        assert!((2_500..=5_000).contains(&config.notice_timeout_ms));
        assert!((1..=500).contains(&config.star_count));
        assert!(config.reveal_threshold > 0.0 && config.reveal_threshold <= 1.0);
    }

    #[test]
    fn out_of_range_or_garbage_values_fall_back() {
        let config = config_from(&[
            ("PORTFOLIO_SUBMIT_DELAY_MS", "10"),
            ("PORTFOLIO_STAR_COUNT", "many"),
            ("PORTFOLIO_PARALLAX_MULTIPLIER", "NaN"),
            ("PORTFOLIO_REVEAL_THRESHOLD", "0"),
            ("PORTFOLIO_LOG_LEVEL", "loud"),
        ]);

        assert_eq!(config, PageConfig::default());
    }
}
