use crate::utils::cookies::cookie_value;
use axum::http::HeaderMap;
use serde::Serialize;

pub const THEME_COOKIE: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

/// Theme selection for one render, taken from the `theme` cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeContext {
    pub theme: Theme,
}

impl ThemeContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let theme = cookie_value(headers, THEME_COOKIE)
            .and_then(Theme::parse)
            .unwrap_or_default();
        Self { theme }
    }
}
