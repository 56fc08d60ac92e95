//! Compile-time settings for the dashboard.
//!
//! `API_BASE_URL` can be overridden when building, e.g.
//! `API_BASE_URL=https://api.example.com trunk build --release`.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Base URL of the records API.
pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// `localStorage` key holding the logged-in user's identifier.
pub const SESSION_STORAGE_KEY: &str = "usuarioId";

/// Page the user is sent to when no session is stored.
pub const LOGIN_PAGE: &str = "login.html";

/// How long a toast stays visible before it starts fading out.
pub const TOAST_LIFETIME_MS: u32 = 5_000;

/// Length of the toast fade-out transition.
pub const TOAST_FADE_MS: u32 = 150;

pub const CURRENCY_SYMBOL: &str = "R$";

/// DOM id of the chart container.
pub const CHART_ELEMENT_ID: &str = "graficoResumo";
pub const CHART_WIDTH: u32 = 560;
pub const CHART_HEIGHT: u32 = 320;
