// Root shell metadata served at the application root

use serde::Serialize;

pub const APP_TITLE: &str = "The Evolution of Todo - AI-Powered Vault";
pub const APP_DESCRIPTION: &str = "Next.js + FastAPI + AI Todo Ecosystem";
pub const APP_LANG: &str = "en";

/// Fixed metadata every rendered page is wrapped with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub lang: &'static str,
}

impl Default for ShellMetadata {
    fn default() -> Self {
        Self {
            title: APP_TITLE,
            description: APP_DESCRIPTION,
            lang: APP_LANG,
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub proxy_enabled: bool,
    #[serde(flatten)]
    pub metadata: ShellMetadata,
}
