/// Application configuration and constants.
use std::env;

pub struct Config {
    /// Base URL of the generation backend
    pub api_url: String,

    /// Path appended to the base URL for generation requests.
    /// May be empty to POST directly to the base URL.
    pub generate_path: String,

    /// Strip a fenced code block out of the backend response.
    /// When false the response body is taken verbatim.
    pub strip_fences: bool,

    /// File name used by the export action
    pub export_filename: String,

    /// Main loop tick rate in milliseconds (target 60 FPS = ~16ms)
    pub tick_rate_ms: u64,

    /// How many ticks a notice stays visible (180 = ~3s at 60fps)
    pub status_timeout_ticks: u64,

    /// Modulo for animation frame counter
    pub animation_frame_mod: usize,

    /// Lines to scroll per key press or wheel notch
    pub scroll_step: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            generate_path: "/generate".to_string(),
            strip_fences: true,
            export_filename: "uigen-component.html".to_string(),
            tick_rate_ms: 16,
            status_timeout_ticks: 180,
            animation_frame_mod: 360,
            scroll_step: 3,
        }
    }
}

impl Config {
    /// Defaults overridden by UIGEN_* environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("UIGEN_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }

        // May legitimately be set to "" to POST straight at the base URL.
        if let Ok(path) = env::var("UIGEN_GENERATE_PATH") {
            config.generate_path = path.trim().to_string();
        }

        if let Ok(raw) = env::var("UIGEN_RAW_RESULT") {
            let raw = raw.trim();
            config.strip_fences = !(raw == "1" || raw.eq_ignore_ascii_case("true"));
        }

        config
    }

    /// Full URL generation requests are POSTed to.
    pub fn endpoint(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        if self.generate_path.is_empty() {
            return base.to_string();
        }
        let path = self.generate_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_generate_path() {
        let config = Config::default();
        assert_eq!(config.endpoint(), "http://localhost:5000/generate");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = Config {
            api_url: "http://localhost:5000/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:5000/generate");
    }

    #[test]
    fn endpoint_with_empty_path_posts_to_base() {
        let config = Config {
            api_url: "https://gen.example.com/api".to_string(),
            generate_path: String::new(),
            ..Config::default()
        };
        assert_eq!(config.endpoint(), "https://gen.example.com/api");
    }

    #[test]
    fn endpoint_normalizes_leading_slash() {
        let config = Config {
            generate_path: "generate".to_string(),
            ..Config::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:5000/generate");
    }

    #[test]
    fn default_strips_fences() {
        assert!(Config::default().strip_fences);
    }
}
