use serde::Deserialize;

/// Window and loop settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Background color, linear RGB.
    pub clear_color: [f64; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "engine".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0.05, 0.05, 0.08],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let cfg: EngineConfig = toml::from_str("title = \"demo\"").unwrap();
        assert_eq!(cfg.title, "demo");
        assert_eq!(cfg.width, 1280);
        assert_eq!(cfg.height, 720);
    }
}
