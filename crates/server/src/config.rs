use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_bind: String,
    pub catalog_path: String,
    pub gold_price_usd: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            catalog_path: "./data/products.json".into(),
            // Dummy spot price standing in for a live gold quote.
            gold_price_usd: 1234.56,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("catalog_path") {
                settings.catalog_path = v.clone();
            }
            if let Some(v) = file_cfg.get("gold_price_usd") {
                if let Ok(parsed) = v.parse::<f64>() {
                    settings.gold_price_usd = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("APP__CATALOG_PATH") {
        settings.catalog_path = v;
    }

    if let Ok(v) = std::env::var("APP__GOLD_PRICE_USD") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.gold_price_usd = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_development_service() {
        let settings = Settings::default();
        assert_eq!(settings.server_bind, "127.0.0.1:8000");
        assert_eq!(settings.catalog_path, "./data/products.json");
        assert_eq!(settings.gold_price_usd, 1234.56);
    }

    #[test]
    fn file_values_parse_from_flat_toml() {
        let raw = "bind_addr = \"0.0.0.0:9000\"\ngold_price_usd = \"2000.5\"\n";
        let file_cfg: HashMap<String, String> = toml::from_str(raw).expect("parse");
        assert_eq!(file_cfg.get("bind_addr").map(String::as_str), Some("0.0.0.0:9000"));
        assert_eq!(
            file_cfg
                .get("gold_price_usd")
                .and_then(|v| v.parse::<f64>().ok()),
            Some(2000.5)
        );
    }
}
