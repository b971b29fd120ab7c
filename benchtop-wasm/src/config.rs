//! Page options read from the query string at start-up.
//!
//! `?w=1500&waste=90&catalog=data%2Fbasins.json&log=debug`

use log::LevelFilter;

use crate::selection::DEFAULT_CATALOG;

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// Initial board width in millimeters.
    pub board_width: Option<u32>,
    /// Initial waste hole diameter, as the select value.
    pub waste: Option<String>,
    /// Catalog location, relative to the page base or absolute.
    pub catalog: String,
    pub log_level: LevelFilter,
    /// Values that were present but unusable, reported once logging is up.
    pub ignored: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            board_width: None,
            waste: None,
            catalog: DEFAULT_CATALOG.to_string(),
            log_level: LevelFilter::Info,
            ignored: Vec::new(),
        }
    }
}

impl PageConfig {
    pub fn from_query(search: &str) -> Self {
        let mut config = PageConfig::default();
        let pairs = search
            .trim_start_matches('?')
            .split('&')
            .filter(|p| !p.is_empty());
        for pair in pairs {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(raw);
            let value = value.trim();
            match key {
                "w" => match value.parse::<u32>() {
                    Ok(w) => config.board_width = Some(w),
                    Err(_) => config.ignored.push(format!("width {value:?}")),
                },
                "waste" if !value.is_empty() => config.waste = Some(value.to_string()),
                "catalog" if !value.is_empty() => config.catalog = value.to_string(),
                "log" => match value.parse::<LevelFilter>() {
                    Ok(level) => config.log_level = level,
                    Err(_) => config.ignored.push(format!("log level {value:?}")),
                },
                _ => {}
            }
        }
        config
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .into_owned()
}
