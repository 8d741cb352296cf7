use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub version: String,
    pub config_dir: PathBuf,
    pub theme: String,
    pub editor_mode: String,
    pub history_file: PathBuf,
    pub history_size: usize,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub show_tokens: bool,
}

impl Config {
    fn get_config_dir(home: Option<String>) -> PathBuf {
        match home {
            Some(home) => PathBuf::from(home).join(".config/minish"),
            None => PathBuf::from("tmp"),
        }
    }

    fn with_config_dir(config_dir: PathBuf) -> Self {
        Config {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            theme: String::from("default"),
            editor_mode: String::from("emacs"),
            history_file: config_dir.join(".minish_history"),
            history_size: DEFAULT_HISTORY_SIZE,
            logger_level: String::from("warn"),
            logger_dir: config_dir.join("logs"),
            show_tokens: false,
            config_dir,
        }
    }

    /// 由默认值和 `lookup`（环境变量名到值的映射）构建配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::with_config_dir(Self::get_config_dir(lookup("HOME")));

        if let Some(theme) = lookup("MINISH_THEME") {
            config.theme = theme;
        }

        if let Some(editor) = lookup("MINISH_EDITOR") {
            config.editor_mode = editor;
        }

        if let Some(history) = lookup("MINISH_HISTORY") {
            config.history_file = PathBuf::from(shellexpand::tilde(&history).as_ref());
        }

        if let Some(size) = lookup("MINISH_HISTORY_SIZE").and_then(|s| s.trim().parse().ok()) {
            config.history_size = size;
        }

        if let Some(level) = lookup("MINISH_LOG_LEVEL") {
            config.logger_level = level;
        }

        if let Some(dir) = lookup("MINISH_LOG_DIR") {
            config.logger_dir = PathBuf::from(shellexpand::tilde(&dir).as_ref());
        }

        if let Some(flag) = lookup("MINISH_SHOW_TOKENS") {
            config.show_tokens = parse_flag(&flag);
        }

        config
    }

    pub fn new() -> io::Result<Self> {
        // 优先加载环境变量
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let config = Self::from_lookup(|key| env::var(key).ok());

        // 确保历史文件目录存在
        if let Some(parent) = config.history_file.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
