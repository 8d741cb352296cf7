use colored::Colorize;

use crate::utils::config::Config;

pub struct Theme {
    pub prompt: String,
    pub success_symbol: String,
    pub error_symbol: String,
    pub welcome_message: String,
    pub help_message: String,
    pub exit_message: String,
    pub error_style: Box<dyn Fn(String) -> String>,
    pub success_style: Box<dyn Fn(String) -> String>,
    pub warning_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt: "minish> ".bright_cyan().to_string(),
            success_symbol: "✓".bright_green().to_string(),
            error_symbol: "✗".red().to_string(),
            welcome_message: "minish".bright_green().to_string(),
            help_message: "Type 'help' for a list of commands or 'exit' to quit."
                .yellow()
                .to_string(),
            exit_message: "Goodbye!".bright_blue().to_string(),
            error_style: Box::new(|s| s.bright_red().to_string()),
            success_style: Box::new(|s| s.bright_green().to_string()),
            warning_style: Box::new(|s| s.yellow().to_string()),
        }
    }
}

impl Theme {
    pub fn load_theme(theme_name: &str, config: &Config) -> Theme {
        let mut theme = match theme_name {
            "default" => Theme::default(),
            "dark" => Theme {
                prompt: "minish ➤ ".bright_purple().to_string(),
                success_symbol: "✓".magenta().to_string(),
                error_symbol: "✗".red().to_string(),
                exit_message: "Goodbye!".bright_purple().to_string(),
                error_style: Box::new(|s| s.red().to_string()),
                success_style: Box::new(|s| s.magenta().to_string()),
                warning_style: Box::new(|s| s.bright_yellow().to_string()),
                ..Theme::default()
            },
            _ => Theme::default(),
        };
        theme.welcome_message =
            (theme.success_style)(format!("{} v{}", config.name, config.version));
        theme
    }
}
