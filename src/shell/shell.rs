use log::{debug, error, warn};
use std::error::Error;
use std::io::Write;

use crate::shell::parser::{self, Command};
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::utils::config::Config;
use crate::utils::theme::Theme;

const HELP_TEXT: &str = "Available commands:
  help - Display this help message
  exit - Exit the shell (also: quit)
Any other line is parsed and its command tree is printed.";

#[derive(Debug, PartialEq, Eq)]
enum Builtin {
    Help,
    Exit,
}

fn builtin(line: &str) -> Option<Builtin> {
    match line.trim() {
        "help" => Some(Builtin::Help),
        "exit" | "quit" => Some(Builtin::Exit),
        _ => None,
    }
}

/// 解析结果的单行摘要：节点类型、命令文本，后台运行时末尾加 `&`
pub fn describe(command: &Command) -> String {
    let marker = if command.is_background() { " &" } else { "" };
    format!("[{}] {}{}", command.label(), command, marker)
}

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    readline: ReadlineManager<'a>,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self, ReadlineError> {
        Ok(Self {
            config,
            theme: Theme::load_theme(&config.theme, config),
            readline: ReadlineManager::new(config)?,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("初始化 {}...", self.config.name);

        self.readline.load_history()?;

        println!("{}", self.theme.welcome_message);
        println!("{}", self.theme.help_message);
        debug!("{} 准备就绪...", self.config.name);

        self.run_loop()?;
        self.readline.save_history()?;

        println!("{}", self.theme.exit_message);
        debug!("退出 {}...", self.config.name);
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            std::io::stdout().flush()?;

            match self.readline.readline(&self.theme.prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.readline.add_history(&line)?;

                    match builtin(&line) {
                        Some(Builtin::Exit) => break,
                        Some(Builtin::Help) => println!("{}", HELP_TEXT),
                        None => self.handle_input(&line),
                    }
                }
                Err(err) => match err {
                    ReadlineError::Eof => {
                        warn!("接收到 EOF 信号，退出...");
                        println!();
                        break;
                    }
                    ReadlineError::Interrupted => {
                        debug!("接收到中断信号...");
                    }
                    err => {
                        error!("发生错误: {}", err);
                        eprintln!(
                            "{} {}",
                            self.theme.error_symbol,
                            (self.theme.error_style)(err.to_string())
                        );
                    }
                },
            }
        }
        Ok(())
    }

    fn handle_input(&self, line: &str) {
        if self.config.show_tokens {
            for token in parser::tokenize(line) {
                println!("  {}", (self.theme.warning_style)(token.to_string()));
            }
        }

        match parser::parse(line) {
            Ok(command) => {
                debug!("解析命令: {:?}", command);
                println!(
                    "{} {}",
                    self.theme.success_symbol,
                    (self.theme.success_style)(describe(&command))
                );
                println!(
                    "{}",
                    (self.theme.warning_style)("Command execution is not implemented".to_string())
                );
            }
            Err(e) => {
                eprintln!(
                    "{} {}",
                    self.theme.error_symbol,
                    (self.theme.error_style)(e.to_string())
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        assert_eq!(builtin("help"), Some(Builtin::Help));
        assert_eq!(builtin("  exit "), Some(Builtin::Exit));
        assert_eq!(builtin("quit"), Some(Builtin::Exit));
        assert_eq!(builtin("exit 1"), None);
        assert_eq!(builtin("ls"), None);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_describe() {
        let command = parser::parse("a; b &").unwrap();
        assert_eq!(describe(&command), "[sequence] a; b &");

        let command = parser::parse("ls -la | grep foo").unwrap();
        assert_eq!(describe(&command), "[pipeline] ls -la | grep foo");
    }
}
