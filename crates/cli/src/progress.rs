use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Kinds of waits the CLI shows a spinner for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressType {
    /// Local work: storage reads, PDF rendering
    Local,
    /// One or more calls to the generative API
    Generation,
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub spinner_chars: &'static str,
    pub tick_interval: Duration,
    pub color: &'static str,
}

impl ProgressType {
    pub fn config(self) -> ProgressConfig {
        match self {
            ProgressType::Local => ProgressConfig {
                spinner_chars: "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
                tick_interval: Duration::from_millis(80),
                color: "cyan",
            },
            ProgressType::Generation => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠒⠂⠂⠒⠲⠴⠦⠖⠒⠐⠐⠒⠓⠋",
                tick_interval: Duration::from_millis(150),
                color: "yellow",
            },
        }
    }

    pub fn create_spinner(self, message: &str) -> AdaptiveSpinner {
        let config = self.config();
        let spinner = ProgressBar::new_spinner();

        let template = format!("{{spinner:.{}}} {{msg}}", config.color);
        let style = ProgressStyle::default_spinner()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(config.spinner_chars);
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(config.tick_interval);

        AdaptiveSpinner { spinner, config }
    }
}

pub struct AdaptiveSpinner {
    spinner: ProgressBar,
    config: ProgressConfig,
}

impl AdaptiveSpinner {
    pub fn set_message(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    pub fn finish_success(&self, message: &str) {
        let msg = format!("✓ {message}");
        let colored_msg = match self.config.color {
            "cyan" => msg.cyan().to_string(),
            "yellow" => msg.yellow().to_string(),
            _ => msg.green().to_string(),
        };
        self.spinner.finish_with_message(colored_msg);
    }

    pub fn finish_error(&self, message: &str) {
        self.spinner
            .finish_with_message(format!("✗ {message}").red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}
