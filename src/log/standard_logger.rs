//! Installs a `log4rs` logger writing to standard error.
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use super::{module_level, LoggerState, MODULE_CAPS};

// ISO 8601 timestamp, color coded level, module path
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";
const APPENDER: &str = "stderr";

impl LoggerState {
    fn config(&self) -> Result<Config, log4rs::config::runtime::ConfigErrors> {
        let stderr = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        let mut builder =
            Config::builder().appender(Appender::builder().build(APPENDER, Box::new(stderr)));
        for (module, _) in MODULE_CAPS {
            let level = module_level(module, self.level);
            builder = builder.logger(Logger::builder().build(module, level));
        }
        builder.build(Root::builder().appender(APPENDER).build(self.level))
    }

    /// Brings the installed logger in line with `self.level`, installing it on first use.
    pub(super) fn apply(&mut self) {
        let config = match self.config() {
            Ok(config) => config,
            Err(errors) => {
                eprintln!("sird: invalid logging configuration: {errors}");
                return;
            }
        };
        match &self.handle {
            Some(handle) => handle.set_config(config),
            None => match log4rs::init_config(config) {
                Ok(handle) => self.handle = Some(handle),
                // Another logger was installed by the host program; defer to it.
                Err(error) => eprintln!("sird: logging not initialized: {error}"),
            },
        }
    }
}
