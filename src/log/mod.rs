//! Diagnostic logging: populations created, days simulated, numerical drift. This is separate
//! from the [report](crate::report), which records the model's output.
//!
//! The five `log` macros are re-exported here and at the crate root, so drivers can emit their
//! own messages:
//!
//! ```rust
//! use sird::info;
//!
//! info!("starting the city scenario");
//! ```
//!
//! Nothing is printed until a level is chosen, either with `--log-level <level>` on a runner or
//! with [`set_log_level`]. Some modules are capped below the chosen level; see [`module_level`].
#[cfg(feature = "logging")]
mod standard_logger;

pub use log::{debug, error, info, trace, warn, LevelFilter};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

/// Modules that never log more verbosely than the given level. The quarantine module traces one
/// message per cohort per day.
const MODULE_CAPS: [(&str, LevelFilter); 1] = [("sird::quarantine", LevelFilter::Info)];

static LOGGER: LazyLock<Mutex<LoggerState>> = LazyLock::new(Mutex::default);

/// The level chosen by the user and, with the `logging` feature, the installed `log4rs` logger.
struct LoggerState {
    level: LevelFilter,
    #[cfg(feature = "logging")]
    handle: Option<log4rs::Handle>,
}

impl Default for LoggerState {
    fn default() -> Self {
        LoggerState {
            level: LevelFilter::Off,
            #[cfg(feature = "logging")]
            handle: None,
        }
    }
}

#[cfg(not(feature = "logging"))]
impl LoggerState {
    fn apply(&mut self) {
        log::set_max_level(self.level);
    }
}

fn logger_state() -> MutexGuard<'static, LoggerState> {
    // The state is a plain level and handle, so it stays usable after a panic elsewhere.
    LOGGER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sets the global log level. `LevelFilter::Off`, the default, silences every module.
pub fn set_log_level(level: LevelFilter) {
    let mut state = logger_state();
    state.level = level;
    state.apply();
}

/// The level last passed to [`set_log_level`].
#[must_use]
pub fn log_level() -> LevelFilter {
    logger_state().level
}

/// The level messages from `module` are filtered at when the global level is `level`: the global
/// level itself, lowered to the module's cap if it has one.
#[must_use]
pub fn module_level(module: &str, level: LevelFilter) -> LevelFilter {
    MODULE_CAPS
        .iter()
        .find(|(capped, _)| *capped == module)
        .map_or(level, |&(_, cap)| level.min(cap))
}
