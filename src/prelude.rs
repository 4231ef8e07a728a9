pub use crate::assert_almost_eq;
pub use crate::coupler::{cross_infect, cross_infection_deltas};
pub use crate::error::{ParameterError, SirdError};
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::plan::PlanId;
pub use crate::population::{Compartments, Population, PopulationParameters};
pub use crate::report::SimulationReportExt;
pub use crate::runner::{run_with_args, run_with_custom_args, BaseArgs};
pub use crate::scenario::{Scenario, ScheduledVaccination};
pub use crate::simulation::{DailySnapshot, Simulation, VaccinationCampaign};
