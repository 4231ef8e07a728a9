//! The driver that owns a set of populations and advances them one day at a time.
//!
//! A day consists of three strictly sequential phases:
//! 1. Vaccination campaigns due on the current day are applied.
//! 2. Every population advances on its own ([`Population::advance`]).
//! 3. Cross-population exposure is applied once across all populations
//!    ([`cross_infect`]).
//!
//! After each day a [`DailySnapshot`] of every population's compartments is appended to the
//! simulation's history, which is the only output of a run. The history starts with a snapshot of
//! the initial state on day 0.
use serde::{Deserialize, Serialize};

use crate::coupler::cross_infect;
use crate::error::{ParameterError, SirdError};
use crate::log::{debug, info, trace};
use crate::plan::{PlanId, Queue};
use crate::population::{Compartments, Population};

/// A vaccination to be applied to one population.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaccinationCampaign {
    /// Index of the population in the simulation
    pub population: usize,
    pub count: f64,
    #[serde(default = "default_efficacy")]
    pub efficacy: f64,
}

fn default_efficacy() -> f64 {
    1.0
}

/// The compartments of every population at the end of a day.
#[derive(Clone, Debug, PartialEq)]
pub struct DailySnapshot {
    pub day: u64,
    /// Compartments of each population, in simulation order
    pub populations: Vec<Compartments>,
    /// Active infected of each population, in simulation order
    pub active_infected: Vec<f64>,
    /// The sum over all populations
    pub total: Compartments,
}

impl DailySnapshot {
    fn capture(day: u64, populations: &[Population]) -> Self {
        let compartments: Vec<Compartments> =
            populations.iter().map(Population::compartments).collect();
        let total = compartments
            .iter()
            .fold(Compartments::default(), |total, c| total + *c);
        DailySnapshot {
            day,
            populations: compartments,
            active_infected: populations.iter().map(Population::active_infected).collect(),
            total,
        }
    }
}

#[derive(Debug)]
pub struct Simulation {
    populations: Vec<Population>,
    vaccination_queue: Queue<VaccinationCampaign>,
    history: Vec<DailySnapshot>,
    day: u64,
}

impl Simulation {
    #[must_use]
    pub fn new(populations: Vec<Population>) -> Simulation {
        let history = vec![DailySnapshot::capture(0, &populations)];
        Simulation {
            populations,
            vaccination_queue: Queue::new(),
            history,
            day: 0,
        }
    }

    /// The number of days simulated so far.
    #[must_use]
    pub fn day(&self) -> u64 {
        self.day
    }

    #[must_use]
    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    #[must_use]
    pub fn population(&self, index: usize) -> Option<&Population> {
        self.populations.get(index)
    }

    /// Returns the index of the first population with the given name.
    #[must_use]
    pub fn population_index(&self, name: &str) -> Option<usize> {
        self.populations
            .iter()
            .position(|population| population.name() == name)
    }

    /// One snapshot per simulated day, starting with the initial state.
    #[must_use]
    pub fn history(&self) -> &[DailySnapshot] {
        &self.history
    }

    /// The current compartments summed over all populations.
    #[must_use]
    pub fn totals(&self) -> Compartments {
        self.populations
            .iter()
            .fold(Compartments::default(), |total, population| {
                total + population.compartments()
            })
    }

    /// Schedules a vaccination campaign to be applied at the start of `day`, before the
    /// populations advance. A campaign scheduled for the current day is applied by the next call
    /// to [`Simulation::step`].
    ///
    /// # Errors
    ///
    /// Returns an error if `day` has already been simulated, if the campaign refers to a
    /// population that does not exist, or if its count or efficacy are invalid.
    pub fn schedule_vaccination(
        &mut self,
        day: u64,
        campaign: VaccinationCampaign,
    ) -> Result<PlanId, SirdError> {
        if day < self.day {
            return Err(SirdError::SirdError(format!(
                "cannot schedule a vaccination on day {day}, the simulation is on day {}",
                self.day
            )));
        }
        if campaign.population >= self.populations.len() {
            return Err(SirdError::UnknownPopulation(campaign.population.to_string()));
        }
        ParameterError::check_non_negative("vaccination count", campaign.count)?;
        ParameterError::check_proportion("vaccine efficacy", campaign.efficacy)?;
        trace!("scheduled {campaign:?} for day {day}");
        Ok(self.vaccination_queue.add_plan(day, campaign))
    }

    /// Cancels a scheduled campaign. Returns the campaign if it had not been applied yet.
    pub fn cancel_vaccination(&mut self, id: PlanId) -> Option<VaccinationCampaign> {
        self.vaccination_queue.cancel_plan(&id)
    }

    /// Simulates one day.
    ///
    /// # Errors
    ///
    /// Campaigns are validated when scheduled, so applying them does not fail in practice; any
    /// error is propagated before the populations advance.
    pub fn step(&mut self) -> Result<(), SirdError> {
        while let Some(plan) = self.vaccination_queue.get_next_plan_due(self.day) {
            let campaign = plan.data;
            let population = self
                .populations
                .get_mut(campaign.population)
                .ok_or_else(|| SirdError::UnknownPopulation(campaign.population.to_string()))?;
            population.apply_vaccination(campaign.count, campaign.efficacy)?;
        }

        for population in &mut self.populations {
            population.advance();
        }
        cross_infect(&mut self.populations);

        self.day += 1;
        let snapshot = DailySnapshot::capture(self.day, &self.populations);
        debug!(
            "day {}: S={} I={} R={} D={}",
            self.day,
            snapshot.total.susceptible,
            snapshot.total.infected,
            snapshot.total.recovered,
            snapshot.total.deceased
        );
        self.history.push(snapshot);
        Ok(())
    }

    /// Simulates `days` days.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`Simulation::step`].
    pub fn run(&mut self, days: u64) -> Result<(), SirdError> {
        info!(
            "running {} populations for {days} days from day {}",
            self.populations.len(),
            self.day
        );
        for _ in 0..days {
            self.step()?;
        }
        let totals = self.totals();
        info!(
            "finished on day {}: S={} I={} R={} D={}",
            self.day, totals.susceptible, totals.infected, totals.recovered, totals.deceased
        );
        Ok(())
    }
}
