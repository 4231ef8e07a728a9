//! A single population group and its discrete-time SIRD update.
//!
//! A [`Population`] holds real valued Susceptible, Infected, Recovered and Deceased compartments
//! together with a [`QuarantineSchedule`] that staggers when newly infected individuals begin to
//! transmit. Populations are described by [`PopulationParameters`], which are validated when the
//! population is built:
//!
//! ```rust
//! use sird::population::PopulationParameters;
//!
//! let mut population = PopulationParameters::new(10_000.0, 0.5, 0.1, 0.01, 0.1)
//!     .quarantine_leak(0.25)
//!     .quarantine_length(21)
//!     .build()
//!     .unwrap();
//! population.advance();
//! assert_eq!(population.day(), 1);
//! ```
//!
//! Only intra-population transmission happens in [`Population::advance`]. Exposure to other
//! populations is applied separately by [`crate::coupler::cross_infect`].
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, SirdError};
use crate::log::{debug, trace, warn};
use crate::quarantine::{QuarantineSchedule, MAX_QUARANTINE_LENGTH};

fn default_name() -> String {
    "population".to_string()
}

fn default_infected() -> bool {
    true
}

fn default_quarantine_leak() -> f64 {
    1.0
}

fn default_quarantine_length() -> u64 {
    1
}

/// The fixed parameters of a population. Rates are per day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationParameters {
    #[serde(default = "default_name")]
    pub name: String,
    /// Total population size `N`. Held constant for the whole run.
    pub size: f64,
    /// Transmission rate
    pub beta: f64,
    /// Recovery rate
    pub gamma: f64,
    /// Death rate
    pub mu: f64,
    /// Proportion of this population's effective contacts that reach other populations.
    pub cross_infectivity: f64,
    /// Whether the population starts with a single infected individual.
    #[serde(default = "default_infected")]
    pub infected: bool,
    #[serde(default = "default_quarantine_leak")]
    pub quarantine_leak: f64,
    #[serde(default = "default_quarantine_length")]
    pub quarantine_length: u64,
}

impl PopulationParameters {
    /// Parameters for an initially infected population with a one day, fully leaking quarantine.
    #[must_use]
    pub fn new(size: f64, beta: f64, gamma: f64, mu: f64, cross_infectivity: f64) -> Self {
        PopulationParameters {
            name: default_name(),
            size,
            beta,
            gamma,
            mu,
            cross_infectivity,
            infected: default_infected(),
            quarantine_leak: default_quarantine_leak(),
            quarantine_length: default_quarantine_length(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn infected(mut self, infected: bool) -> Self {
        self.infected = infected;
        self
    }

    #[must_use]
    pub fn quarantine_leak(mut self, quarantine_leak: f64) -> Self {
        self.quarantine_leak = quarantine_leak;
        self
    }

    #[must_use]
    pub fn quarantine_length(mut self, quarantine_length: u64) -> Self {
        self.quarantine_length = quarantine_length;
        self
    }

    /// Checks every parameter against the range the model is defined for.
    ///
    /// # Errors
    ///
    /// Returns [`SirdError::InvalidParameter`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), SirdError> {
        ParameterError::check_positive("size", self.size)?;
        // The seed infection is taken out of the susceptible compartment.
        if self.infected && self.size < 1.0 {
            return Err(
                ParameterError::new("size", self.size, "at least 1 for an infected population")
                    .into(),
            );
        }
        ParameterError::check_non_negative("beta", self.beta)?;
        ParameterError::check_non_negative("gamma", self.gamma)?;
        ParameterError::check_non_negative("mu", self.mu)?;
        ParameterError::check_non_negative("cross_infectivity", self.cross_infectivity)?;
        ParameterError::check_proportion("quarantine_leak", self.quarantine_leak)?;
        // Otherwise the infected compartment loses more than all of its members in one day.
        ParameterError::check_proportion("gamma + mu", self.gamma + self.mu)?;
        if self.quarantine_length > MAX_QUARANTINE_LENGTH {
            #[allow(clippy::cast_precision_loss)]
            let length = self.quarantine_length as f64;
            return Err(ParameterError::new(
                "quarantine_length",
                length,
                "at most 36500 days",
            )
            .into());
        }
        Ok(())
    }

    /// Validates the parameters and creates the population.
    ///
    /// # Errors
    ///
    /// Returns [`SirdError::InvalidParameter`] if validation fails.
    pub fn build(self) -> Result<Population, SirdError> {
        self.validate()?;
        Ok(Population::new_unchecked(self))
    }
}

/// A snapshot of the four compartments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Compartments {
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
    pub deceased: f64,
}

impl Compartments {
    /// `S + I + R + D`. Not guaranteed to equal the population size: vaccination with an efficacy
    /// below one removes people from `S` without crediting `R`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.recovered + self.deceased
    }
}

impl Add for Compartments {
    type Output = Compartments;

    fn add(self, other: Compartments) -> Compartments {
        Compartments {
            susceptible: self.susceptible + other.susceptible,
            infected: self.infected + other.infected,
            recovered: self.recovered + other.recovered,
            deceased: self.deceased + other.deceased,
        }
    }
}

/// One population group. Owned by the driver for the duration of a run.
#[derive(Clone, Debug)]
pub struct Population {
    parameters: PopulationParameters,
    susceptible: f64,
    infected: f64,
    recovered: f64,
    deceased: f64,
    day: u64,
    quarantine: QuarantineSchedule,
}

impl Population {
    fn new_unchecked(parameters: PopulationParameters) -> Self {
        let (susceptible, infected) = if parameters.infected {
            (parameters.size - 1.0, 1.0)
        } else {
            (parameters.size, 0.0)
        };
        let quarantine = QuarantineSchedule::new(
            infected,
            parameters.quarantine_leak,
            parameters.quarantine_length,
        );
        debug!(
            "created population `{}` of size {} (infected: {})",
            parameters.name, parameters.size, parameters.infected
        );
        Population {
            parameters,
            susceptible,
            infected,
            recovered: 0.0,
            deceased: 0.0,
            day: 0,
            quarantine,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &PopulationParameters {
        &self.parameters
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.parameters.name
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.parameters.size
    }

    #[must_use]
    pub fn cross_infectivity(&self) -> f64 {
        self.parameters.cross_infectivity
    }

    #[must_use]
    pub fn susceptible(&self) -> f64 {
        self.susceptible
    }

    #[must_use]
    pub fn infected(&self) -> f64 {
        self.infected
    }

    #[must_use]
    pub fn recovered(&self) -> f64 {
        self.recovered
    }

    #[must_use]
    pub fn deceased(&self) -> f64 {
        self.deceased
    }

    /// The number of times [`Population::advance`] has been called.
    #[must_use]
    pub fn day(&self) -> u64 {
        self.day
    }

    #[must_use]
    pub fn quarantine(&self) -> &QuarantineSchedule {
        &self.quarantine
    }

    #[must_use]
    pub fn compartments(&self) -> Compartments {
        Compartments {
            susceptible: self.susceptible,
            infected: self.infected,
            recovered: self.recovered,
            deceased: self.deceased,
        }
    }

    /// Number of infected able to transmit today, accounting for quarantine and its leak.
    #[must_use]
    pub fn active_infected(&self) -> f64 {
        self.quarantine.active(self.day)
    }

    /// Advances the population by one day.
    ///
    /// New infections are driven by today's active infected, computed before the quarantine
    /// cohorts age. Recovery and death are driven by the whole infected compartment. The day's
    /// new infections are admitted to quarantine after the existing cohorts have aged, so a new
    /// cohort is not aged on the day it is created.
    pub fn advance(&mut self) {
        let PopulationParameters {
            size,
            beta,
            gamma,
            mu,
            ..
        } = self.parameters;

        let active_infected = self.active_infected();
        self.quarantine.age(gamma, mu);

        let new_infected = (beta * self.susceptible * active_infected) / size;
        let recovered = gamma * self.infected;
        let dead = mu * self.infected;

        let change_susceptible = -new_infected;
        let change_infected = new_infected - recovered - dead;

        self.day += 1;
        self.quarantine.admit(self.day, new_infected);

        self.susceptible += change_susceptible;
        self.infected += change_infected;
        self.recovered += recovered;
        self.deceased += dead;

        trace!(
            "`{}` day {}: {} new infections, {} recovered, {} dead",
            self.parameters.name,
            self.day,
            new_infected,
            recovered,
            dead
        );
        self.warn_on_drift();
    }

    /// Moves up to `count` people out of the susceptible compartment. Only the `efficacy` share of
    /// them is credited to the recovered compartment; the rest leave the model.
    ///
    /// # Errors
    ///
    /// Returns [`SirdError::InvalidParameter`] if `count` is negative or not finite, or if
    /// `efficacy` is not in `[0, 1]`. The population is unchanged in that case.
    pub fn apply_vaccination(&mut self, count: f64, efficacy: f64) -> Result<(), SirdError> {
        ParameterError::check_non_negative("vaccination count", count)?;
        ParameterError::check_proportion("vaccine efficacy", efficacy)?;

        let vaccinated = count.min(self.susceptible);
        let effective = efficacy * vaccinated;
        self.susceptible -= vaccinated;
        self.recovered += effective;
        debug!(
            "`{}` day {}: vaccinated {} ({} effective)",
            self.parameters.name, self.day, vaccinated, effective
        );
        Ok(())
    }

    /// Moves `amount` people from susceptible to infected as a result of contact with other
    /// populations. These infections bypass quarantine.
    pub(crate) fn expose(&mut self, amount: f64) {
        self.susceptible -= amount;
        self.infected += amount;
    }

    fn warn_on_drift(&self) {
        let compartments = self.compartments();
        for (label, value) in [
            ("susceptible", compartments.susceptible),
            ("infected", compartments.infected),
            ("recovered", compartments.recovered),
            ("deceased", compartments.deceased),
        ] {
            if !value.is_finite() || value < 0.0 {
                warn!(
                    "`{}` day {}: {label} compartment drifted to {value}",
                    self.parameters.name, self.day
                );
            }
        }
    }
}
