//! Scenario files describe a complete run: the populations, the number of days and any
//! vaccination campaigns. They are JSON documents such as
//!
//! ```json
//! {
//!   "days": 100,
//!   "populations": [
//!     { "name": "city", "size": 10000, "beta": 0.5, "gamma": 0.1, "mu": 0.01,
//!       "cross_infectivity": 0.1, "quarantine_leak": 0.25, "quarantine_length": 21 },
//!     { "name": "town", "size": 1000, "beta": 0.3, "gamma": 0.1, "mu": 0.01,
//!       "cross_infectivity": 0.1, "infected": false }
//!   ],
//!   "vaccinations": [
//!     { "day": 30, "population": "town", "count": 250, "efficacy": 0.9 }
//!   ]
//! }
//! ```
//!
//! Population fields that are omitted take the defaults documented on
//! [`PopulationParameters`].
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SirdError;
use crate::log::info;
use crate::population::PopulationParameters;
use crate::simulation::{Simulation, VaccinationCampaign};

fn default_days() -> u64 {
    100
}

fn default_efficacy() -> f64 {
    1.0
}

/// A vaccination campaign that refers to its population by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledVaccination {
    pub day: u64,
    pub population: String,
    pub count: f64,
    #[serde(default = "default_efficacy")]
    pub efficacy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_days")]
    pub days: u64,
    pub populations: Vec<PopulationParameters>,
    #[serde(default)]
    pub vaccinations: Vec<ScheduledVaccination>,
}

impl Default for Scenario {
    /// Two connected groups of 10,000 and 1,000 people, each seeded with a single infection,
    /// simulated for 100 days.
    fn default() -> Self {
        Scenario {
            days: default_days(),
            populations: vec![
                PopulationParameters::new(10_000.0, 0.5, 0.1, 0.01, 0.1).name("group1"),
                PopulationParameters::new(1_000.0, 0.3, 0.1, 0.01, 0.1).name("group2"),
            ],
            vaccinations: Vec::new(),
        }
    }
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not describe a scenario.
    pub fn from_json_file(path: &Path) -> Result<Scenario, SirdError> {
        info!("Loading scenario from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_json::from_reader(reader)?;
        Ok(scenario)
    }

    /// Builds the populations and schedules the vaccination campaigns.
    ///
    /// # Errors
    ///
    /// Returns an error if any population parameters are invalid, if two populations share a
    /// name, or if a campaign names a population that is not part of the scenario or has an
    /// invalid count or efficacy.
    pub fn build(&self) -> Result<Simulation, SirdError> {
        let mut names = HashSet::new();
        for parameters in &self.populations {
            if !names.insert(parameters.name.as_str()) {
                return Err(SirdError::DuplicatePopulation(parameters.name.clone()));
            }
        }

        let populations = self
            .populations
            .iter()
            .cloned()
            .map(PopulationParameters::build)
            .collect::<Result<Vec<_>, _>>()?;
        let mut simulation = Simulation::new(populations);

        for vaccination in &self.vaccinations {
            let population = simulation
                .population_index(&vaccination.population)
                .ok_or_else(|| SirdError::UnknownPopulation(vaccination.population.clone()))?;
            simulation.schedule_vaccination(
                vaccination.day,
                VaccinationCampaign {
                    population,
                    count: vaccination.count,
                    efficacy: vaccination.efficacy,
                },
            )?;
        }
        Ok(simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn load_scenario_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join("quarantined_groups.json");
        let scenario = Scenario::from_json_file(&path).unwrap();
        assert_eq!(scenario.days, 60);
        assert_eq!(scenario.populations.len(), 2);
        assert_eq!(scenario.populations[0].quarantine_length, 21);
        assert_eq!(scenario.populations[0].quarantine_leak, 0.25);
        assert!(!scenario.populations[1].infected);
        assert_eq!(scenario.vaccinations[0].population, "town");

        let simulation = scenario.build().unwrap();
        assert_eq!(simulation.populations().len(), 2);
        assert_eq!(simulation.population(0).unwrap().name(), "city");
    }

    #[test]
    fn defaults_are_filled_in() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"populations": [{"size": 100, "beta": 0.2, "gamma": 0.1, "mu": 0.0, "cross_infectivity": 0.0}]}"#,
        )
        .unwrap();
        assert_eq!(scenario.days, 100);
        assert!(scenario.vaccinations.is_empty());
        assert_eq!(scenario.populations[0].quarantine_length, 1);
        assert!(scenario.populations[0].infected);
    }

    #[test]
    fn unknown_vaccination_target() {
        let mut scenario = Scenario::default();
        scenario.vaccinations.push(ScheduledVaccination {
            day: 3,
            population: "nowhere".to_string(),
            count: 10.0,
            efficacy: 1.0,
        });
        assert!(matches!(
            scenario.build(),
            Err(SirdError::UnknownPopulation(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn invalid_population_is_reported() {
        let mut scenario = Scenario::default();
        scenario.populations[1].quarantine_leak = 3.0;
        assert!(matches!(
            scenario.build(),
            Err(SirdError::InvalidParameter(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"populations": [
                {"size": 100, "beta": 0.2, "gamma": 0.1, "mu": 0.0, "cross_infectivity": 0.0},
                {"size": 50, "beta": 0.2, "gamma": 0.1, "mu": 0.0, "cross_infectivity": 0.0}
            ]}"#,
        )
        .unwrap();
        match scenario.build() {
            Err(SirdError::DuplicatePopulation(name)) => assert_eq!(name, "population"),
            other => panic!("expected a duplicate name error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"populations\": 3}}").unwrap();
        assert!(matches!(
            Scenario::from_json_file(file.path()),
            Err(SirdError::JsonError(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Scenario::from_json_file(Path::new("does/not/exist.json")),
            Err(SirdError::IoError(_))
        ));
    }
}
