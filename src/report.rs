use crate::error::SirdError;
use crate::simulation::Simulation;
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

/// The `population` column value of the rows that sum over all populations.
pub const TOTAL_ROW: &str = "total";

/// One row of the time series report: the state of one population (or of all populations
/// together) at the end of one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub day: u64,
    pub population: String,
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
    pub deceased: f64,
    pub active_infected: f64,
}

// Checks that the path is valid. Creates the file and all parent directories if
// they do not exist. Returns the file if successful. Called by `write_report`
fn generate_validate_filepath(path: &Path) -> Result<File, SirdError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            Ok(file)
        }
        _ => Err(SirdError::ReportError(
            "Report output files must be CSVs at this time".to_string(),
        )),
    }
}

pub trait SimulationReportExt {
    /// Flattens the simulation history into report rows: for every recorded day, one row per
    /// population in simulation order followed by a `total` row.
    fn report_rows(&self) -> Vec<ReportRow>;

    /// Writes the report rows to a CSV file at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns a `SirdError` if the path does not name a CSV file or the file cannot be written.
    fn write_report(&self, path: &Path) -> Result<(), SirdError>;
}

impl SimulationReportExt for Simulation {
    fn report_rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::with_capacity(self.history().len() * (self.populations().len() + 1));
        for snapshot in self.history() {
            for ((population, compartments), active_infected) in self
                .populations()
                .iter()
                .zip(&snapshot.populations)
                .zip(&snapshot.active_infected)
            {
                rows.push(ReportRow {
                    day: snapshot.day,
                    population: population.name().to_string(),
                    susceptible: compartments.susceptible,
                    infected: compartments.infected,
                    recovered: compartments.recovered,
                    deceased: compartments.deceased,
                    active_infected: *active_infected,
                });
            }
            rows.push(ReportRow {
                day: snapshot.day,
                population: TOTAL_ROW.to_string(),
                susceptible: snapshot.total.susceptible,
                infected: snapshot.total.infected,
                recovered: snapshot.total.recovered,
                deceased: snapshot.total.deceased,
                active_infected: snapshot.active_infected.iter().sum(),
            });
        }
        rows
    }

    fn write_report(&self, path: &Path) -> Result<(), SirdError> {
        let file = generate_validate_filepath(path)?;
        let mut writer = Writer::from_writer(file);
        for row in self.report_rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::population::PopulationParameters;
    use crate::scenario::Scenario;
    use tempfile::tempdir;

    fn simulation(days: u64) -> Simulation {
        let mut simulation = Scenario::default().build().unwrap();
        simulation.run(days).unwrap();
        simulation
    }

    #[test]
    fn rows_cover_every_day_and_population() {
        let simulation = simulation(3);
        let rows = simulation.report_rows();
        assert_eq!(rows.len(), 4 * 3);
        let names: Vec<&str> = rows[..3].iter().map(|row| row.population.as_str()).collect();
        assert_eq!(names, vec!["group1", "group2", TOTAL_ROW]);
        assert_eq!(rows[0].day, 0);
        assert_eq!(rows[0].susceptible, 9_999.0);
        assert_eq!(rows[2].susceptible, 9_999.0 + 999.0);
        assert_eq!(rows[11].day, 3);
    }

    #[test]
    fn write_and_read_report() {
        let simulation = simulation(10);
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested").join("sird_report.csv");
        simulation.write_report(&file_path).unwrap();
        assert!(file_path.exists(), "CSV file should exist");

        let mut reader = csv::Reader::from_path(&file_path).unwrap();
        let records: Vec<ReportRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records, simulation.report_rows());
    }

    #[test]
    fn only_csvs_allowed() {
        let temp_dir = tempdir().unwrap();
        let res = generate_validate_filepath(&temp_dir.path().join("sird_report.tsv"));
        match res {
            Ok(_) => panic!("Other file types beyond CSV are not allowed (yet)"),
            Err(SirdError::ReportError(message)) => {
                assert_eq!(message, "Report output files must be CSVs at this time");
            }
            Err(error) => panic!("Unexpected error {error:?}"),
        }
    }

    #[test]
    fn single_population_report() {
        let population = PopulationParameters::new(100.0, 0.2, 0.1, 0.0, 0.0)
            .name("village")
            .build()
            .unwrap();
        let mut simulation = Simulation::new(vec![population]);
        simulation.step().unwrap();
        let rows = simulation.report_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].population, "village");
        assert_eq!(rows[2].infected, rows[3].infected);
    }
}
