//! Cross-population transmission.
//!
//! Each day, after every population has advanced on its own, [`cross_infect`] exposes the
//! susceptibles of every population to the active infected of every other population. Population
//! `j` sends the `cross_infectivity` share of its active infected to each other population `i`,
//! which gains
//!
//! ```text
//! S_i * cross_infectivity_j * active_j / N_i
//! ```
//!
//! new infections from it. All exposures are computed from the state at the start of the pass
//! and only then applied, so the order of the populations does not matter.

use crate::log::trace;
use crate::population::Population;

/// Computes the number of people each population would move from susceptible to infected through
/// contact with the others. Does not modify anything.
#[must_use]
pub fn cross_infection_deltas(populations: &[Population]) -> Vec<f64> {
    let active_infected: Vec<f64> = populations
        .iter()
        .map(Population::active_infected)
        .collect();

    populations
        .iter()
        .enumerate()
        .map(|(i, target)| {
            populations
                .iter()
                .zip(&active_infected)
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, (source, active))| {
                    (target.susceptible() * source.cross_infectivity() * active) / target.size()
                })
                .fold(0.0, |total, exposure| total + exposure)
        })
        .collect()
}

/// Applies one day of cross-population exposure to `populations`. A no-op for fewer than two
/// populations.
pub fn cross_infect(populations: &mut [Population]) {
    let deltas = cross_infection_deltas(populations);
    for (population, delta) in populations.iter_mut().zip(deltas) {
        trace!("`{}`: {} infected by other populations", population.name(), delta);
        population.expose(delta);
    }
}
