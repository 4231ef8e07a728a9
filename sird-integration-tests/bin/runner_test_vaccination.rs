use clap::Args;
use sird::prelude::*;

#[derive(Args, Debug)]
struct Vaccination {
    /// Name of the population to vaccinate
    #[arg(long)]
    target: String,

    /// Number of people to vaccinate
    #[arg(long)]
    count: f64,

    /// Day on which to vaccinate
    #[arg(long, default_value = "0")]
    on_day: u64,

    #[arg(long, default_value = "1.0")]
    efficacy: f64,
}

fn main() {
    let simulation = run_with_custom_args(|simulation, _args, vaccination: Option<Vaccination>| {
        if let Some(vaccination) = vaccination {
            let population = simulation
                .population_index(&vaccination.target)
                .ok_or_else(|| SirdError::UnknownPopulation(vaccination.target.clone()))?;
            simulation.schedule_vaccination(
                vaccination.on_day,
                VaccinationCampaign {
                    population,
                    count: vaccination.count,
                    efficacy: vaccination.efficacy,
                },
            )?;
        }
        Ok(())
    })
    .unwrap();
    for population in simulation.populations() {
        println!("{} R={:.3}", population.name(), population.recovered());
    }
}
