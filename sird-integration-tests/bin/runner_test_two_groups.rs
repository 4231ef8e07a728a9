use sird::prelude::*;

fn main() {
    let simulation = run_with_args(|_simulation, _args, _| Ok(())).unwrap();
    let totals = simulation.totals();
    println!(
        "day={} S={:.3} I={:.3} R={:.3} D={:.3}",
        simulation.day(),
        totals.susceptible,
        totals.infected,
        totals.recovered,
        totals.deceased
    );
}
