use std::error::Error;

use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use regpath::ParamGuard;
use regpath_analysis::{AnalysisParams, RegularizationAnalysis};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // synthetic stand-in for the campaign data, seeded for reproducible reports
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let dataset = regpath_datasets::bank_marketing(4000, &mut rng);
    info!(
        "generated {} clients with {} features",
        dataset.nsamples(),
        dataset.nfeatures()
    );

    for params in vec![AnalysisParams::ridge(), AnalysisParams::lasso()] {
        let analysis = RegularizationAnalysis::new(params.check()?);
        let report = analysis.run(&dataset)?;

        info!("{} analysis finished\n{}", report.kind(), report);

        let trajectory_ends = report
            .influential
            .iter()
            .zip(&report.influential_names)
            .map(|(idx, name)| {
                let trajectory = report.path.trajectory(*idx);
                format!(
                    "{}: {:.3} -> {:.3}",
                    name,
                    trajectory[0],
                    trajectory[trajectory.len() - 1]
                )
            })
            .collect::<Vec<_>>();
        info!("coefficient trajectories along the grid: {:?}", trajectory_ends);
    }

    Ok(())
}
