use approx::assert_abs_diff_eq;
use ndarray::{s, Array1, Array2, Axis};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use regpath::prelude::*;
use regpath_datasets::generate::sparse_regression;
use regpath_elasticnet::{ElasticNet, ElasticNetError};

fn fit<P>(
    params: P,
    dataset: &Dataset<f64, f64>,
    grid: &PenaltyGrid<f64>,
) -> RegularizationPath<f64>
where
    P: Penalized<f64> + Fit<Array2<f64>, Array1<f64>, ElasticNetError, Object = ElasticNet<f64>>
        + Sync,
{
    PathFitter::new(params)
        .fit_path::<f64, ElasticNetError, ElasticNet<f64>>(dataset, grid)
        .unwrap()
}

#[test]
fn ridge_norms_shrink_along_the_grid() {
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let (dataset, _) = sparse_regression(100, 6, 3, 2.0, 0.5, &mut rng);

    let grid = PenaltyGrid::generate(-2.0, 3.0, 20).unwrap();
    let path = fit(ElasticNet::ridge().tolerance(1e-10), &dataset, &grid);

    assert_eq!(path.coefficients().dim(), (6, 20));
    let norms = path.l2_norms();
    for pair in norms.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-6, "{} > {}", pair[1], pair[0]);
    }
    // no coefficient is driven to exactly zero
    assert!(path.active_counts().iter().all(|count| *count == 6));
}

#[test]
fn lasso_above_critical_penalty_is_empty() {
    let mut rng = Xoshiro256Plus::seed_from_u64(7);
    let (dataset, _) = sparse_regression(80, 5, 2, -1.0, 0.3, &mut rng);

    let x = dataset.records();
    let y = dataset.targets();
    let n = y.len() as f64;
    let xc = x - &x.mean_axis(Axis(0)).unwrap();
    let yc = y - y.mean().unwrap();
    let critical = xc
        .t()
        .dot(&yc)
        .iter()
        .fold(0.0f64, |max, v| max.max(v.abs()))
        / n;

    let grid = PenaltyGrid::from_values(vec![critical * 1.01, critical * 2.0]).unwrap();
    let path = fit(ElasticNet::lasso(), &dataset, &grid);

    assert!(path.coefficients().iter().all(|w| *w == 0.0));
    // only the mean is left
    assert_abs_diff_eq!(path.intercepts()[0], y.mean().unwrap(), epsilon = 1e-12);

    let influential = InfluencePolicy::for_kind(RegressionKind::Lasso, 7, 0.0)
        .rank(&path.column(0))
        .unwrap();
    assert!(influential.is_empty());
}

#[test]
fn lasso_pipeline_keeps_informative_features() {
    let mut rng = Xoshiro256Plus::seed_from_u64(3);
    let (dataset, truth) = sparse_regression(300, 10, 3, 0.5, 0.5, &mut rng);
    let (train, test) = dataset.train_test_split(0.3, &mut rng).unwrap();

    let grid = PenaltyGrid::generate(-4.0, 0.0, 40).unwrap();
    let path = fit(ElasticNet::lasso(), &train, &grid);

    let costs = cost_path(&path, test.records(), test.targets(), false).unwrap();
    let selected = select_from_path(&costs, &path).unwrap();

    assert!(costs.iter().all(|c| *c >= selected.cost()));
    assert_eq!(selected.penalty(), grid.as_slice()[selected.index()]);

    let influential = InfluencePolicy::for_kind(path.kind(), 7, 0.0)
        .rank(selected.coefficients())
        .unwrap();
    for informative in 0..3 {
        assert!(influential.contains(&informative));
    }

    // the support only grows when the penalty decreases
    let first = path.active_counts()[0];
    let last = path.active_counts()[grid.len() - 1];
    assert!(first >= last);

    assert_abs_diff_eq!(
        selected.coefficients().slice(s![..3]),
        truth.slice(s![..3]),
        epsilon = 0.3
    );
}

#[test]
fn ridge_pipeline_ranks_informative_features_first() {
    let mut rng = Xoshiro256Plus::seed_from_u64(11);
    let (dataset, _) = sparse_regression(300, 12, 3, 0.0, 0.5, &mut rng);
    let (train, test) = dataset.train_test_split(0.3, &mut rng).unwrap();

    let grid = PenaltyGrid::generate(-2.0, 6.0, 50).unwrap();
    let path = fit(ElasticNet::ridge(), &train, &grid);

    let costs = cost_path(&path, test.records(), test.targets(), false).unwrap();
    let selected = select_from_path(&costs, &path).unwrap();

    let influential = InfluencePolicy::for_kind(RegressionKind::Ridge, 3, 0.0)
        .rank(selected.coefficients())
        .unwrap();
    assert_eq!(influential, vec![0, 1, 2]);
}

#[test]
fn same_seed_selects_the_same_penalty() {
    let run = |seed| {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let (dataset, _) = sparse_regression(120, 8, 4, 1.0, 1.0, &mut rng);
        let (train, test) = dataset.train_test_split(0.3, &mut rng).unwrap();

        let grid = PenaltyGrid::generate(-3.0, 0.0, 25).unwrap();
        let path = fit(ElasticNet::lasso(), &train, &grid);
        let costs = cost_path(&path, test.records(), test.targets(), false).unwrap();
        let selected = select_from_path(&costs, &path).unwrap();

        (path, selected)
    };

    let (path_a, selected_a) = run(5);
    let (path_b, selected_b) = run(5);

    assert_eq!(selected_a.index(), selected_b.index());
    assert_eq!(path_a, path_b);
}

#[test]
fn free_function_follows_penalty_order() {
    let mut rng = Xoshiro256Plus::seed_from_u64(1);
    let (dataset, _) = sparse_regression(60, 4, 2, 0.0, 0.2, &mut rng);

    let forward = regpath_elasticnet::fit_path(
        dataset.records().clone(),
        dataset.targets().clone(),
        &[0.01, 0.1, 1.0],
        RegressionKind::Ridge,
    )
    .unwrap();
    let backward = regpath_elasticnet::fit_path(
        dataset.records().clone(),
        dataset.targets().clone(),
        &[1.0, 0.1, 0.01],
        RegressionKind::Ridge,
    )
    .unwrap();

    assert_abs_diff_eq!(forward.column(0), backward.column(2), epsilon = 1e-12);
    assert_abs_diff_eq!(forward.column(2), backward.column(0), epsilon = 1e-12);

    let res = regpath_elasticnet::fit_path(
        dataset.records().clone(),
        dataset.targets().clone(),
        &[0.1, -1.0],
        RegressionKind::Lasso,
    );
    assert!(matches!(
        res,
        Err(ElasticNetError::BaseCrate(regpath::Error::InvalidArgument(_)))
    ));
}

#[test]
fn ridge_columns_follow_closed_form() {
    let mut rng = Xoshiro256Plus::seed_from_u64(21);
    let (dataset, _) = sparse_regression(50, 1, 1, 0.5, 0.3, &mut rng);

    let x = dataset.records().column(0).to_owned();
    let y = dataset.targets();
    let xc = &x - x.mean().unwrap();
    let yc = y - y.mean().unwrap();

    let grid = PenaltyGrid::from_values(vec![0.1, 10.0, 1000.0]).unwrap();
    let path = fit(ElasticNet::ridge().tolerance(1e-12), &dataset, &grid);

    // the penalty is not divided by the number of samples: w = xᵀy / (xᵀx + penalty)
    for (idx, penalty) in grid.iter().enumerate() {
        let expected = xc.dot(&yc) / (xc.dot(&xc) + penalty);
        assert_abs_diff_eq!(path.coefficients()[[0, idx]], expected, epsilon = 1e-10);
    }
}
