use life_rust::{GameOfLife, Grid, LifeError, Strategy};

const WORKERS: usize = 3;

/// 各戦略で実行し、(世代ごとの生存数, 最終盤面) を返すヘルパー
fn run_all(initial: &Grid, iterations: usize) -> Vec<(Strategy, Vec<usize>, Grid)> {
    Strategy::ALL
        .iter()
        .map(|&strategy| {
            let mut game = GameOfLife::from_grid(initial.clone()).with_workers(WORKERS);
            let mut counts: Vec<usize> = Vec::new();
            game.run(strategy, iterations, &mut counts).unwrap();
            (strategy, counts, game.into_grid())
        })
        .collect()
}

#[test]
fn test_new_rejects_zero_size() {
    assert!(matches!(GameOfLife::new(0), Err(LifeError::InvalidConfiguration(_))));
    let game = GameOfLife::new(16).unwrap();
    assert_eq!(game.size(), 16);
}

#[test]
fn test_two_row_block_scenario() {
    // 2x3 のブロックは1世代後にビーハイブ (6セル) になり、以後変化しない
    let initial = Grid::from_cells(5, &[(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]).unwrap();
    let beehive = Grid::from_cells(5, &[(0, 2), (1, 1), (1, 3), (2, 1), (2, 3), (3, 2)]).unwrap();

    for (strategy, counts, grid) in run_all(&initial, 3) {
        assert_eq!(counts, vec![6, 6, 6], "{strategy}");
        assert_eq!(grid, beehive, "{strategy}");
    }
}

#[test]
fn test_block_still_life() {
    // 角に接したブロックも含めて、2x2 ブロックは変化しない
    let cells = [
        (0, 0), (0, 1), (1, 0), (1, 1),
        (4, 4), (4, 5), (5, 4), (5, 5),
        (8, 8), (8, 9), (9, 8), (9, 9),
    ];
    let initial = Grid::from_cells(10, &cells).unwrap();

    for (strategy, counts, grid) in run_all(&initial, 25) {
        assert_eq!(counts, vec![12; 25], "{strategy}");
        assert_eq!(grid, initial, "{strategy}");
    }
}

#[test]
fn test_blinker_period_two() {
    let horizontal = Grid::from_cells(7, &[(3, 2), (3, 3), (3, 4)]).unwrap();
    let vertical = Grid::from_cells(7, &[(2, 3), (3, 3), (4, 3)]).unwrap();

    for (strategy, counts, grid) in run_all(&horizontal, 1) {
        assert_eq!(counts, vec![3], "{strategy}");
        assert_eq!(grid, vertical, "{strategy}");
    }
    for (strategy, counts, grid) in run_all(&horizontal, 2) {
        assert_eq!(counts, vec![3, 3], "{strategy}");
        assert_eq!(grid, horizontal, "{strategy}");
    }
}

#[test]
fn test_blinker_on_border() {
    // 上端のブリンカーは縦向きになれず、中央の2セルだけが残る
    let initial = Grid::from_cells(5, &[(0, 1), (0, 2), (0, 3)]).unwrap();
    let expected = Grid::from_cells(5, &[(0, 2), (1, 2)]).unwrap();

    for (strategy, counts, grid) in run_all(&initial, 1) {
        assert_eq!(counts, vec![2], "{strategy}");
        assert_eq!(grid, expected, "{strategy}");
    }
}

#[test]
fn test_zero_iterations_leaves_grid_untouched() {
    let initial = Grid::from_cells(6, &[(1, 1), (2, 2), (3, 3), (0, 5)]).unwrap();

    for (strategy, counts, grid) in run_all(&initial, 0) {
        assert!(counts.is_empty(), "{strategy}");
        assert_eq!(grid, initial, "{strategy}");
    }
}

#[test]
fn test_dead_grid_stays_dead() {
    let initial = Grid::new(3).unwrap();

    for (strategy, counts, grid) in run_all(&initial, 10) {
        assert_eq!(counts, vec![0; 10], "{strategy}");
        assert_eq!(grid.alive_count(), 0, "{strategy}");
    }
}

#[test]
fn test_strategies_agree_on_random_grid() {
    let config = life_rust::LifeConfig {
        grid_size: 48,
        iterations: 30,
        threads: 5,
        seed: Some(2024),
        ..Default::default()
    };
    let game = GameOfLife::from_config(&config).unwrap();
    let results = run_all(game.grid(), config.iterations);

    let (_, ref_counts, ref_grid) = &results[0];
    assert_eq!(ref_counts.len(), config.iterations);
    for (strategy, counts, grid) in &results[1..] {
        assert_eq!(counts, ref_counts, "{strategy}");
        assert_eq!(grid, ref_grid, "{strategy}");
    }
}

#[test]
fn test_run_can_be_resumed() {
    // 10世代を一度に実行しても、5世代ずつ2回に分けても同じ結果になる
    let config = life_rust::LifeConfig {
        grid_size: 20,
        seed: Some(11),
        threads: 2,
        ..Default::default()
    };
    let initial = GameOfLife::from_config(&config).unwrap();

    for strategy in Strategy::ALL {
        let mut whole = initial.clone();
        let mut whole_counts: Vec<usize> = Vec::new();
        whole.run(strategy, 10, &mut whole_counts).unwrap();

        let mut split = initial.clone();
        let mut split_counts: Vec<usize> = Vec::new();
        split.run(strategy, 5, &mut split_counts).unwrap();
        split.run(strategy, 5, &mut split_counts).unwrap();

        assert_eq!(whole_counts, split_counts, "{strategy}");
        assert_eq!(whole.grid(), split.grid(), "{strategy}");
    }
}

#[test]
fn test_barrier_rejects_zero_workers() {
    let mut game = GameOfLife::from_grid(Grid::new(4).unwrap()).with_workers(0);
    let mut counts: Vec<usize> = Vec::new();
    assert!(matches!(
        game.run_barrier(1, &mut counts),
        Err(LifeError::InvalidConfiguration(_))
    ));
}
