use life_rust::config::{init_logging, LifeConfig};
use life_rust::{ConsoleSink, GameOfLife, LifeResult, Strategy};

const DEFAULT_SEED: u64 = 0xBEEF_CAFE;

fn main() {
    init_logging();

    // 引数: [strategy|all] [threads] [grid_size] [iterations] [seed]
    let mut args = std::env::args().skip(1);
    let selection = args.next().unwrap_or_else(|| "all".to_string());

    if let Err(err) = run(&selection, args.collect()) {
        eprintln!("error: {err}");
        eprintln!("usage: test_output [serial|parallel|barrier|all] [threads] [grid_size] [iterations] [seed]");
        std::process::exit(1);
    }
}

fn run(selection: &str, rest: Vec<String>) -> LifeResult<()> {
    let mut config = LifeConfig::from_args(rest)?;
    config.seed.get_or_insert(DEFAULT_SEED);

    let strategies: Vec<Strategy> = if selection.eq_ignore_ascii_case("all") {
        Strategy::ALL.to_vec()
    } else {
        vec![selection.parse()?]
    };

    let initial = GameOfLife::from_config(&config)?;
    println!("=== per-generation alive counts ===");
    println!(
        "grid: {0}x{0}, generations: {1}, workers: {2}, initial alive: {3}",
        config.grid_size,
        config.iterations,
        config.threads,
        initial.alive_count()
    );
    println!();

    // 戦略を1つだけ指定した場合は、世代ごとの生存数を1行ずつそのまま出力する
    if let &[strategy] = strategies.as_slice() {
        let mut game = initial;
        game.run(strategy, config.iterations, &mut ConsoleSink::new())?;
        if config.grid_size <= 32 {
            game.grid().print();
        }
        return Ok(());
    }

    let mut outputs = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let mut game = initial.clone();
        let mut counts: Vec<usize> = Vec::with_capacity(config.iterations);
        game.run(strategy, config.iterations, &mut counts)?;

        println!("✓ {strategy}: {counts:?}");
        if config.grid_size <= 32 {
            game.grid().print();
        }
        outputs.push((strategy, counts, game.into_grid()));
    }

    if let Some((reference, ref_counts, ref_grid)) = outputs.first() {
        for (strategy, counts, grid) in &outputs[1..] {
            if counts == ref_counts && grid == ref_grid {
                println!("{strategy} matches {reference}");
            } else {
                println!("{strategy} DIFFERS from {reference}");
            }
        }
    }
    Ok(())
}
