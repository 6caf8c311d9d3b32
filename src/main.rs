use std::time::{Duration, Instant};

use life_rust::config::{init_logging, LifeConfig};
use life_rust::grid::WARMUP_STEPS;
use life_rust::{GameOfLife, LifeResult, NullSink, Strategy};

const BENCH_ITERATIONS: usize = 15;
const BENCH_WARMUP: usize = 3;

fn main() {
    init_logging();

    // 引数: [threads] [grid_size] [iterations] [seed]
    let config = LifeConfig::from_args(std::env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        eprintln!("usage: life_rust [threads] [grid_size] [iterations] [seed]");
        std::process::exit(1);
    });

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &LifeConfig) -> LifeResult<()> {
    // Rayonのスレッド数を設定
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build_global()?;

    // 全戦略で同じ初期盤面を使う
    let seed = config.seed.unwrap_or(0x5EED_1234_ABCD_EF01);
    let initial = GameOfLife::from_config(&LifeConfig {
        seed: Some(seed),
        ..config.clone()
    })?;

    println!("=== Game of Life benchmark ===");
    println!(
        "grid: {0}x{0}, generations: {1}, trials: {2}, threads: {3}, seed: {4:#x}",
        config.grid_size, config.iterations, BENCH_ITERATIONS, config.threads, seed
    );
    println!("initial alive cells: {}\n", initial.alive_count());

    for strategy in Strategy::ALL {
        run_benchmark(strategy, || run_strategy(&initial, strategy, config.iterations))?;
    }

    println!("=== done ===");
    Ok(())
}

fn run_benchmark<F>(strategy: Strategy, mut bench_fn: F) -> LifeResult<()>
where
    F: FnMut() -> LifeResult<(Duration, usize)>,
{
    println!("{strategy}:");

    // ウォームアップ
    for _ in 0..BENCH_WARMUP {
        bench_fn()?;
        std::thread::sleep(Duration::from_millis(100));
    }

    let mut times = Vec::with_capacity(BENCH_ITERATIONS);
    let mut final_alive = 0;
    for i in 0..BENCH_ITERATIONS {
        let (duration, alive) = bench_fn()?;
        times.push(duration);
        final_alive = alive;
        println!("  trial {:2}: {:?}", i + 1, duration);

        std::thread::sleep(Duration::from_millis(50));
    }

    // 統計計算
    times.sort();
    let median = times[BENCH_ITERATIONS / 2];
    let avg = times.iter().sum::<Duration>() / BENCH_ITERATIONS as u32;
    let min = times[0];
    let max = times[BENCH_ITERATIONS - 1];

    println!("  ---");
    println!("  final alive: {final_alive}");
    println!("  min:    {:?}", min);
    println!("  median: {:?}", median);
    println!("  mean:   {:?}", avg);
    println!("  max:    {:?}", max);
    println!();
    Ok(())
}

fn run_strategy(initial: &GameOfLife, strategy: Strategy, iterations: usize) -> LifeResult<(Duration, usize)> {
    let mut game = initial.clone();

    game.run(strategy, WARMUP_STEPS, &mut NullSink)?;

    let start = Instant::now();
    game.run(strategy, iterations, &mut NullSink)?;
    Ok((start.elapsed(), game.alive_count()))
}
