use puzzle_cluster::fleet::{local_endpoints, Endpoint, Fleet, TcpEndpoint};
use puzzle_cluster::puzzle::Board;
use puzzle_cluster::solver::{Solution, SolverConfig, SolverService};

use std::net::SocketAddr;
use std::thread;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut local_ranks: Option<usize> = None;
    let mut rank: Option<usize> = None;
    let mut peers: Vec<SocketAddr> = vec![];
    let mut shuffle_moves: usize = 50_000;
    let mut config = SolverConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--local" => {
                local_ranks = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--rank" => {
                rank = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--peers" => {
                for addr in args[i + 1].split(',') {
                    peers.push(addr.parse()?);
                }
                i += 2;
            }
            "--shuffle" => {
                shuffle_moves = args[i + 1].parse()?;
                i += 2;
            }
            "--max-depth" => {
                config.max_depth = args[i + 1].parse()?;
                i += 2;
            }
            "--tasks" => {
                config.target_tasks = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    match (local_ranks, rank) {
        (Some(size), None) if size > 0 => run_local(size, shuffle_moves, config),
        (None, Some(rank)) if rank < peers.len() => run_tcp(rank, &peers, shuffle_moves, config),
        _ => {
            eprintln!("Usage: {} --local <ranks> [options]", args[0]);
            eprintln!("       {} --rank <r> --peers <a:p,b:p,...> [options]", args[0]);
            eprintln!("Options: --shuffle <moves> --max-depth <d> --tasks <n>");
            eprintln!("Example: {} --local 4 --shuffle 1000", args[0]);
            eprintln!(
                "Example: {} --rank 0 --peers 127.0.0.1:5000,127.0.0.1:5001",
                args[0]
            );
            std::process::exit(1);
        }
    }
}

/// Hosts the whole fleet in one process, one thread per rank. Handy for
/// development; the TCP mode is the real multi-process deployment.
fn run_local(size: usize, shuffle_moves: usize, config: SolverConfig) -> anyhow::Result<()> {
    let endpoints = local_endpoints(size);

    let mut handles = Vec::new();
    for endpoint in endpoints {
        let config = config.clone();
        handles.push(thread::spawn(move || {
            run_rank(Fleet::new(endpoint), shuffle_moves, config)
        }));
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("rank thread panicked"))??;
    }
    Ok(())
}

fn run_tcp(
    rank: usize,
    peers: &[SocketAddr],
    shuffle_moves: usize,
    config: SolverConfig,
) -> anyhow::Result<()> {
    tracing::info!("Starting rank {} on {}", rank, peers[rank]);
    let endpoint = TcpEndpoint::bind(peers[rank])?.establish(rank, peers)?;
    run_rank(Fleet::new(endpoint), shuffle_moves, config)
}

/// One rank's whole lifetime: shuffle on the coordinator, barrier-bracketed
/// timing around the distributed run, then report and replay the solution.
fn run_rank<E: Endpoint>(
    fleet: Fleet<E>,
    shuffle_moves: usize,
    config: SolverConfig,
) -> anyhow::Result<()> {
    let mut service = SolverService::new(fleet, config);

    let start = if service.is_coordinator() {
        let mut board = Board::default();
        board.shuffle(&mut rand::thread_rng(), shuffle_moves);
        println!("{}", board);
        Some(board)
    } else {
        None
    };

    service.fleet_mut().barrier()?;
    let started = Instant::now();

    let outcome = service.run(start.clone())?;

    service.fleet_mut().barrier()?;
    if service.is_coordinator() {
        tracing::info!("Time: {}ms", started.elapsed().as_millis());

        match (outcome, start) {
            (Some(solution), Some(board)) => report_solution(board, &solution)?,
            _ => println!("Solution not found within the depth budget"),
        }
    }

    Ok(())
}

fn report_solution(mut board: Board, solution: &Solution) -> anyhow::Result<()> {
    let rendered: Vec<String> = solution.moves.iter().map(|mv| mv.to_string()).collect();
    println!(
        "Found solution. Number of moves: {}\nFrontier node: {}\nMove sequence: {}",
        solution.moves.len(),
        solution.task_index,
        rendered.join(", ")
    );

    println!("Solving:");
    println!("{}", board);
    for &mv in &solution.moves {
        board.apply(mv)?;
        println!("{}", board);
    }
    Ok(())
}
