use matrix_graph_core::{
    bfs, degree_from_avg, degree_to_avg, dfs, dfs_walk, dijkstra, GraphError, MatrixGraph, NodeId,
};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type BenchGraph = MatrixGraph<String, u32>;
type Generator = fn(usize) -> Result<BenchGraph, GraphError>;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: matrix-graph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!();
        println!("Default node_count: 2000 (the matrix holds node_count^2 cells)");
        println!("Log filter: MATRIX_GRAPH_LOG or RUST_LOG (default: warn)");
        return;
    }

    println!("matrix-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "all" => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            std::process::exit(2);
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, node_count) {
            eprintln!("{}: {}", name, e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr, filtered by `MATRIX_GRAPH_LOG`, then `RUST_LOG`, then `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("MATRIX_GRAPH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: Generator, node_count: usize) -> Result<(), GraphError> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} links, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.link_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    info!(
        generator = name,
        nodes = graph.node_count(),
        links = graph.link_count(),
        "graph generated"
    );

    if graph.is_empty() {
        println!("(empty graph, nothing to traverse)");
        println!();
        return Ok(());
    }

    println!();
    println!("{:>12} {:>12} {:>10}", "algorithm", "visited", "time");
    println!("{:->12} {:->12} {:->10}", "", "", "");

    let t = Instant::now();
    let result = bfs(&graph, 0)?;
    let max_depth = result.visits.iter().map(|v| v.depth).max().unwrap_or(0);
    println!("{:>12} {:>12} {:>8.1}ms", "bfs", result.len(), ms(t));

    let t = Instant::now();
    let result = dfs(&graph, 0)?;
    println!("{:>12} {:>12} {:>8.1}ms", "dfs", result.len(), ms(t));

    let t = Instant::now();
    let spt = dijkstra(&graph, 0)?;
    println!("{:>12} {:>12} {:>8.1}ms", "dijkstra", spt.reachable_count(), ms(t));
    println!("BFS eccentricity of node 0: {} hops", max_depth);

    // Walk and shortest path: node 0 to last node
    let far_node: NodeId = graph.node_count() - 1;
    println!();
    let t = Instant::now();
    let walk = dfs_walk(&graph, 0, far_node)?;
    let elapsed = ms(t);
    if walk.is_empty() {
        println!("DFS walk 0 → {}: no path ({:.1}ms)", far_node, elapsed);
    } else {
        println!(
            "DFS walk 0 → {}: {} hops in {:.1}ms",
            far_node,
            walk.len() - 1,
            elapsed
        );
    }
    match (spt.distance(far_node), spt.path_to(far_node)) {
        (Some(cost), Some(path)) => println!(
            "Shortest path 0 → {}: cost {}, {} hops",
            far_node,
            cost,
            path.len() - 1
        ),
        _ => println!("Shortest path 0 → {}: unreachable", far_node),
    }

    println!(
        "Average degree: out {:.2}, in {:.2}",
        degree_to_avg(&graph).unwrap_or(0.0),
        degree_from_avg(&graph).unwrap_or(0.0)
    );
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: O(n) or O(n + edges), single-threaded and deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    fn weight(&mut self) -> u32 {
        self.next(100) as u32 + 1
    }
}

/// Fill every slot with a node carrying `label`, returning the graph.
fn populate(node_count: usize, label: &str) -> Result<BenchGraph, GraphError> {
    let mut graph = MatrixGraph::new(node_count);
    for _ in 0..node_count {
        graph.add_node_with_label(label.to_string())?;
    }
    Ok(graph)
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns `branching` children. Produces deep paths (log depth)
/// with exponential width.
fn gen_lsystem(node_count: usize) -> Result<BenchGraph, GraphError> {
    let mut graph = populate(node_count, "Concept")?;
    let mut rng = FastRng::new(42);

    let branching = 3;
    let mut next_id = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_link(parent, child, rng.weight())?;
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling.
///
/// Preferential attachment by picking a random existing link and connecting
/// to one of its endpoints. Nodes with more links are more likely to be picked.
fn gen_scale_free(node_count: usize) -> Result<BenchGraph, GraphError> {
    let links_per_node = 10;
    let mut graph = populate(node_count, "Concept")?;
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<NodeId> = Vec::with_capacity(node_count * links_per_node * 2);

    // Seed: small clique
    let seed = 5.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_link(i, j, rng.weight())?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = links_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len())];
            if target != new_node {
                // Link from the older node so node 0 reaches the newcomers
                graph.add_link(target, new_node, rng.weight())?;
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(node_count: usize) -> Result<BenchGraph, GraphError> {
    let k = 10; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = populate(node_count, "Concept")?;
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                neighbor
            };
            if target != i {
                graph.add_link(i, target, rng.weight())?;
            }
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: uniform random links, ~10 per node.
fn gen_random(node_count: usize) -> Result<BenchGraph, GraphError> {
    let mut graph = populate(node_count, "Concept")?;
    let mut rng = FastRng::new(54321);

    if node_count == 0 {
        return Ok(graph);
    }
    for _ in 0..node_count * 10 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_link(from, to, rng.weight())?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for "find path through bottleneck." The cliques are joined by
/// a chain of ~10 bridge nodes.
fn gen_barbell(node_count: usize) -> Result<BenchGraph, GraphError> {
    let bridge_len = 10;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut graph: BenchGraph = MatrixGraph::new(node_count);
    let mut rng = FastRng::new(99999);

    if clique_size < 2 {
        return populate(node_count, "Concept");
    }

    for _ in 0..clique_size {
        graph.add_node_with_label("ClusterA".into())?;
    }
    for _ in 0..bridge_len {
        graph.add_node_with_label("Bridge".into())?;
    }
    while graph.node_count() < node_count {
        graph.add_node_with_label("ClusterB".into())?;
    }

    let b_start = clique_size + bridge_len;
    let b_size = node_count - b_start;
    for (start, size) in [(0, clique_size), (b_start, b_size)] {
        for i in 0..size {
            for _ in 0..20.min(size - 1) {
                let target = rng.next(size);
                if target != i {
                    graph.add_link(start + i, start + target, rng.weight())?;
                }
            }
        }
    }

    // Bridge: chain from last node of A through the bridge into B
    for id in (clique_size - 1)..b_start {
        graph.add_link(id, id + 1, 1)?;
    }

    Ok(graph)
}
