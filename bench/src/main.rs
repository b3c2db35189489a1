use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use social_graph_core::{GraphConfig, SocialGraph, UserId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "social-graph-bench", about = "Benchmark and demo driver for social-graph-core")]
struct Args {
    /// Which network to build and query
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of users to generate
    #[arg(default_value_t = 200_000)]
    users: u64,

    /// TOML file with engine limits; defaults to a capacity of `users`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random friendships
    Random,
    /// Two dense cliques connected by a thin bridge
    Barbell,
    /// Organic growth attached to a recent "surface" of users
    Dla,
    /// Seed the four-user sample network and print every query
    Demo,
}

type Generator = fn(&GraphConfig, u64) -> Result<SocialGraph>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GraphConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GraphConfig::with_max_users(args.users.max(1) as usize),
    };
    info!(max_users = config.max_users, max_name_len = config.max_name_len, "engine limits");

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        Mode::Dla => vec![("DLA (organic branching)", gen_dla)],
        Mode::All => vec![
            ("Scale-free (edge sampling)", gen_scale_free as Generator),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        Mode::Demo => return run_demo(&config, args.json),
    };

    println!("social-graph-bench");
    println!("==================");
    println!();

    for (name, generator) in generators {
        run_benchmark(name, generator, &config, args.users, args.json)?;
    }
    Ok(())
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    config: &GraphConfig,
    user_count: u64,
    json: bool,
) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} users", user_count);

    let t = Instant::now();
    let graph = generator(config, user_count).with_context(|| format!("generating {name}"))?;
    println!(
        "Generated in {:.2}s — {} users, {} friendships, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.user_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    if graph.user_count() == 0 {
        println!();
        return Ok(());
    }

    // Degrees of separation from user 1
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20] {
        let t = Instant::now();
        let found = graph.within_degrees(1, depth)?;
        println!("{:>8} {:>12} {:>8.1}ms", depth, found.len(), ms(t));
        if found.len() + 1 >= graph.user_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let far = graph.user_count() as UserId;
    let t = Instant::now();
    let path = graph.shortest_path(1, far)?;
    let elapsed = ms(t);
    if path.is_reachable() {
        println!("Shortest path 1 → {}: {} hops in {:.1}ms", far, path.distance, elapsed);
    } else {
        println!("Shortest path 1 → {}: no path ({:.1}ms)", far, elapsed);
    }

    let t = Instant::now();
    let circle = graph.component_of(1)?;
    println!("Friend circle of 1: {} users in {:.1}ms", circle.len(), ms(t));

    let t = Instant::now();
    let circles = graph.components();
    println!("Friend circles: {} in {:.1}ms", circles.len(), ms(t));

    let t = Instant::now();
    let recs = graph.recommend(1)?;
    println!("Recommendations for 1: {} in {:.1}ms", recs.len(), ms(t));

    if graph.user_count() >= 2 {
        let t = Instant::now();
        let common = graph.common_friends(1, 2)?;
        println!("Common friends of 1 and 2: {} in {:.1}ms", common.len(), ms(t));
    }

    let t = Instant::now();
    let stats = graph.statistics();
    let elapsed = ms(t);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "Statistics in {:.1}ms: avg degree {:.2}, max {} (user {}), min {}",
            elapsed,
            stats.avg_degree,
            stats.max_degree,
            stats.max_holder.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            stats.min_degree
        );
    }

    let top: Vec<String> = graph
        .most_connected(5)
        .into_iter()
        .map(|u| format!("{}({})", u.id, u.degree))
        .collect();
    println!("Most connected: {}", top.join(", "));
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Demo: the sample network, every query printed with names
// ---------------------------------------------------------------------------

fn run_demo(config: &GraphConfig, json: bool) -> Result<()> {
    let mut graph = SocialGraph::new(config);
    for name in ["张三", "李四", "王五", "赵六"] {
        graph.create_user(name)?;
    }
    for (a, b) in [(1, 2), (1, 3), (2, 4), (3, 4)] {
        graph.add_friend(a, b)?;
    }

    println!("{:<6} {:<30} {:<10}", "ID", "Name", "Friends");
    println!("{:-<48}", "");
    for u in graph.users() {
        println!("{:<6} {:<30} {:<10}", u.id, u.name, u.degree);
    }
    println!();

    for u in graph.users() {
        let names = names_of(&graph, &graph.list_friends(u.id)?)?;
        println!("Friends of {} ({}): {}", u.id, u.name, or_none(&names));
    }
    println!();

    let path = graph.shortest_path(1, 4)?;
    if path.is_reachable() {
        let steps: Vec<String> = graph
            .describe_path(&path)?
            .into_iter()
            .map(|(id, name)| format!("{}: {}", id, name))
            .collect();
        println!("Shortest path 1 → 4 ({} degrees): {}", path.distance, steps.join(" → "));
    } else {
        println!("Users 1 and 4 are not connected");
    }

    let common = names_of(&graph, &graph.common_friends(2, 3)?)?;
    println!("Common friends of 2 and 3: {}", or_none(&common));

    let recs = names_of(&graph, &graph.recommend(1)?)?;
    println!("Recommended for 1: {}", or_none(&recs));

    let circle = graph.component_of(1)?;
    println!(
        "Friend circle of 1 ({} users): {}",
        circle.len(),
        names_of(&graph, &circle)?.join(", ")
    );
    println!();

    let stats = graph.statistics();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Users:        {}", stats.user_count);
        println!("Friendships:  {}", stats.edge_count);
        println!("Avg friends:  {:.2}", stats.avg_degree);
        if let Some(holder) = stats.max_holder {
            println!(
                "Most friends: {} (user {}: {})",
                stats.max_degree,
                holder,
                graph.name_of(holder)?
            );
        }
        println!("Fewest:       {}", stats.min_degree);
    }
    Ok(())
}

fn names_of(graph: &SocialGraph, ids: &[UserId]) -> Result<Vec<String>> {
    ids.iter()
        .map(|&id| -> Result<String> { Ok(format!("{} ({})", graph.name_of(id)?, id)) })
        .collect()
}

fn or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Create users `1..=n`, stopping quietly at the configured capacity.
fn populate(config: &GraphConfig, n: u64) -> Result<(SocialGraph, u64)> {
    let mut graph = SocialGraph::with_capacity(config, n as usize);
    let n = n.min(config.max_users as u64);
    for i in 1..=n {
        graph.create_user(&format!("user_{}", i))?;
    }
    Ok((graph, n))
}

/// Befriend two users, skipping self-pairs the generators occasionally draw.
fn befriend(graph: &mut SocialGraph, a: UserId, b: UserId) -> Result<()> {
    if a != b {
        graph.add_friend(a, b)?;
    }
    Ok(())
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing friendship and
/// connecting to one of its endpoints. Popular users are picked more often.
fn gen_scale_free(config: &GraphConfig, user_count: u64) -> Result<SocialGraph> {
    let friends_per_user = 10u64;
    let (mut graph, n) = populate(config, user_count)?;
    let mut rng = FastRng::new(12345);

    // Endpoint list for O(1) preferential attachment sampling
    let mut endpoints: Vec<UserId> = Vec::with_capacity((n * friends_per_user * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(n);
    for i in 1..=seed {
        for j in (i + 1)..=seed {
            befriend(&mut graph, i, j)?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }
    if endpoints.is_empty() {
        return Ok(graph);
    }

    for new_user in (seed + 1)..=n {
        let attach = friends_per_user.min(new_user - 1);
        for _ in 0..attach {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_user {
                befriend(&mut graph, new_user, target)?;
                endpoints.push(new_user);
                endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each user befriends K neighbors on a ring, then each friendship is
/// rewired with probability p. High clustering, short paths.
fn gen_small_world(config: &GraphConfig, user_count: u64) -> Result<SocialGraph> {
    let k = 10u64;
    let p = 0.05f64;
    let (mut graph, n) = populate(config, user_count)?;
    let mut rng = FastRng::new(67890);

    for i in 0..n {
        for j in 1..=k {
            let neighbor = (i + j) % n;
            let target = if rng.next_f64() < p {
                rng.next(n)
            } else {
                neighbor
            };
            befriend(&mut graph, i + 1, target + 1)?;
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: uniform random friendships, ~10 per user on average.
fn gen_random(config: &GraphConfig, user_count: u64) -> Result<SocialGraph> {
    let (mut graph, n) = populate(config, user_count)?;
    let mut rng = FastRng::new(54321);
    if n == 0 {
        return Ok(graph);
    }

    for _ in 0..n * 10 {
        let a = rng.next(n) + 1;
        let b = rng.next(n) + 1;
        befriend(&mut graph, a, b)?;
    }

    Ok(graph)
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for "find a path through a bottleneck". The last user sits
/// deep in the second clique, so the headline shortest path crosses it.
fn gen_barbell(config: &GraphConfig, user_count: u64) -> Result<SocialGraph> {
    let bridge_len = 10u64;
    let (mut graph, n) = populate(config, user_count)?;
    if n <= bridge_len + 2 {
        for i in 1..n {
            befriend(&mut graph, i, i + 1)?;
        }
        return Ok(graph);
    }
    let clique_size = (n - bridge_len) / 2;
    let mut rng = FastRng::new(99999);

    // Clique A: users 1..=clique_size
    for i in 0..clique_size {
        for _ in 0..20u64.min(clique_size - 1) {
            let target = rng.next(clique_size);
            befriend(&mut graph, i + 1, target + 1)?;
        }
    }

    // Bridge: chain from the last user of A through to the first user of B
    let bridge_start = clique_size + 1;
    let b_start = bridge_start + bridge_len;
    for id in bridge_start..=b_start {
        befriend(&mut graph, id - 1, id)?;
    }

    // Clique B: everyone after the bridge
    let b_size = n - b_start + 1;
    for i in 0..b_size {
        for _ in 0..20u64.min(b_size - 1) {
            let target = rng.next(b_size);
            befriend(&mut graph, b_start + i, b_start + target)?;
        }
    }

    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new user befriends a random member of a sliding "surface" of
/// recent arrivals, with an occasional long-range second friendship.
fn gen_dla(config: &GraphConfig, user_count: u64) -> Result<SocialGraph> {
    let (mut graph, n) = populate(config, user_count)?;
    let mut rng = FastRng::new(77777);

    // VecDeque for O(1) pop_front when evicting the oldest surface users.
    let surface_max = 10_000usize;
    let mut surface: VecDeque<UserId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(1);

    for new_user in 2..=n {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        befriend(&mut graph, new_user, attach_to)?;

        // 10% chance of a second friendship (creates loops / shortcuts)
        if rng.next(10) == 0 && new_user > 2 {
            let other = rng.next(new_user - 1) + 1;
            if other != attach_to {
                befriend(&mut graph, new_user, other)?;
            }
        }

        surface.push_back(new_user);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
