//! Rough timing of insert, range and nearest on a large random quadtree

use orthtree::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<(), Error> {
    let num_items = 200_000;
    let num_queries = 10_000;
    let mut rng = rand::rngs::StdRng::seed_from_u64(95756739_u64);

    let bounds = Region::from_corners([0.0, 0.0], [1000.0, 1000.0])?;
    let mut tree = Quadtree::new(bounds, 16, 20)?;

    let start = Instant::now();
    for id in 0..num_items {
        tree.insert([rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)], id);
    }
    println!(
        "insert {} points: {:.2}ms (depth {}, {} nodes)",
        num_items,
        start.elapsed().as_secs_f64() * 1000.0,
        tree.depth(),
        tree.node_count()
    );

    let start = Instant::now();
    let mut found = 0;
    for _ in 0..num_queries {
        let min = [rng.random_range(0.0..990.0), rng.random_range(0.0..990.0)];
        let window = Region::from_corners(min, [min[0] + 10.0, min[1] + 10.0])?;
        found += tree.range_query(&window).count();
    }
    println!(
        "{} range queries: {:.2}ms ({} points)",
        num_queries,
        start.elapsed().as_secs_f64() * 1000.0,
        found
    );

    let start = Instant::now();
    let mut total = 0;
    for _ in 0..num_queries {
        let query = [rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)];
        total += tree.nearest(&query, 10).len();
    }
    println!(
        "{} nearest(10) queries: {:.2}ms ({} results)",
        num_queries,
        start.elapsed().as_secs_f64() * 1000.0,
        total
    );

    Ok(())
}
