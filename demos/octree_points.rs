//! Octree lifecycle: insert, locate, remove, collapse
//!
//! Run with `RUST_LOG=orthtree=debug` to see split and collapse events.

use orthtree::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bounds = Region::from_corners([0.0; 3], [1.0; 3])?;
    let config = TreeConfig::default().with_capacity(8).with_max_depth(6);
    let mut tree: Octree<u32> = Tree::with_config(bounds, config)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(95756739_u64);
    let mut positions = Vec::new();
    for id in 0..2_000 {
        let position = [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)];
        tree.try_insert(position, id)?;
        positions.push((id, position));
    }
    println!("Inserted {} points: depth {}, {} nodes", tree.len(), tree.depth(), tree.node_count());

    let (id, probe) = positions[0];
    if let Some(path) = tree.track(&probe) {
        println!("Point {id} lives at child path {path:?}");
    }
    if let Some(point) = tree.get(&probe) {
        println!("get({probe:?}) -> {}", point.data);
    }

    for (id, position) in positions.iter().skip(100) {
        tree.remove_item(position, id);
    }
    println!("After removing all but 100: {} points, {} nodes", tree.len(), tree.node_count());

    let merged = tree.collapse();
    println!("Collapse merged {merged} internal nodes: {} nodes, depth {}", tree.node_count(), tree.depth());

    Ok(())
}
