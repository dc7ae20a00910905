//! Sphere range query over an octree

use orthtree::prelude::*;

fn main() -> Result<(), Error> {
    let bounds = Region::new([0.0, 0.0, 0.0], [10.0, 10.0, 10.0])?;
    let mut tree: Octree<usize> = Tree::with_config(bounds, TreeConfig::default().with_capacity(2))?;

    let mut id = 0;
    for x in -4..=4 {
        for y in -4..=4 {
            for z in -4..=4 {
                tree.insert([f64::from(x) * 2.0, f64::from(y) * 2.0, f64::from(z) * 2.0], id);
                id += 1;
            }
        }
    }
    println!("Stored {} grid points, depth {}", tree.len(), tree.depth());

    for radius in [0.0, 2.0, 3.0, 4.0] {
        let ball = Sphere::new([0.0, 0.0, 0.0], radius)?;
        // Sphere boundaries are closed: points at exactly `radius` count
        let count = tree.range_query(&ball).count();
        println!("  radius {radius:>4}: {count} points");
    }

    Ok(())
}
