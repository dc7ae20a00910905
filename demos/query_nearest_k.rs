//! k-nearest neighbor queries, including equal-distance ties

use orthtree::prelude::*;

fn main() -> Result<(), Error> {
    let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0])?;
    let mut tree = Quadtree::new(bounds, 4, 8)?;

    for (id, v) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
        tree.insert([v, v], id);
    }
    tree.insert([90.0, 90.0], 5);

    let query = [3.0, 3.0];
    for k in [1, 3, 10] {
        let nearest = tree.nearest(&query, k);
        println!("k = {k}:");
        for neighbor in &nearest {
            println!(
                "  id {} at {:?}, distance {:.3}",
                neighbor.point.data, neighbor.point.position, neighbor.distance
            );
        }
    }

    // (2,2) and (4,4) are equally far from (3,3); insertion order decides
    tree.remove_at(&[3.0, 3.0]);
    let ids: Vec<usize> = tree.nearest(&query, 2).iter().map(|n| n.point.data).collect();
    println!("\nAfter removing (3,3), two nearest ids: {ids:?}");

    // Queries may lie outside the bounds
    if let Some(neighbor) = tree.nearest_one(&[-50.0, -50.0]) {
        println!("Nearest to (-50,-50): id {}", neighbor.point.data);
    }

    Ok(())
}
