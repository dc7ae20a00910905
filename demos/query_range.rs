//! Box range query over a quadtree of city-like points

use orthtree::prelude::*;

fn main() -> Result<(), Error> {
    let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0])?;
    let mut tree = Quadtree::new(bounds, 4, 8)?;

    let places = [
        ([12.0, 15.0], "harbor"),
        ([14.5, 18.0], "market"),
        ([40.0, 42.0], "station"),
        ([41.0, 39.5], "museum"),
        ([75.0, 80.0], "airport"),
        ([88.0, 12.0], "quarry"),
        ([50.0, 50.0], "square"),
    ];
    for (position, name) in places {
        tree.try_insert(position, name)?;
    }
    println!("Stored {} points, depth {}, {} nodes", tree.len(), tree.depth(), tree.node_count());

    let window = Region::from_corners([10.0, 10.0], [50.0, 50.0])?;
    println!("\nPoints inside [10, 50) x [10, 50):");
    for point in tree.range_query(&window) {
        println!("  {:<8} at {:?}", point.data, point.position);
    }

    // The upper bound is exclusive, so (50, 50) is not part of the window above
    let edge = Region::from_corners([50.0, 50.0], [51.0, 51.0])?;
    let on_edge: Vec<_> = tree.range_query(&edge).map(|p| p.data).collect();
    println!("\nPoints inside [50, 51) x [50, 51): {on_edge:?}");

    Ok(())
}
