//! Comparison tests between Tree queries and brute-force scans over the same points

#[cfg(test)]
mod tests {
    use crate::{Quadtree, Octree, QueryShape, Region, Sphere, Tree, distance_squared};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Helper to insert the same points into a tree and a flat list
    fn setup_tree<const D: usize>(points: &[[f64; D]], capacity: usize) -> Tree<usize, D> {
        let bounds = Region::from_corners([0.0; D], [100.0; D]).unwrap();
        let mut tree = Tree::new(bounds, capacity, 16).unwrap();
        for (i, &position) in points.iter().enumerate() {
            assert!(tree.insert(position, i), "point {i} should be inside the bounds");
        }
        tree
    }

    fn random_points<const D: usize>(rng: &mut StdRng, count: usize) -> Vec<[f64; D]> {
        (0..count)
            .map(|_| {
                let mut p = [0.0; D];
                for c in &mut p {
                    *c = rng.random_range(0.0..100.0);
                }
                p
            })
            .collect()
    }

    /// Ids of the k nearest points, ties broken by insertion index
    fn brute_force_nearest<const D: usize>(
        points: &[(usize, [f64; D])],
        query: &[f64; D],
        k: usize,
    ) -> Vec<(usize, f64)> {
        let mut all: Vec<(usize, f64)> = points
            .iter()
            .map(|&(id, p)| (id, distance_squared(&p, query)))
            .collect();
        all.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        all.truncate(k);
        all
    }

    fn brute_force_range<const D: usize, S: QueryShape<D>>(points: &[(usize, [f64; D])], shape: &S) -> Vec<usize> {
        let mut ids: Vec<usize> = points
            .iter()
            .filter(|(_, p)| shape.contains_point(p))
            .map(|&(id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn tree_range<const D: usize, S: QueryShape<D>>(tree: &Tree<usize, D>, shape: &S) -> Vec<usize> {
        let mut ids: Vec<usize> = tree.range_query(shape).map(|p| p.data).collect();
        ids.sort_unstable();
        ids
    }

    fn assert_nearest_matches<const D: usize>(tree: &Tree<usize, D>, points: &[(usize, [f64; D])], query: &[f64; D], k: usize) {
        let expected = brute_force_nearest(points, query, k);
        let actual: Vec<(usize, f64)> = tree
            .nearest(query, k)
            .iter()
            .map(|n| (n.point.data, n.distance * n.distance))
            .collect();

        assert_eq!(actual.len(), expected.len(), "k-NN result length for {query:?}, k={k}");
        for (rank, ((id_a, dist_a), (id_e, dist_e))) in actual.iter().zip(&expected).enumerate() {
            assert_eq!(id_a, id_e, "k-NN rank {rank} differs for {query:?}, k={k}");
            assert!((dist_a - dist_e).abs() <= 1e-9 * dist_e.max(1.0), "k-NN distance at rank {rank}");
        }
    }

    #[test]
    fn test_range_query_box_consistency() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = random_points::<2>(&mut rng, 5_000);
        let tree = setup_tree(&points, 8);
        let flat: Vec<(usize, [f64; 2])> = points.iter().copied().enumerate().collect();

        for _ in 0..200 {
            let min = [rng.random_range(0.0..90.0), rng.random_range(0.0..90.0)];
            let max = [min[0] + rng.random_range(0.5..30.0), min[1] + rng.random_range(0.5..30.0)];
            let window = Region::from_corners(min, max).unwrap();
            assert_eq!(tree_range(&tree, &window), brute_force_range(&flat, &window), "window {window:?}");
        }
    }

    #[test]
    fn test_range_query_sphere_consistency() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = random_points::<3>(&mut rng, 5_000);
        let tree = setup_tree(&points, 6);
        let flat: Vec<(usize, [f64; 3])> = points.iter().copied().enumerate().collect();

        for _ in 0..200 {
            let center = random_points::<3>(&mut rng, 1)[0];
            let ball = Sphere::new(center, rng.random_range(0.0..25.0)).unwrap();
            assert_eq!(tree_range(&tree, &ball), brute_force_range(&flat, &ball), "ball {ball:?}");
        }
    }

    #[test]
    fn test_every_point_found_exactly_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points::<2>(&mut rng, 2_000);
        let tree = setup_tree(&points, 4);

        for (i, p) in points.iter().enumerate() {
            let probe = Sphere::new(*p, 0.0).unwrap();
            let hits = tree.range_query(&probe).filter(|q| q.data == i).count();
            assert_eq!(hits, 1, "point {i} must be returned exactly once");
        }
    }

    #[test]
    fn test_nearest_k_consistency_10k() {
        let mut rng = StdRng::seed_from_u64(2024);
        let points = random_points::<2>(&mut rng, 10_000);
        let tree = setup_tree(&points, 16);
        let flat: Vec<(usize, [f64; 2])> = points.iter().copied().enumerate().collect();

        for &k in &[1, 5, 32] {
            for _ in 0..25 {
                let query = [rng.random_range(-10.0..110.0), rng.random_range(-10.0..110.0)];
                assert_nearest_matches(&tree, &flat, &query, k);
            }
        }
    }

    #[test]
    fn test_nearest_k_consistency_octree() {
        let mut rng = StdRng::seed_from_u64(99);
        let points = random_points::<3>(&mut rng, 10_000);
        let tree: Octree<usize> = setup_tree(&points, 8);
        let flat: Vec<(usize, [f64; 3])> = points.iter().copied().enumerate().collect();

        for &k in &[1, 10] {
            for _ in 0..20 {
                let query = random_points::<3>(&mut rng, 1)[0];
                assert_nearest_matches(&tree, &flat, &query, k);
            }
        }
    }

    #[test]
    fn test_nearest_with_duplicates_consistency() {
        let mut rng = StdRng::seed_from_u64(5);
        // few distinct positions, many copies: lots of exact distance ties
        let distinct = random_points::<2>(&mut rng, 20);
        let points: Vec<[f64; 2]> = (0..1_000).map(|i| distinct[i % distinct.len()]).collect();
        let tree = setup_tree(&points, 4);
        let flat: Vec<(usize, [f64; 2])> = points.iter().copied().enumerate().collect();

        for _ in 0..20 {
            let query = random_points::<2>(&mut rng, 1)[0];
            assert_nearest_matches(&tree, &flat, &query, 75);
        }
    }

    #[test]
    fn test_count_invariant_under_churn() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Region::from_corners([0.0, 0.0], [100.0, 100.0]).unwrap();
        let mut tree: Quadtree<usize> = Tree::new(bounds, 4, 12).unwrap();
        let mut live: Vec<(usize, [f64; 2])> = Vec::new();

        for step in 0..5_000 {
            if live.is_empty() || rng.random_bool(0.6) {
                let p = [rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)];
                assert!(tree.insert(p, step));
                live.push((step, p));
            } else {
                let victim = rng.random_range(0..live.len());
                let (id, p) = live.swap_remove(victim);
                assert!(tree.remove_item(&p, &id), "live point {id} must be removable");
            }

            if step % 500 == 0 {
                assert_eq!(tree.len(), live.len());
                assert_eq!(tree.range_query(&bounds).count(), tree.len(), "size matches a full scan");
            }
        }

        let before = tree_range(&tree, &bounds);
        let _ = tree.collapse();
        assert_eq!(tree_range(&tree, &bounds), before, "collapse keeps every point");
        assert_eq!(tree.iter().count(), live.len());

        let query = [50.0, 50.0];
        assert_nearest_matches(&tree, &live, &query, 20);
    }
}
