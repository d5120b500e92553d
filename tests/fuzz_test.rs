//! Fuzzes the stepped search by running many random grids to completion and
//! checking the outcome against a brute-force BFS oracle: a path is found
//! exactly when BFS says the end is reachable, and the end cell's cost always
//! equals the true shortest distance.

use std::collections::VecDeque;

use grid_step_search::{GridConfig, SearchGrid};
use grid_util::point::Point;
use rand::prelude::*;

fn random_obstacles(width: usize, height: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut obstacles = Vec::new();
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            if rng.gen_bool(0.4) {
                obstacles.push(Point::new(x, y));
            }
        }
    }
    obstacles
}

/// Plain BFS shortest distance on the same 4-connected unit-cost grid.
fn bfs_distance(
    width: usize,
    height: usize,
    obstacles: &[Point],
    start: Point,
    end: Point,
) -> Option<u32> {
    let mut blocked = vec![false; width * height];
    for p in obstacles {
        if p.x >= 0 && (p.x as usize) < width && p.y >= 0 && (p.y as usize) < height {
            blocked[p.y as usize * width + p.x as usize] = true;
        }
    }
    let index = |p: Point| p.y as usize * width + p.x as usize;
    let mut distance = vec![None; width * height];
    distance[index(start)] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let d = distance[index(current)].unwrap();
        if current == end {
            return Some(d);
        }
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let n = Point::new(current.x + dx, current.y + dy);
            if n.x < 0 || n.y < 0 || n.x as usize >= width || n.y as usize >= height {
                continue;
            }
            if blocked[index(n)] || distance[index(n)].is_some() {
                continue;
            }
            distance[index(n)] = Some(d + 1);
            queue.push_back(n);
        }
    }
    None
}

fn step_to_idle(grid: &mut SearchGrid) {
    let budget = grid.width() * grid.height() * 5 + 16;
    for _ in 0..budget {
        if grid.is_idle() {
            return;
        }
        grid.step();
    }
    panic!("no Idle within {budget} steps:\n{grid}");
}

#[test]
fn fuzz_against_bfs() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut obstacles = random_obstacles(N, N, &mut rng);
        obstacles.retain(|p| *p != start && *p != end);
        let expected = bfs_distance(N, N, &obstacles, start, end);

        let mut grid =
            SearchGrid::new(GridConfig::new(N, N, start, end, obstacles)).unwrap();
        step_to_idle(&mut grid);

        if grid.path_found() != expected.is_some() {
            println!("{grid}");
        }
        assert_eq!(grid.path_found(), expected.is_some());
        if let Some(shortest) = expected {
            assert_eq!(grid.cell(end).unwrap().cost_so_far(), shortest);
            let path = grid.path().unwrap();
            assert_eq!(path.len() as u32, shortest + 1);
            for pair in path.windows(2) {
                let manhattan = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
                assert_eq!(manhattan, 1);
            }
            for p in &path {
                assert!(!grid.cell(*p).unwrap().is_obstacle());
            }
            // Interior cells carry the path marking after the trace.
            assert_eq!(
                grid.cells().filter(|c| c.is_on_path()).count() as u32,
                shortest.saturating_sub(1)
            );
        }
    }
}

#[test]
fn fuzz_visited_costs_match_bfs() {
    // On reachable cells, the finalized cost must agree with BFS everywhere,
    // not just at the end: an inconsistency would mean a relaxation bug that
    // the end-to-end distance check could mask.
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut obstacles = random_obstacles(N, N, &mut rng);
        obstacles.retain(|p| *p != start && *p != end);
        let mut grid =
            SearchGrid::new(GridConfig::new(N, N, start, end, obstacles.clone())).unwrap();
        step_to_idle(&mut grid);

        for cell in grid.cells() {
            if !cell.is_visited() {
                continue;
            }
            let shortest = bfs_distance(N, N, &obstacles, start, cell.position())
                .expect("visited cell must be reachable");
            // Manhattan distance is consistent on this grid, so every
            // finalized cost is already optimal, not just the end's.
            assert_eq!(
                cell.cost_so_far(),
                shortest,
                "cell {} finalized at the wrong distance",
                cell.position()
            );
        }
    }
}
