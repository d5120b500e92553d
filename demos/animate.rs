use grid_step_search::{GridConfig, Phase, SearchGrid};
use grid_util::point::Point;

// Steps a search to completion on a 20x12 map with two wall segments,
// printing the grid every few ticks the way a windowed renderer would draw
// frames. Legend: S start, E end, # wall, o visited, * traced path, . open.

fn walls() -> Vec<Point> {
    let mut walls = Vec::new();
    for y in 0..9 {
        walls.push(Point::new(5, y));
        walls.push(Point::new(12, 11 - y));
    }
    walls
}

fn main() {
    let config = GridConfig::new(20, 12, Point::new(1, 1), Point::new(18, 10), walls());
    let mut grid = SearchGrid::new(config).expect("demo layout is valid");

    let mut tick = 0;
    while !grid.is_idle() {
        grid.step();
        tick += 1;
        if tick % 40 == 0 || grid.phase() == Phase::Idle {
            println!("tick {tick} ({:?}):\n{grid}", grid.phase());
        }
    }

    match grid.path() {
        Some(path) => {
            println!("Path of cost {}:", path.len() - 1);
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("No path exists"),
    }
}
