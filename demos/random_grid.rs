use grid_astar::{Coordinate, Grid, Pathfinder};
use rand::prelude::*;

// Blocks random cells of a 20x12 grid and prints the shortest path between two corners, or
// why there is none.
fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let (w, h) = (20, 12);
    let mut grid = Grid::new(w, h).unwrap();
    let start = Coordinate::new(0, 0);
    let goal = Coordinate::new(w as i32 - 1, h as i32 - 1);
    grid.place_start(start).unwrap();
    grid.place_goal(goal).unwrap();
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            if rng.gen_bool(0.3) {
                // Start and goal are left alone by the grid.
                grid.set_traversable(Coordinate::new(x, y), false).unwrap();
            }
        }
    }

    let mut pathfinder = Pathfinder::for_grid(&grid);
    let info = pathfinder.path_info(&mut grid).unwrap();
    println!("{info}, expanded {} cells", pathfinder.expanded().count());

    let path = info.waypoints().unwrap_or_default();
    for y in 0..h as i32 {
        let row = (0..w as i32)
            .map(|x| {
                let p = Coordinate::new(x, y);
                if p == start {
                    'S'
                } else if p == goal {
                    'G'
                } else if path.contains(&p) {
                    'o'
                } else if grid.is_traversable(p) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect::<String>();
        println!("{row}");
    }
}
