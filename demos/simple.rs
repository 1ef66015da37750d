use grid_astar::{Coordinate, Grid, Pathfinder};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(3, 3).unwrap();
    grid.set_traversable(Coordinate::new(1, 1), false).unwrap();
    println!("{}", grid);
    let mut pathfinder = Pathfinder::for_grid(&grid);
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(2, 2);
    let path = pathfinder.find_path(&mut grid, start, end).unwrap().unwrap();
    println!("Path:");
    println!("{}", start);
    for p in path {
        println!("{}", p);
    }
}
