use grid_astar::{Coordinate, GridConfig, GridSession, PlacingMode};

// Replays a sequence of edits as they would arrive from a grid editor and prints the outcome
// after each one: placing a goal, then a start, then dragging a wall across the grid and
// finally opening a gap in it.
fn main() {
    let mut session = GridSession::new(GridConfig::new(8, 8));
    println!("Initially: {}", session.path_info());

    session.set_mode(PlacingMode::Goal);
    if let Some(info) = session.input(Coordinate::new(6, 6)).unwrap() {
        println!("Goal placed: {info}");
    }
    session.set_mode(PlacingMode::Start);
    if let Some(info) = session.input(Coordinate::new(1, 1)).unwrap() {
        println!("Start placed: {info}");
    }

    session.set_mode(PlacingMode::Obstacle);
    for x in 0..8 {
        if let Some(info) = session.input(Coordinate::new(x, 4)).unwrap() {
            println!("Painted ({x}, 4): {info}");
        }
    }
    session.input_up();

    if let Some(info) = session.input(Coordinate::new(7, 4)).unwrap() {
        println!("Opened (7, 4): {info}");
    }
    session.input_up();

    println!("{}", session.grid());
    let positions = session.render_positions();
    println!("Drawn path: {positions:?}");
}
