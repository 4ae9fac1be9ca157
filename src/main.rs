use docopt::Docopt;
use itertools::Itertools;
use log::info;
use maze_carver::{
    config::{MazeConfig, MazeConfigBuilder},
    coordinates::{Point, Size},
    generators::Backtrack,
    grid_displays::{GridDisplay, LayeredDisplay, PathDisplay, StartEndPointsDisplay},
    layout::MazeLayout,
    pathing,
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze carver

Usage:
    maze_driver -h | --help
    maze_driver [--cells-wide=<w>] [--cells-deep=<d>] [--seed=<s>] [--cell-size=<f>] [--wall-thickness=<f>] [--wall-height=<f>] [--no-floor] [--ceiling] [--sweep-backtrack] [--show-path] [--text-out=<path>] [--save-layout=<path>]

Options:
    -h --help              Show this screen.
    --cells-wide=<w>       Rooms across the maze [default: 5].
    --cells-deep=<d>       Rooms down the maze [default: 5].
    --seed=<s>             Seed for a reproducible maze, 0 for a random one [default: 0].
    --cell-size=<f>        World size of a room plus one wall [default: 1.0].
    --wall-thickness=<f>   World thickness of walls and pillars [default: 0.2].
    --wall-height=<f>      World height of walls [default: 1.0].
    --no-floor             Leave the floor slab out of the layout.
    --ceiling              Add a ceiling slab to the layout.
    --sweep-backtrack      Rescan the whole frontier when backtracking, resuming from the oldest live room.
    --show-path            Mark the route from the start (S) to the destination (E).
    --text-out=<path>      Write the text rendering to a file instead of stdout.
    --save-layout=<path>   Write the layout to a text file. Line 1: grid width, grid depth, obstacle count.
                           Then one line per box: kind x y z width height depth.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_cells_wide: usize,
    flag_cells_deep: usize,
    flag_seed: u64,
    flag_cell_size: f32,
    flag_wall_thickness: f32,
    flag_wall_height: f32,
    flag_no_floor: bool,
    flag_ceiling: bool,
    flag_sweep_backtrack: bool,
    flag_show_path: bool,
    flag_text_out: String,
    flag_save_layout: String,
}

// Error, ErrorKind, ResultExt and Result for the driver, wrapping the library's own errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_carver::errors::Error, ::maze_carver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let config = maze_config(&args);
    let layout = maze_carver::generate_with_config(&config, args.flag_seed)?;
    info!("generated a {}x{} maze with {} obstacles",
          config.cells_wide, config.cells_deep, layout.obstacles_count());

    let text = render_text(&layout, args.flag_show_path);
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_layout.is_empty() {
        write_text_to_file(&layout_text(&layout), &args.flag_save_layout)
            .chain_err(|| format!("Failed to write maze layout to text file {}", args.flag_save_layout))?;
    }

    Ok(())
}

fn maze_config(args: &MazeArgs) -> MazeConfig {
    let backtrack = if args.flag_sweep_backtrack {
        Backtrack::FullSweep
    } else {
        Backtrack::NewestLive
    };
    MazeConfigBuilder::new()
        .cells_wide(args.flag_cells_wide)
        .cells_deep(args.flag_cells_deep)
        .cell_size(args.flag_cell_size)
        .wall_thickness(args.flag_wall_thickness)
        .wall_height(args.flag_wall_height)
        .floor_on(!args.flag_no_floor)
        .ceiling_on(args.flag_ceiling)
        .backtrack(backtrack)
        .build()
}

fn render_text(layout: &MazeLayout, show_path: bool) -> String {
    let grid = layout.grid();
    let end_points = StartEndPointsDisplay::new(grid.start(), grid.destination());

    let path = if show_path {
        pathing::solution_path(grid).unwrap_or_else(Vec::new)
    } else {
        vec![]
    };
    let path_display = PathDisplay::new(&path);

    let layers: Vec<&dyn GridDisplay> = vec![&end_points, &path_display];
    let layered = LayeredDisplay::new(layers);
    grid.render(Some(&layered as &dyn GridDisplay))
}

fn box_line(kind: &str, center: Point, size: Size) -> String {
    let values = [center.x, center.y, center.z, size.width, size.height, size.depth];
    format!("{} {}\n", kind, values.iter().join(" "))
}

fn layout_text(layout: &MazeLayout) -> String {
    let grid = layout.grid();
    let mut data = format!("{} {} {}\n", grid.width(), grid.depth(), layout.obstacles_count());

    for obstacle in layout.obstacles() {
        let kind = if obstacle.coordinate.is_pillar() { "pillar" } else { "wall" };
        data.push_str(&box_line(kind, obstacle.center, obstacle.size));
    }
    if let Some(floor) = layout.floor_extent() {
        data.push_str(&box_line("floor", floor.center, floor.size));
    }
    if let Some(ceiling) = layout.ceiling_extent() {
        data.push_str(&box_line("ceiling", ceiling.center, ceiling.size));
    }
    let tile = layout.destination_tile();
    data.push_str(&box_line("destination", tile.center, tile.size));
    data
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
