use std::io::{self, BufReader};

use anyhow::Context as _;
use block_mover::{
    common::{self, Config},
    problem::Input,
    solver::{self, Answer},
};
use proconio::source::line::LineSource;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    common::init_logging();
    let config = Config::from_env();

    let mut source = LineSource::new(BufReader::new(io::stdin()));
    let input = Input::read(&mut source).context("failed to read the board")?;

    let route = solver::solve_input(&input, config.goal_mode);

    if let Some(route) = &route {
        debug!("route: {}", route);
    }

    println!("{}", Answer::from(route.as_ref()));

    Ok(())
}
