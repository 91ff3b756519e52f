mod problems;

pub use problems::{create_problem_scene, populate_problem_scene, PATH_LINE, PROBLEMS};
