mod fixtures;

mod denorm;
