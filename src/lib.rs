// Library surface for the binary and the headless integration tests.
pub mod app;
pub mod app_dirs;
pub mod blood_moon;
pub mod config;
pub mod keyboard;
pub mod logging;
pub mod machine;
pub mod manager;
pub mod rando;
pub mod run;
pub mod runtime;
pub mod splits;
pub mod timer;
pub mod ui;
pub mod view;
pub mod waypoint;
