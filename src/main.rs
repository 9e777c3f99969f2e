mod app;
mod audio;
mod config;
mod logging;
mod runtime;
mod session;
mod storage;
mod tracker;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
