//! selects scan locations that each cover a minimum number of spawnpoints within
//! a geofence. see `scanpoint --help` for the available operations.
use clap::Parser;
use scanpoint::app::ScanApp;

fn main() {
    env_logger::init();
    let args = ScanApp::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("scanpoint failed: {e}");
            std::process::exit(1);
        }
    }
}
