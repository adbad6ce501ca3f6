use rainfall::prelude::*;
use rand::Rng;

fn main() {
    env_logger::init();

    // Desktop preset with a random initial breeze; the wind driver takes
    // over retargeting from there.
    let config = RainConfig::for_profile(Profile::Desktop)
        .with_wind(rand::thread_rng().gen_range(-0.75..0.75));

    if let Err(e) = rainfall::window::run(config) {
        eprintln!("rainfall: {}", e);
        std::process::exit(1);
    }
}
