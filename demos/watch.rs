use bullion::{
    apis::{Api, Demo, GoldApi},
    state::ViewState,
    Bullion, Config, PriceService,
};
use std::{error::Error, sync::Arc, time::Duration};

// Print the market board every few seconds, the way a price list screen
// would render it.
async fn run<A: Api + 'static>(api: A, config: &Config) -> Result<(), Box<dyn Error>> {
    let service = Arc::new(PriceService::new(api));
    let watch = Bullion::from_config(config).watch_market(service);

    for _ in 0..20 {
        tokio::time::sleep(Duration::from_secs(5)).await;
        match watch.state() {
            ViewState::Idle | ViewState::Loading => println!("Loading..."),
            ViewState::Failed(err) => println!("{}", err.user_message()),
            ViewState::Loaded(snapshot) => {
                for price in &snapshot.prices {
                    println!(
                        "{:<12} {:>10} {:>8} ({:>6}%)  updated {}",
                        price.name,
                        price.price,
                        price.change,
                        price.change_percent,
                        price.last_update
                    );
                }
                println!(
                    "up: {}, down: {}, average change: {}%\n",
                    snapshot.summary.advancing,
                    snapshot.summary.declining,
                    snapshot.summary.average_change_percent
                );
            }
        }
    }

    watch.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .with_utc_timestamps()
        .init()?;

    let config = Config::from_env()?;

    // Live prices need a token; fall back to synthetic ones without.
    if config.access_token.is_some() {
        run(GoldApi::new(&config)?, &config).await
    } else {
        run(Demo::new(), &config).await
    }
}
