use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../VibePulse.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("VibePulse.toml").exists() {
            builder = builder.add_source(File::new("VibePulse.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesLimits {
    pub recommendations: usize,
    pub trending_events: usize,
    pub friend_events: usize,
    pub recent_activities: usize,
    pub user_activities: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesSocial {
    pub activity_retention_hours: i64,
    pub trending_window_minutes: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Features {
    pub limits: FeaturesLimits,
    pub social: FeaturesSocial,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub features: Features,
}

pub async fn init() {
    println!(
        ":: VibePulse Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}
