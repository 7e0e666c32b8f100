use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, info,
    management::PlaylistGenerator,
    success,
    types::TrackTableRow,
    warning,
};

pub async fn playlist(config: Config, vibe: String) {
    if let Err(e) = config.ensure_configured() {
        error!("{}", e);
    }

    let generator = match PlaylistGenerator::from_config(&config) {
        Ok(generator) => generator,
        Err(e) => error!("Failed to initialize clients: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Tuning in to \"{}\"...", vibe.trim()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = generator.generate(&vibe).await;
    pb.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => match e.details() {
            Some(details) => error!("{}\n {}", e, details),
            None => error!("{}", e),
        },
    };

    if result.used_fallback {
        warning!("Language model unavailable, genres picked by keyword heuristic");
    }
    info!("Genres: {}", result.genres.join(", "));

    if let Some(message) = &result.error {
        warning!("{}", message);
        return;
    }

    let rows: Vec<TrackTableRow> = result.tracks.iter().map(TrackTableRow::from).collect();
    let table = Table::new(rows);
    println!("{}", table);
    success!("{} tracks for \"{}\"", result.tracks.len(), result.vibe);
}
