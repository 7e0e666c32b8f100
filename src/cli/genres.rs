use crate::{info, vibe::genres::GENRE_WHITELIST};

pub fn genres() {
    info!("Accepted seed genres ({}):", GENRE_WHITELIST.len());
    for genre in GENRE_WHITELIST {
        println!("  {genre}");
    }
}
