//! `linkholder badge` – print the last published badge.

use anyhow::Result;
use linkholder_core::config::StatePaths;

use super::file_indicator;

pub async fn run_badge(paths: &StatePaths) -> Result<()> {
    match file_indicator(paths).read()? {
        Some(badge) => println!("{}", badge),
        None => println!("No badge published yet (run `linkholder install`)"),
    }
    Ok(())
}
