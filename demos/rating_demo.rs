use rand::Rng;
use ratingview::{RatingCommand, RatingView, RatingViewConfig};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let font_path = std::env::var("RATING_FONT")
        .unwrap_or_else(|_| "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string());
    let font_data = std::fs::read(font_path)?;

    // Circular style by default: the 0..99 gauge with cap corrections.
    let config = RatingViewConfig::builder()
        .title("Circular rating".to_string())
        .font_data(font_data)
        .build();
    let mut view = RatingView::new(config)?;

    // Create a channel for streaming score updates
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        // Open on the classic frame: 99 out of 100, shown as 9.9.
        if sender.send(RatingCommand::SetRating(100.0, 99.0)).is_err() {
            return;
        }
        thread::sleep(Duration::from_secs(2));

        let mut rng = rand::rng();
        loop {
            let score: f32 = rng.random_range(0.0..99.0);
            if sender.send(RatingCommand::SetProgress(score)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(800));
        }
    });

    println!("Displaying the rating gauge:");
    println!("- opens on 9.9/10, then jumps to a random score every 800ms");
    println!("- set RATING_FONT to point at a different TTF");
    println!("Press Ctrl+C to exit");

    view.show_with_commands(receiver)
}
