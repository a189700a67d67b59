use std::env;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use ratingview::{ArcStyle, RatingCommand, RatingView, RatingViewConfig};

/// Set once a value arrives on stdin; stops the idle animation.
static PIPED: AtomicBool = AtomicBool::new(false);

const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut max: f32 = 100.0;
    let mut progress: f32 = 0.0;
    let mut title = "Rating".to_string();
    let mut style = ArcStyle::circular();
    let mut font_path = DEFAULT_FONT_PATH.to_string();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max" => {
                if let Some(value) = args.next() {
                    if let Ok(value) = value.parse() {
                        max = value;
                    }
                }
            }
            "--progress" => {
                if let Some(value) = args.next() {
                    if let Ok(value) = value.parse() {
                        progress = value;
                    }
                }
            }
            "--style" => {
                if let Some(name) = args.next() {
                    style = match name.as_str() {
                        "standard" => ArcStyle::standard(),
                        _ => ArcStyle::circular(),
                    };
                }
            }
            "--title" => {
                if let Some(value) = args.next() {
                    title = value;
                }
            }
            "--font" => {
                if let Some(path) = args.next() {
                    font_path = path;
                }
            }
            _ => {}
        }
    }

    let font_data = std::fs::read(&font_path)?;
    let config = RatingViewConfig::builder()
        .title(title)
        .max(max)
        .progress(progress)
        .style(style)
        .font_data(font_data)
        .build();
    let mut view = RatingView::new(config)?;

    let (sender, receiver) = mpsc::channel();

    // Feed newline-separated scores from stdin into the view.
    let stdin_sender = sender.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if let Ok(value) = line.trim().parse::<f32>() {
                PIPED.store(true, Ordering::Relaxed);
                if stdin_sender.send(RatingCommand::SetProgress(value)).is_err() {
                    break;
                }
            }
        }
    });

    // Idle animation: drift toward random scores until something is piped.
    let bound = style.bound_policy.bound(max);
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut current = progress;
        let mut target: f32 = rng.random_range(0.0..=bound);
        loop {
            if PIPED.load(Ordering::Relaxed) {
                break;
            }
            if (current - target).abs() < 0.5 {
                target = rng.random_range(0.0..=bound);
            }
            current += (target - current) * 0.1;
            let score = current.clamp(0.0, bound);
            if sender.send(RatingCommand::SetProgress(score)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
    });

    view.show_with_commands(receiver)
}
