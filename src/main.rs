use clap::{Parser, Subcommand, ValueEnum};
use our_story::carousel::Carousel;
use our_story::scan::{self, Reel};
use our_story::simulate::{self, Script};
use our_story::theme::{Theme, ThemeStore};
use our_story::{config, counter, output, render};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "our-story")]
#[command(about = "Carousel and lightbox engine for a photo story page")]
#[command(long_about = "\
Carousel and lightbox engine for a photo story page

A directory of numbered photos becomes a slide reel. The same reel drives
a hero rotator and a moments gallery, each with a zoomable lightbox.

Reel structure:

  story/
  ├── config.toml                  # Carousel, lightbox and color settings (optional)
  ├── 001-First-Dance.jpg          # Slide order comes from the number
  ├── 001-First-Dance.toml         # alt, caption, date, time (optional)
  ├── 002-Nice-evening.png
  ├── 002-Nice-evening.txt         # Plain-text caption (optional)
  └── beach.jpg                    # Unnumbered: after numbered slides

Caption resolution (first available wins):
  Caption: sidecar .toml caption → sidecar .txt → filename (001-Dusk.jpg → \"Dusk\")
  Alt:     sidecar .toml alt → caption → \"Slide N\"

Run 'our-story gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Reel directory
    #[arg(long, default_value = "story", global = true)]
    source: PathBuf,

    /// Output directory for the rendered page
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (reel.json, theme.json)
    #[arg(long, default_value = ".our-story-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the reel directory into reel.json
    Scan,
    /// Validate the reel directory without writing anything
    Check,
    /// Replay an input script against the gallery carousel
    Simulate {
        /// TOML script of timestamped inputs
        #[arg(long)]
        script: PathBuf,
        /// Drive the hero carousel instead of the gallery
        #[arg(long)]
        hero: bool,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the page to <output>/index.html
    Render {
        /// Replay this script on the gallery before rendering
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Show or change the saved light/dark preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Days together and the countdown to the next anniversary
    Counter {
        /// Count up to this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("our_story=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Scan => {
            let reel = scan::scan(&cli.source)?;
            let reel_path = cli.temp_dir.join("reel.json");
            reel.save(&reel_path)?;
            output::print_scan_output(&reel, &cli.source);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let reel = scan::scan(&cli.source)?;
            output::print_scan_output(&reel, &cli.source);
            println!("==> Reel is valid");
        }
        Command::Simulate { script, hero, json } => {
            let reel = load_reel(&cli)?;
            let script = Script::load(script)?;
            let mut carousel = build_carousel(&reel, *hero)?;
            let trace = simulate::run(&mut carousel, &script)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                output::print_trace(&trace);
            }
        }
        Command::Render { script } => {
            let reel = load_reel(&cli)?;
            let hero = build_carousel(&reel, true)?;
            let mut gallery = build_carousel(&reel, false)?;
            if let Some(path) = script {
                let script = Script::load(path)?;
                simulate::run(&mut gallery, &script)?;
            }
            let theme = theme_store(&cli.temp_dir, &reel).get();
            let index = render::write_site(
                &reel,
                &cli.source,
                &cli.output,
                &hero.view(),
                &gallery.view(),
                theme,
            )?;
            println!("Rendered {} ({} theme)", index.display(), theme);
        }
        Command::Theme { action } => {
            let default = config::load_config(&cli.source)
                .map(|c| c.theme.default)
                .unwrap_or_default();
            let path = theme_path(&cli.temp_dir);
            let store = ThemeStore::load(&path, default);
            let _announce = store.subscribe(|theme| println!("Theme changed to {theme}"));
            match action {
                Some(ThemeAction::Light) => store.set(Theme::Light),
                Some(ThemeAction::Dark) => store.set(Theme::Dark),
                Some(ThemeAction::Toggle) => {
                    store.toggle();
                }
                None => println!("{}", store.get()),
            }
            if store.version() > 0 {
                store.save(&path)?;
            }
        }
        Command::Counter { today } => {
            let config = config::load_config(&cli.source)?;
            let start = config
                .counter
                .start_date
                .as_deref()
                .ok_or(counter::CounterError::NoStartDate)
                .and_then(counter::parse_date)?;
            let today = match today {
                Some(raw) => counter::parse_date(raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let together = counter::together(start, today)?;
            output::print_counter(&together, &config.counter.note);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read `<temp>/reel.json`, scanning the source first if it isn't there.
fn load_reel(cli: &Cli) -> Result<Reel, scan::ScanError> {
    let reel_path = cli.temp_dir.join("reel.json");
    if reel_path.exists() {
        return Reel::load(&reel_path);
    }
    let reel = scan::scan(&cli.source)?;
    reel.save(&reel_path)?;
    Ok(reel)
}

fn build_carousel(reel: &Reel, hero: bool) -> Result<Carousel, our_story::sequencer::CarouselError> {
    let settings = if hero {
        reel.config.carousel.as_hero()
    } else {
        reel.config.carousel.clone()
    };
    Carousel::with_settings(reel.slides.clone(), settings, reel.config.lightbox.clone())
}

fn theme_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("theme.json")
}

fn theme_store(temp_dir: &Path, reel: &Reel) -> ThemeStore {
    ThemeStore::load(&theme_path(temp_dir), reel.config.theme.default)
}
