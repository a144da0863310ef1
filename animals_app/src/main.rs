//! Animal soundboard
//!
//! Shows a grid of animal pictures; clicking one plays its sound. `=` toggles
//! the debug outlines, `F` toggles fullscreen and Escape quits.

mod board;

use std::path::PathBuf;

use thiserror::Error;

use soundboard_engine::assets::FileSystemSource;
use soundboard_engine::audio::backend::create_backend;
use soundboard_engine::audio::AudioError;
use soundboard_engine::config::{Config, ConfigError, SoundboardConfig};
use soundboard_engine::foundation::logging;
use soundboard_engine::render::vulkan::VulkanError;
use soundboard_engine::render::{PresentError, VulkanPresenter, WindowError, WindowHandle};
use soundboard_engine::ui::{ButtonRegistry, ColumnLayout, RegistryError};

use board::Soundboard;

/// Environment variable naming an optional TOML or RON config file
const CONFIG_ENV: &str = "SOUNDBOARD_CONFIG";

/// Everything that can stop the application
#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset loading failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Vulkan error: {0}")]
    Vulkan(#[from] VulkanError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Presentation error: {0}")]
    Present(#[from] PresentError),
}

fn run() -> Result<(), AppError> {
    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = SoundboardConfig::load_or_default(config_path.as_deref())?;

    let source = FileSystemSource::new(&config.assets.root);
    let layout = ColumnLayout::from_config(&config.layout);
    let registry = ButtonRegistry::load(&source, &config.assets, &layout)?;
    log::info!("Loaded {} buttons", registry.len());

    let mut window = WindowHandle::new(&config.window)?;
    let mut presenter = VulkanPresenter::new(&mut window, &config.window.title, config.window.vsync)?;

    let audio_config = config.audio.backend_config();
    log::info!(
        "Opening audio output at {} Hz, {} channels, {} frame buffer",
        audio_config.sample_rate,
        audio_config.channels,
        audio_config.buffer_size
    );
    let mut audio = create_backend(&audio_config)?;

    let mut board = Soundboard::new(registry, &config);
    board.run(&mut window, &mut presenter, audio.as_mut())?;

    audio.shutdown();
    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {:?}", panic_info);

        if let Some(location) = panic_info.location() {
            eprintln!("Panic location: {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    logging::init(log::LevelFilter::Info);
    log::info!("Starting Animal Soundboard");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Animal Soundboard finished");
}
