//! Scene viewer
//!
//! Host for the scene core: loads a scene file, wires diagnostic listeners
//! onto the event bus, loads every sprite texture from the assets directory
//! and runs a fixed number of frames, draining queued events once per frame.

use std::path::PathBuf;

use clap::Parser;
use scene_core::foundation::logging;
use scene_core::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Load a scene and run its event loop for a few frames")]
struct Options {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Settings file (.toml or .ron); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

fn register_listeners(bus: &EventBus) {
    bus.on(names::SCENE_LOADED, |event| {
        log::info!(
            "Scene '{}' ready ({})",
            event.text(1).unwrap_or("?"),
            event.text(0).unwrap_or("?")
        );
        Ok(())
    });
    bus.on(names::SPRITE_LOADED, |event| {
        match (event.arg(0), event.text(1)) {
            (Some(EventArg::Entity(entity)), Some(path)) => {
                log::debug!("Sprite for {} loaded from '{}'", entity, path);
                Ok(())
            }
            _ => {
                let message = format!("malformed {} event: {:?}", names::SPRITE_LOADED, event.args);
                Err(message.into())
            }
        }
    });
    bus.on(names::FRAME, |event| {
        log::trace!("Frame {}", event.int(0).unwrap_or_default());
        Ok(())
    });
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    logging::init_with_config(&config.engine);

    log::info!("Starting scene viewer for '{}'", options.scene.display());

    let bus = EventBus::with_config(&config.events);
    register_listeners(&bus);

    let loader = SceneLoader::default();
    let mut scene = loader.load_file(&options.scene)?;
    bus.emit(names::SCENE_LOADED, vec![scene.id().into(), scene.name().into()]);

    let textures = ImageLoader::new(config.assets.clone());
    if let Err(err) = pollster::block_on(scene.load_sprites(&textures)) {
        log::error!("Sprite loading stopped: {}", err);
    }
    for sprite in scene.sprites().filter(|sprite| sprite.is_loaded()) {
        if let Some(entity) = sprite.entity() {
            bus.emit(names::SPRITE_LOADED, vec![entity.into(), sprite.texture().path().into()]);
        }
    }

    for frame in 0..options.frames {
        bus.emit_immediate(names::FRAME, vec![i64::from(frame).into()]);
        let processed = bus.process_events();
        log::debug!("Frame {}: {} queued event(s) processed", frame, processed);
    }

    println!("Scene '{}' ({})", scene.name(), scene.id());
    for entity in scene.entities() {
        let types = entity.component_types().join(", ");
        println!("  {} [{}]: {}", entity.name(), entity.id(), types);
    }
    println!("  {} sprite(s), {} frame(s)", scene.sprite_count(), options.frames);

    log::info!("Scene viewer finished");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse();

    run(&options).map_err(|err| {
        log::error!("Scene viewer failed: {}", err);
        err
    })
}
