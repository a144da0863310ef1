//! Button registry
//!
//! The registry is built once at startup and is read-only afterwards. Buttons
//! keep their declared order, which is also the hit-test priority.

use std::sync::Arc;

use thiserror::Error;

use super::layout::ColumnLayout;
use crate::assets::{AssetError, AssetSource, ImageData};
use crate::audio::{AudioBackend, AudioClip, AudioError, PlaybackHandle};
use crate::config::AssetConfig;
use crate::foundation::math::{Point2, Rect};

/// Registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No button has this identifier
    #[error("No button named {0}")]
    NotFound(String),

    /// A picture or clip could not be loaded
    #[error("Failed to load assets for {name}: {source}")]
    Asset {
        /// Button identifier
        name: String,
        /// Underlying asset error
        #[source]
        source: AssetError,
    },

    /// The manifest named no buttons
    #[error("Manifest contains no buttons")]
    Empty,

    /// Two buttons share an identifier
    #[error("Duplicate button {0}")]
    DuplicateId(String),

    /// A button rectangle covers no pixels
    #[error("Button {name} has a degenerate rectangle {rect:?}")]
    DegenerateRect {
        /// Button identifier
        name: String,
        /// Offending rectangle
        rect: Rect,
    },

    /// Two button rectangles share area
    #[error("Button {second} overlaps {first}")]
    Overlap {
        /// Button already in the registry
        first: String,
        /// Button being added
        second: String,
    },

    /// The audio backend refused the clip
    #[error("Failed to play {name}: {source}")]
    Playback {
        /// Button identifier
        name: String,
        /// Underlying audio error
        #[source]
        source: AudioError,
    },
}

/// A named clickable region bound to one picture and one clip
#[derive(Debug, Clone)]
pub struct Button {
    id: String,
    rect: Rect,
    image: Arc<ImageData>,
    clip: Arc<AudioClip>,
}

impl Button {
    /// Create a button
    pub fn new(id: impl Into<String>, rect: Rect, image: Arc<ImageData>, clip: Arc<AudioClip>) -> Self {
        Self {
            id: id.into(),
            rect,
            image,
            clip,
        }
    }

    /// Identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Screen rectangle
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Decoded picture
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Decoded sound
    pub fn clip(&self) -> &AudioClip {
        &self.clip
    }
}

/// Collects buttons and checks the registry invariants as they arrive
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    buttons: Vec<Button>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a button at the lowest priority so far
    ///
    /// Fails if the rectangle is degenerate, the identifier is taken, or the
    /// rectangle overlaps a button already added.
    pub fn push(&mut self, button: Button) -> Result<&mut Self, RegistryError> {
        if button.rect.is_degenerate() {
            return Err(RegistryError::DegenerateRect {
                name: button.id,
                rect: button.rect,
            });
        }

        for existing in &self.buttons {
            if existing.id == button.id {
                return Err(RegistryError::DuplicateId(button.id));
            }
            if existing.rect.intersects(&button.rect) {
                return Err(RegistryError::Overlap {
                    first: existing.id.clone(),
                    second: button.id,
                });
            }
        }

        self.buttons.push(button);
        Ok(self)
    }

    /// Finish; an empty registry is an error
    pub fn build(self) -> Result<ButtonRegistry, RegistryError> {
        if self.buttons.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(ButtonRegistry { buttons: self.buttons })
    }
}

/// Immutable, ordered collection of buttons
#[derive(Debug, Clone)]
pub struct ButtonRegistry {
    buttons: Vec<Button>,
}

impl ButtonRegistry {
    /// Load every button named in `assets.manifest` from `source`
    ///
    /// All pictures and clips are decoded before any placement happens; the
    /// first missing or undecodable file aborts the whole load.
    pub fn load(
        source: &dyn AssetSource,
        assets: &AssetConfig,
        layout: &ColumnLayout,
    ) -> Result<Self, RegistryError> {
        if assets.manifest.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut loaded = Vec::with_capacity(assets.manifest.len());
        for name in &assets.manifest {
            log::info!("loading {}", name);

            let asset_error = |e| RegistryError::Asset {
                name: name.clone(),
                source: e,
            };
            let image = ImageData::load(source, &assets.image_path(name)).map_err(asset_error)?;
            let clip = AudioClip::load(source, &assets.sound_path(name)).map_err(asset_error)?;

            loaded.push((name, image, clip));
        }

        let sizes: Vec<(u32, u32)> = loaded
            .iter()
            .map(|(_, image, _)| (image.width(), image.height()))
            .collect();
        let rects = layout.place(&sizes);

        let mut builder = RegistryBuilder::new();
        for ((name, image, clip), rect) in loaded.into_iter().zip(rects) {
            builder.push(Button::new(name.clone(), rect, Arc::new(image), Arc::new(clip)))?;
        }

        let registry = builder.build()?;
        log::info!("Registry ready with {} buttons", registry.len());
        Ok(registry)
    }

    /// Identifier of the first button containing `point`
    pub fn hit_test(&self, point: Point2) -> Option<&str> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(point))
            .map(Button::id)
    }

    /// Start the button's clip from its first sample and return immediately
    pub fn play(&self, id: &str, audio: &mut dyn AudioBackend) -> Result<PlaybackHandle, RegistryError> {
        let button = self.get(id).ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        log::info!("The {} goes ____", button.id);
        audio.play_clip(&button.clip).map_err(|source| RegistryError::Playback {
            name: button.id.clone(),
            source,
        })
    }

    /// Look up a button by identifier
    pub fn get(&self, id: &str) -> Option<&Button> {
        self.buttons.iter().find(|button| button.id == id)
    }

    /// Buttons in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter()
    }

    /// Number of buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Always false for a built registry
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::EmbeddedSource;
    use crate::audio::backend::{AudioBackendConfig, NullBackend};
    use crate::testing::{png_bytes, wav_bytes};

    fn button(id: &str, rect: Rect, samples: usize) -> Button {
        Button::new(
            id,
            rect,
            Arc::new(ImageData::solid_color(rect.width() as u32, rect.height() as u32, [255; 4])),
            Arc::new(AudioClip::from_samples(vec![0.0; samples], 1, 8_000).unwrap()),
        )
    }

    fn farm() -> ButtonRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .push(button("cow", Rect::from_xywh(0.0, 0.0, 100.0, 100.0), 10))
            .unwrap()
            .push(button("horse", Rect::from_xywh(200.0, 0.0, 100.0, 100.0), 20))
            .unwrap();
        builder.build().unwrap()
    }

    fn audio() -> NullBackend {
        let mut backend = NullBackend::new();
        backend.initialize(&AudioBackendConfig::default()).unwrap();
        backend
    }

    fn assets(names: &[&str]) -> AssetConfig {
        AssetConfig {
            manifest: names.iter().map(|name| (*name).to_string()).collect(),
            ..AssetConfig::default()
        }
    }

    fn source_with(names: &[&str]) -> EmbeddedSource {
        let mut source = EmbeddedSource::new();
        for name in names {
            source.insert(&format!("image/{}.jpg", name), png_bytes(200, 200, [90, 60, 30, 255]));
            source.insert(&format!("sound/{}.mp3", name), wav_bytes(&[0, 1000, -1000, 0], 1, 22_050));
        }
        source
    }

    #[test]
    fn test_click_scenario() {
        let registry = farm();
        let mut backend = audio();

        for (x, y) in [(50.0, 50.0), (250.0, 50.0), (150.0, 50.0)] {
            if let Some(id) = registry.hit_test(Point2::new(x, y)) {
                registry.play(id, &mut backend).unwrap();
            }
        }

        let plays: Vec<usize> = backend.plays().iter().map(|play| play.samples).collect();
        assert_eq!(plays, vec![10, 20]);
    }

    #[test]
    fn test_hit_test_inside_and_outside() {
        let registry = farm();

        assert_eq!(registry.hit_test(Point2::new(0.0, 0.0)), Some("cow"));
        assert_eq!(registry.hit_test(Point2::new(99.5, 99.5)), Some("cow"));
        assert_eq!(registry.hit_test(Point2::new(299.0, 1.0)), Some("horse"));
        assert_eq!(registry.hit_test(Point2::new(100.0, 50.0)), None);
        assert_eq!(registry.hit_test(Point2::new(50.0, 100.0)), None);
        assert_eq!(registry.hit_test(Point2::new(-1.0, 50.0)), None);
        assert_eq!(registry.hit_test(Point2::new(150.0, 50.0)), None);
    }

    #[test]
    fn test_play_unknown_is_not_found() {
        let registry = farm();
        let mut backend = audio();

        let result = registry.play("unicorn", &mut backend);
        assert!(matches!(result, Err(RegistryError::NotFound(name)) if name == "unicorn"));
        assert!(backend.plays().is_empty());
    }

    #[test]
    fn test_overlapping_plays_layer() {
        let registry = farm();
        let mut backend = audio();

        let first = registry.play("cow", &mut backend).unwrap();
        let second = registry.play("cow", &mut backend).unwrap();
        assert_ne!(first, second);
        assert_eq!(backend.active_count(), 2);
    }

    #[test]
    fn test_playback_failure_is_reported() {
        let registry = farm();
        let mut backend = audio();
        backend.set_failing(true);

        let result = registry.play("horse", &mut backend);
        assert!(matches!(result, Err(RegistryError::Playback { name, .. }) if name == "horse"));
    }

    #[test]
    fn test_builder_rejects_overlap() {
        let mut builder = RegistryBuilder::new();
        builder
            .push(button("cow", Rect::from_xywh(0.0, 0.0, 100.0, 100.0), 1))
            .unwrap();

        let result = builder.push(button("horse", Rect::from_xywh(50.0, 50.0, 100.0, 100.0), 1));
        assert!(matches!(
            result,
            Err(RegistryError::Overlap { first, second }) if first == "cow" && second == "horse"
        ));
    }

    #[test]
    fn test_builder_accepts_shared_edge() {
        let mut builder = RegistryBuilder::new();
        builder
            .push(button("cow", Rect::from_xywh(0.0, 0.0, 100.0, 100.0), 1))
            .unwrap()
            .push(button("horse", Rect::from_xywh(100.0, 0.0, 100.0, 100.0), 1))
            .unwrap();
        let registry = builder.build().unwrap();

        assert_eq!(registry.hit_test(Point2::new(100.0, 10.0)), Some("horse"));
    }

    #[test]
    fn test_builder_rejects_degenerate_and_duplicate() {
        let mut builder = RegistryBuilder::new();
        let flat = Button::new(
            "flat",
            Rect::from_xywh(0.0, 0.0, 10.0, 0.0),
            Arc::new(ImageData::solid_color(1, 1, [0; 4])),
            Arc::new(AudioClip::from_samples(vec![0.0], 1, 8_000).unwrap()),
        );
        assert!(matches!(builder.push(flat), Err(RegistryError::DegenerateRect { .. })));

        builder
            .push(button("cow", Rect::from_xywh(0.0, 0.0, 10.0, 10.0), 1))
            .unwrap();
        let again = button("cow", Rect::from_xywh(50.0, 0.0, 10.0, 10.0), 1);
        assert!(matches!(builder.push(again), Err(RegistryError::DuplicateId(_))));
    }

    #[test]
    fn test_empty_builder_fails() {
        assert!(matches!(RegistryBuilder::new().build(), Err(RegistryError::Empty)));
    }

    #[test]
    fn test_load_places_buttons_in_manifest_order() {
        let names = ["cow", "horse", "chicken", "sheep"];
        let registry =
            ButtonRegistry::load(&source_with(&names), &assets(&names), &ColumnLayout::default()).unwrap();

        let ids: Vec<&str> = registry.iter().map(Button::id).collect();
        assert_eq!(ids, names);
        assert_eq!(registry.get("sheep").unwrap().rect(), Rect::from_xywh(420.0, 0.0, 200.0, 200.0));
        assert_eq!(registry.hit_test(Point2::new(150.0, 250.0)), Some("horse"));
        assert_eq!(registry.get("cow").unwrap().clip().sample_rate(), 22_050);
    }

    #[test]
    fn test_load_is_all_or_nothing() {
        let mut source = source_with(&["cow", "horse"]);
        source.insert("image/sheep.jpg", png_bytes(10, 10, [0; 4]));
        // sheep has a picture but no sound

        let result = ButtonRegistry::load(&source, &assets(&["cow", "horse", "sheep"]), &ColumnLayout::default());
        match result {
            Err(RegistryError::Asset { name, source: AssetError::NotFound(_) }) => assert_eq!(name, "sheep"),
            other => panic!("expected missing sound for sheep, got {:?}", other),
        }
    }

    #[test]
    fn test_load_undecodable_image() {
        let mut source = source_with(&["cow"]);
        source.insert("image/cow.jpg", b"not a jpeg".to_vec());

        let result = ButtonRegistry::load(&source, &assets(&["cow"]), &ColumnLayout::default());
        assert!(matches!(
            result,
            Err(RegistryError::Asset { source: AssetError::DecodeFailed { .. }, .. })
        ));
    }

    #[test]
    fn test_load_empty_manifest() {
        let result = ButtonRegistry::load(&EmbeddedSource::new(), &assets(&[]), &ColumnLayout::default());
        assert!(matches!(result, Err(RegistryError::Empty)));
    }
}
