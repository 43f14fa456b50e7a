//! Sound effects and background music
//!
//! The simulation never plays sounds itself; the main loop turns `GameEvent`s
//! into effects here. Assets are read into memory once at startup. A missing
//! file is logged and that effect stays silent.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::settings::AudioSettings;
use crate::sim::{GameEvent, RoundEnd};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ordinary coin collected
    Coin,
    /// Special coin collected
    PowerUp,
    /// Ball hit an obstacle
    Hit,
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::RoundOver {
                reason: RoundEnd::Collision,
                ..
            } => Some(SoundEffect::Hit),
            _ => None,
        }
    }
}

/// Encoded audio file held in memory
#[derive(Debug, Clone)]
pub struct SoundAsset {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl SoundAsset {
    /// Read the file, logging and returning `None` if it can't be read
    pub fn load(path: &Path) -> Option<Self> {
        match std::fs::read(path) {
            Ok(bytes) => Some(Self {
                path: path.to_path_buf(),
                bytes: bytes.into(),
            }),
            Err(e) => {
                log::warn!("[Sound] Couldn't load {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh reader over the encoded bytes
    pub fn reader(&self) -> Cursor<Arc<[u8]>> {
        Cursor::new(Arc::clone(&self.bytes))
    }
}

/// Playback backend. Both calls report whether anything will be heard.
pub trait SoundOutput {
    fn play(&mut self, sound: &SoundAsset, volume: f32) -> bool;
    fn play_music(&mut self, sound: &SoundAsset, volume: f32) -> bool;
}

/// Output used when no audio device is available
#[derive(Debug, Default)]
pub struct SilentOutput;

impl SoundOutput for SilentOutput {
    fn play(&mut self, _sound: &SoundAsset, _volume: f32) -> bool {
        false
    }

    fn play_music(&mut self, _sound: &SoundAsset, _volume: f32) -> bool {
        false
    }
}

#[cfg(feature = "audio")]
mod device {
    use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

    use super::{SoundAsset, SoundOutput};

    /// Plays through the default output device
    pub struct RodioOutput {
        stream: OutputStream,
        music: Sink,
    }

    impl RodioOutput {
        pub fn open() -> Option<Self> {
            match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    stream.log_on_drop(false);
                    let music = Sink::connect_new(stream.mixer());
                    Some(Self { stream, music })
                }
                Err(e) => {
                    log::warn!("[Sound] No audio output: {}", e);
                    None
                }
            }
        }
    }

    impl SoundOutput for RodioOutput {
        fn play(&mut self, sound: &SoundAsset, volume: f32) -> bool {
            match Decoder::new(sound.reader()) {
                Ok(source) => {
                    let sink = Sink::connect_new(self.stream.mixer());
                    sink.set_volume(volume);
                    sink.append(source);
                    sink.detach();
                    true
                }
                Err(e) => {
                    log::warn!("[Sound] Couldn't decode {}: {}", sound.path().display(), e);
                    false
                }
            }
        }

        fn play_music(&mut self, sound: &SoundAsset, volume: f32) -> bool {
            match Decoder::new(sound.reader()) {
                Ok(source) => {
                    self.music.set_volume(volume);
                    self.music.append(source.buffered().repeat_infinite());
                    true
                }
                Err(e) => {
                    log::warn!("[Music] Couldn't decode {}: {}", sound.path().display(), e);
                    false
                }
            }
        }
    }
}

#[cfg(feature = "audio")]
pub use device::RodioOutput;

/// The best available output: the default device, else silence
pub fn default_output() -> Box<dyn SoundOutput> {
    #[cfg(feature = "audio")]
    {
        if let Some(output) = RodioOutput::open() {
            return Box::new(output);
        }
    }
    log::info!("[Sound] Playing without sound");
    Box::new(SilentOutput)
}

/// Audio manager for the game
pub struct AudioManager {
    output: Box<dyn SoundOutput>,
    coin: Option<SoundAsset>,
    power: Option<SoundAsset>,
    hit: Option<SoundAsset>,
    music: Option<SoundAsset>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &AudioSettings, output: Box<dyn SoundOutput>) -> Self {
        Self {
            output,
            coin: SoundAsset::load(&settings.coin),
            power: SoundAsset::load(&settings.power),
            hit: SoundAsset::load(&settings.hit),
            music: SoundAsset::load(&settings.music),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    fn asset(&self, effect: SoundEffect) -> Option<&SoundAsset> {
        match effect {
            SoundEffect::Coin => self.coin.as_ref(),
            SoundEffect::PowerUp => self.power.as_ref(),
            SoundEffect::Hit => self.hit.as_ref(),
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        let Some(sound) = self.asset(effect).cloned() else {
            return;
        };
        self.output.play(&sound, vol);
    }

    /// Start looping background music. Returns false when nothing will play.
    pub fn start_music(&mut self) -> bool {
        let vol = self.effective_volume(self.music_volume);
        let Some(sound) = self.music.as_ref().filter(|_| vol > 0.0) else {
            return false;
        };
        let started = self.output.play_music(sound, vol);
        if started {
            log::info!("[Music] Playing {}", sound.path().display());
        }
        started
    }

    /// Play whatever the tick's events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Read;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder {
        played: Rc<RefCell<Vec<(PathBuf, f32)>>>,
        music: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl SoundOutput for Recorder {
        fn play(&mut self, sound: &SoundAsset, volume: f32) -> bool {
            self.played.borrow_mut().push((sound.path().to_path_buf(), volume));
            true
        }

        fn play_music(&mut self, sound: &SoundAsset, _volume: f32) -> bool {
            self.music.borrow_mut().push(sound.path().to_path_buf());
            true
        }
    }

    fn temp_asset(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tilt-coins-{}-{name}", std::process::id()));
        std::fs::write(&path, b"RIFF").unwrap();
        path
    }

    fn settings_with_coin(coin: PathBuf) -> AudioSettings {
        AudioSettings {
            coin,
            power: "/missing/power.wav".into(),
            hit: "/missing/hit.wav".into(),
            music: "/missing/background.mp3".into(),
            ..AudioSettings::default()
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::CoinCollected { points: 1 }),
            Some(SoundEffect::Coin)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected { points: 5 }),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::RoundOver {
                reason: RoundEnd::Collision,
                score: 3
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::RoundOver {
                reason: RoundEnd::TimeUp,
                score: 3
            }),
            None
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::RoundStarted), None);
    }

    #[test]
    fn test_asset_reader_yields_file_bytes() {
        let path = temp_asset("bytes.wav");
        let sound = SoundAsset::load(&path).unwrap();
        let mut bytes = Vec::new();
        sound.reader().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"RIFF");
        // Each reader starts from the beginning
        let mut again = Vec::new();
        sound.reader().read_to_end(&mut again).unwrap();
        assert_eq!(again, b"RIFF");
        let _ = std::fs::remove_file(&path);
        assert!(SoundAsset::load(Path::new("/missing/nothing.wav")).is_none());
    }

    #[test]
    fn test_missing_assets_stay_silent() {
        let coin = temp_asset("coin.wav");
        let recorder = Recorder::default();
        let mut audio =
            AudioManager::new(&settings_with_coin(coin.clone()), Box::new(recorder.clone()));

        audio.play(SoundEffect::Hit);
        audio.play(SoundEffect::PowerUp);
        assert!(recorder.played.borrow().is_empty());
        assert!(!audio.start_music());

        audio.play(SoundEffect::Coin);
        let played = recorder.played.borrow();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, coin);
        assert!((played[0].1 - 0.8).abs() < 1e-6);
        let _ = std::fs::remove_file(&coin);
    }

    #[test]
    fn test_each_effect_plays_its_own_asset() {
        let coin = temp_asset("own-coin.wav");
        let power = temp_asset("own-power.wav");
        let hit = temp_asset("own-hit.wav");
        let recorder = Recorder::default();
        let settings = AudioSettings {
            coin: coin.clone(),
            power: power.clone(),
            hit: hit.clone(),
            master_volume: 0.5,
            sfx_volume: 0.4,
            ..AudioSettings::default()
        };
        let mut audio = AudioManager::new(&settings, Box::new(recorder.clone()));
        audio.handle_events(&[
            GameEvent::CoinCollected { points: 1 },
            GameEvent::PowerUpCollected { points: 5 },
            GameEvent::RoundOver {
                reason: RoundEnd::Collision,
                score: 6,
            },
        ]);
        let played = recorder.played.borrow();
        let paths: Vec<&PathBuf> = played.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec![&coin, &power, &hit]);
        assert!(played.iter().all(|(_, v)| (v - 0.2).abs() < 1e-6));
        for p in [&coin, &power, &hit] {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn test_muted_plays_nothing() {
        let coin = temp_asset("muted-coin.wav");
        let recorder = Recorder::default();
        let mut audio =
            AudioManager::new(&settings_with_coin(coin.clone()), Box::new(recorder.clone()));
        audio.set_muted(true);
        audio.handle_events(&[GameEvent::CoinCollected { points: 1 }]);
        assert!(recorder.played.borrow().is_empty());

        audio.set_muted(false);
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        audio.handle_events(&[GameEvent::CoinCollected { points: 1 }]);
        assert_eq!(recorder.played.borrow()[0].1, 0.5);
        let _ = std::fs::remove_file(&coin);
    }

    #[test]
    fn test_music_starts_when_present() {
        let music = temp_asset("background.mp3");
        let recorder = Recorder::default();
        let settings = AudioSettings {
            music: music.clone(),
            ..AudioSettings::default()
        };
        let mut audio = AudioManager::new(&settings, Box::new(recorder.clone()));
        assert!(audio.start_music());
        assert_eq!(recorder.music.borrow().as_slice(), &[music.clone()]);
        let _ = std::fs::remove_file(&music);
    }

    #[test]
    fn test_silent_output_reports_no_music() {
        let music = temp_asset("silent-background.mp3");
        let settings = AudioSettings {
            music: music.clone(),
            ..AudioSettings::default()
        };
        let mut audio = AudioManager::new(&settings, Box::new(SilentOutput));
        assert!(!audio.start_music());
        let _ = std::fs::remove_file(&music);
    }
}
