pub mod sfx;

use crate::error::AudioError;
use crate::notification::NotificationKind;
use crate::render::SoundCue;
use rodio::{OutputStream, OutputStreamHandle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;

/// Files shipped in the bundle's `sounds/` resource directory.
pub const BUILTIN_SOUNDS: [(NotificationKind, &str); 2] = [
    (NotificationKind::Success, "success.wav"),
    (NotificationKind::Error, "error.mp3"),
];

/// Encoded sound files held in memory so playback never touches the disk.
#[derive(Debug, Default)]
pub struct SampleCache {
    builtin: HashMap<NotificationKind, Vec<u8>>,
    custom: HashMap<PathBuf, Vec<u8>>,
}

impl SampleCache {
    /// Read the built-in cues from `dir` and every configured per-kind file.
    /// Missing files only cost their cue.
    pub fn load<'a>(dir: &Path, custom: impl IntoIterator<Item = &'a PathBuf>) -> Self {
        let mut cache = Self::default();

        for (kind, file) in BUILTIN_SOUNDS {
            if let Some(data) = read_sample(&dir.join(file)) {
                cache.builtin.insert(kind, data);
            }
        }
        for path in custom {
            if let Some(data) = read_sample(path) {
                cache.custom.insert(path.clone(), data);
            }
        }

        cache
    }

    pub fn get(&self, cue: &SoundCue) -> Option<&[u8]> {
        match cue {
            SoundCue::Builtin(kind) => self.builtin.get(kind),
            SoundCue::File(path) => self.custom.get(path),
        }
        .map(Vec::as_slice)
    }
}

fn read_sample(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(data) => {
            tracing::debug!(path = %path.display(), "Loaded sound");
            Some(data)
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {e}", path.display());
            None
        }
    }
}

/// Plays notification cues on the default output device.
pub struct SoundBoard {
    // Send + Sync; the OutputStream itself stays with the caller
    stream_handle: OutputStreamHandle,
    samples: SampleCache,
}

impl SoundBoard {
    /// Returns the board and the stream backing it.
    /// The caller MUST keep the OutputStream alive for playback to continue.
    pub fn open() -> Result<(Self, OutputStream), AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        tracing::debug!("Audio output opened");
        Ok((
            Self {
                stream_handle,
                samples: SampleCache::default(),
            },
            stream,
        ))
    }

    pub fn preload(&mut self, dir: &Path, custom: &HashMap<String, PathBuf>) {
        self.samples = SampleCache::load(dir, custom.values());
    }

    pub fn play(&self, cue: &SoundCue) -> Result<(), AudioError> {
        match (cue, self.samples.get(cue)) {
            (SoundCue::Builtin(_), Some(data)) => {
                let pitch = sfx::jittered_pitch(&mut rand::thread_rng());
                self.stream_handle
                    .play_raw(sfx::builtin(data.to_vec(), pitch)?)?;
            }
            (SoundCue::Builtin(kind), None) => {
                tracing::debug!(kind = kind.as_str(), "No built-in sound loaded");
            }
            (SoundCue::File(_), Some(data)) => {
                self.stream_handle.play_raw(sfx::custom(data.to_vec())?)?;
            }
            (SoundCue::File(path), None) => self.play_uncached(path.clone()),
        }
        Ok(())
    }

    /// Per-call files are not known up front; read them off the caller's thread.
    fn play_uncached(&self, path: PathBuf) {
        let stream_handle = self.stream_handle.clone();
        thread::spawn(move || {
            let result = std::fs::read(&path)
                .map_err(|source| AudioError::Read {
                    path: path.display().to_string(),
                    source,
                })
                .and_then(|data| Ok(stream_handle.play_raw(sfx::custom(data)?)?));
            if let Err(e) = result {
                tracing::warn!("Sound playback failed: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("notch-island-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_cache_holds_builtin_and_configured_files() {
        let dir = scratch_dir("cache");
        fs::write(dir.join("success.wav"), b"wav bytes").unwrap();
        let chime = dir.join("chime.mp3");
        fs::write(&chime, b"mp3 bytes").unwrap();

        let cache = SampleCache::load(&dir, [&chime]);

        assert_eq!(
            cache.get(&SoundCue::Builtin(NotificationKind::Success)),
            Some(&b"wav bytes"[..])
        );
        assert_eq!(cache.get(&SoundCue::File(chime.clone())), Some(&b"mp3 bytes"[..]));
        // error.mp3 was never written
        assert_eq!(cache.get(&SoundCue::Builtin(NotificationKind::Error)), None);
        assert_eq!(cache.get(&SoundCue::File(dir.join("other.wav"))), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_gives_empty_cache() {
        let missing = PathBuf::from("/definitely/not/here/sound.wav");
        let cache = SampleCache::load(Path::new("/definitely/not/here"), [&missing]);
        assert_eq!(cache.get(&SoundCue::Builtin(NotificationKind::Success)), None);
        assert_eq!(cache.get(&SoundCue::File(missing)), None);
    }
}
